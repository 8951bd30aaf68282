//! Headless симуляция Lanternfall
//!
//! Запускает Bevy App без рендера: игрок с оружием, три вида призраков,
//! ловушка и пачка патронов. Печатает прогресс каждые 100 тиков.

use bevy::prelude::*;
use lanternfall_simulation::{
    create_headless_app, AICapabilities, AIConfig, AIState, AmmoPickup, ChaseCooldown, Enemy,
    Health, MoveSpeed, MovementCommand, MovementInput, PatrolRoute, Player, PlayerWeapon, Trap,
    WeaponStats,
};

fn main() {
    let seed = 42;
    println!("Starting Lanternfall headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    spawn_scene(app.world_mut());

    // 10 секунд симуляции @ 60Hz
    for tick in 0..600 {
        app.update();

        if tick % 100 == 0 {
            let entity_count = app.world().entities().len();
            println!("Tick {}: {} entities", tick, entity_count);
        }
    }

    let mut players = app
        .world_mut()
        .query_filtered::<(&Health, &PlayerWeapon), With<Player>>();
    if let Ok((health, weapon)) = players.single(app.world()) {
        println!(
            "Player: {} HP, {}/{} rounds (+{} reserve)",
            health.current, weapon.magazine, weapon.magazine_size, weapon.reserve
        );
    }

    let mut enemies = app.world_mut().query_filtered::<&AIState, With<Enemy>>();
    for state in enemies.iter(app.world()) {
        println!("Ghost: {:?}", state);
    }

    println!("Simulation complete!");
}

fn spawn_scene(world: &mut World) {
    // Игрок в центре, курок зажат, целится вправо
    world.spawn((
        Player,
        Health::new(100),
        Transform::from_xyz(0.0, 0.0, 0.0),
        MovementCommand::Idle,
        MovementInput::default(),
        MoveSpeed::default(),
        PlayerWeapon {
            trigger_held: true,
            aim: Vec2::X,
            ..PlayerWeapon::sidearm()
        },
    ));

    // Патрульный призрак с фиксированным маршрутом
    world.spawn((
        Enemy,
        Health::new(30),
        Transform::from_xyz(6.0, 4.0, 0.0),
        MovementCommand::Idle,
        MoveSpeed::default(),
        AIState::default(),
        AIConfig::default(),
        AICapabilities::chaser(),
        ChaseCooldown::default(),
        PatrolRoute::new(vec![
            Vec2::new(6.0, 4.0),
            Vec2::new(10.0, 4.0),
            Vec2::new(10.0, 8.0),
        ]),
    ));

    // Блуждающий призрак (без маршрута — wander sampling)
    world.spawn((
        Enemy,
        Health::new(30),
        Transform::from_xyz(-8.0, -3.0, 0.0),
        MovementCommand::Idle,
        MoveSpeed::default(),
        AIState::default(),
        AIConfig::default(),
        AICapabilities::wanderer(),
        ChaseCooldown::default(),
    ));

    // Ghast: дальнобойный, стреляет из Attack state
    world.spawn((
        Enemy,
        Health::new(50),
        Transform::from_xyz(5.0, -6.0, 0.0),
        MovementCommand::Idle,
        MoveSpeed::default(),
        AIState::default(),
        AIConfig::default(),
        AICapabilities::gunner(),
        ChaseCooldown::default(),
        WeaponStats::ghast_bolt(),
    ));

    // Ловушка на пути патрульного
    world.spawn((Trap::default(), Transform::from_xyz(10.0, 4.0, 0.0)));

    // Патроны рядом с игроком
    world.spawn((AmmoPickup::default(), Transform::from_xyz(1.5, 0.0, 0.0)));
}
