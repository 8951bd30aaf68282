//! Lanternfall Simulation Core
//!
//! Headless ECS-симуляция top-down shooter прототипа (Bevy 0.16).
//! Хост-движок (rendering, физика, input devices) отсутствует: весь gameplay
//! выражен как explicit tick на FixedUpdate 60Hz.
//!
//! Архитектура:
//! - ECS = game state (AI FSM, combat rules, таймеры)
//! - Внешние collaborators (line-of-sight, reachability) — trait objects
//!   в ресурсах, инжектятся при создании App

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod hazards;
pub mod logger;
pub mod movement;
pub mod pickups;
pub mod player;
pub mod world;

// Re-export базовых типов для удобства
pub use ai::{AICapabilities, AIConfig, AIPlugin, AIState, ChaseCooldown};
pub use combat::{
    CombatPlugin, DamageDealt, DamageMask, Dead, DespawnAfter, EntityDied, Projectile,
    ProjectileHit, WeaponFireIntent, WeaponStats,
};
pub use components::*;
pub use hazards::{HazardsPlugin, Trap, TrapSprung};
pub use movement::MovementPlugin;
pub use pickups::{AmmoCollected, AmmoPickup, PickupsPlugin};
pub use player::{PlayerPlugin, PlayerWeapon};
pub use world::{LosOracle, NavOracle, PatrolRoute};

/// Фазы одного simulation tick
///
/// Все системы работают в FixedUpdate; порядок фаз фиксирован через
/// configure_sets, внутри фазы — chain() в соответствующем plugin.
/// Это даёт детерминированный порядок исполнения между прогонами.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Cooldown таймеры (weapon, chase re-engagement)
    Cooldowns,
    /// Ловушки (trap trigger → TrapSprung)
    Hazards,
    /// AI FSM transitions + movement decisions
    Ai,
    /// Интеграция движения (MovementCommand → Transform)
    Movement,
    /// Стрельба, projectiles, урон, смерть
    Combat,
    /// Despawn отработавших entities
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick
        app.insert_resource(Time::<Fixed>::from_hz(60.0));

        // Детерминистичный RNG (не перетираем seed, если хост уже вставил свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        // Default collaborators: открытое поле (LOS всегда чист, всё достижимо).
        // Хост/тесты подменяют своими реализациями.
        if !app.world().contains_resource::<LosOracle>() {
            app.insert_resource(LosOracle::open_field());
        }
        if !app.world().contains_resource::<NavOracle>() {
            app.insert_resource(NavOracle::open());
        }

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Cooldowns,
                SimulationSet::Hazards,
                SimulationSet::Ai,
                SimulationSet::Movement,
                SimulationSet::Combat,
                SimulationSet::Cleanup,
            )
                .chain(),
        );

        // Подсистемы
        app.add_plugins((
            CombatPlugin,
            AIPlugin,
            MovementPlugin,
            PlayerPlugin,
            HazardsPlugin,
            PickupsPlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Единственный источник случайности в симуляции (wander sampling).
/// Одинаковый seed ⇒ идентичные прогоны.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Сериализует компоненты через Debug, сортируя по Entity ID.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
