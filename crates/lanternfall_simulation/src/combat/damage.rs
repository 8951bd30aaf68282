//! Damage pipeline: применение урона, события смерти, уборка трупов

use bevy::prelude::*;

use crate::combat::projectile::ProjectileHit;
use crate::components::{Enemy, Health};
use crate::logger;

/// Сколько труп врага лежит до despawn (секунды)
pub const CORPSE_DESPAWN_SECS: f32 = 2.0;

/// Event: контактный урон (призрак коснулся игрока)
#[derive(Event, Debug, Clone)]
pub struct ContactOverlap {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
}

/// Event: урон нанесён
///
/// Используется хостом для UI/звуков/эффектов.
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Event: entity умер (health == 0); сигналится ровно один раз
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв
///
/// Мёртвые исключаются из коллизий и движения; визуальные эффекты — хост.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// Отложенный despawn (трупы врагов, использованные ловушки)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct DespawnAfter {
    pub remaining: f32,
}

/// System: применение ProjectileHit событий
pub fn apply_projectile_damage(
    mut hit_events: EventReader<ProjectileHit>,
    mut targets: Query<&mut Health>,
    mut damage_events: EventWriter<DamageDealt>,
    mut death_events: EventWriter<EntityDied>,
) {
    for hit in hit_events.read() {
        // Self-hit guard (owner exclusion должен отсечь раньше)
        if hit.shooter == hit.target {
            logger::log_warning(&format!(
                "Combat: self-hit dropped, entity {:?}",
                hit.shooter
            ));
            continue;
        }

        deal_damage(
            hit.shooter,
            hit.target,
            hit.damage,
            &mut targets,
            &mut damage_events,
            &mut death_events,
        );
    }
}

/// System: применение контактного урона (Chase-контакт)
pub fn apply_contact_damage(
    mut contact_events: EventReader<ContactOverlap>,
    mut targets: Query<&mut Health>,
    mut damage_events: EventWriter<DamageDealt>,
    mut death_events: EventWriter<EntityDied>,
) {
    for contact in contact_events.read() {
        deal_damage(
            contact.attacker,
            contact.target,
            contact.damage,
            &mut targets,
            &mut damage_events,
            &mut death_events,
        );
    }
}

/// Общий путь применения урона: clamp на нуле, смерть сигналится один раз
fn deal_damage(
    attacker: Entity,
    target: Entity,
    damage: u32,
    targets: &mut Query<&mut Health>,
    damage_events: &mut EventWriter<DamageDealt>,
    death_events: &mut EventWriter<EntityDied>,
) {
    let Ok(mut health) = targets.get_mut(target) else {
        // Цель уже despawned или без Health — молча пропускаем
        return;
    };

    let was_alive = health.is_alive();
    health.take_damage(damage);
    let died = was_alive && !health.is_alive();

    damage_events.write(DamageDealt {
        attacker,
        target,
        damage,
        target_died: died,
    });

    if died {
        death_events.write(EntityDied {
            entity: target,
            killer: Some(attacker),
        });
        logger::log_info(&format!("Combat: {:?} killed by {:?}", target, attacker));
    } else {
        logger::log(&format!(
            "Combat: {:?} hit {:?} for {} (HP: {})",
            attacker, target, damage, health.current
        ));
    }
}

/// System: обработка смерти
///
/// Вешает Dead, останавливает движение; трупы врагов уходят в
/// отложенный despawn. AIState сам перейдёт в Dying (transitions
/// видит HP == 0 на следующем tick).
pub fn handle_death(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    mut movement: Query<&mut crate::components::MovementCommand>,
    enemies: Query<(), With<Enemy>>,
) {
    for event in death_events.read() {
        if let Ok(mut command) = movement.get_mut(event.entity) {
            *command = crate::components::MovementCommand::Idle;
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
            if enemies.get(event.entity).is_ok() {
                entity_commands.insert(DespawnAfter {
                    remaining: CORPSE_DESPAWN_SECS,
                });
            }
        }
    }
}

/// System: отложенный despawn
pub fn despawn_after_timeout(
    mut commands: Commands,
    mut query: Query<(Entity, &mut DespawnAfter)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, mut despawn) in query.iter_mut() {
        despawn.remaining -= delta;
        if despawn.remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
