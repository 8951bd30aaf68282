//! Projectiles: прямолинейный полёт, lifetime, radius-overlap коллизии
//!
//! Владение: после спавна projectile живёт сам — стрелявший на него
//! не влияет, но исключён из его коллизий (owner exclusion).

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::{Enemy, Player};

/// Радиус попадания projectile + актора (простая окружность вместо физики)
pub const HIT_RADIUS: f32 = 0.75;

/// Кого projectile может ранить (faction-флаги)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct DamageMask {
    pub hits_player: bool,
    pub hits_enemies: bool,
}

/// Projectile component
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    /// Стреляющий (никогда не ранит сам себя)
    pub owner: Entity,
    /// Скорость полёта (направление × м/с)
    pub velocity: Vec2,
    pub damage: u32,
    /// Оставшееся время жизни (секунды)
    pub lifetime: f32,
    pub mask: DamageMask,
}

/// Event: projectile попал в цель
#[derive(Event, Debug, Clone)]
pub struct ProjectileHit {
    /// Кто выстрелил (для предотвращения self-hit)
    pub shooter: Entity,
    /// В кого попали
    pub target: Entity,
    /// Урон
    pub damage: u32,
}

/// Единая точка спавна projectile (projectile spawner contract)
///
/// None при вырожденном направлении — вызывающий решает, логировать ли.
#[allow(clippy::too_many_arguments)]
pub fn spawn_projectile(
    commands: &mut Commands,
    owner: Entity,
    origin: Vec2,
    direction: Vec2,
    speed: f32,
    damage: u32,
    lifetime: f32,
    mask: DamageMask,
) -> Option<Entity> {
    let direction = direction.try_normalize()?;
    let angle = direction.y.atan2(direction.x);

    let entity = commands
        .spawn((
            Transform::from_translation(origin.extend(0.0))
                .with_rotation(Quat::from_rotation_z(angle)),
            Projectile {
                owner,
                velocity: direction * speed,
                damage,
                lifetime,
                mask,
            },
        ))
        .id();

    Some(entity)
}

/// System: прямолинейное движение projectiles
pub fn projectile_movement(mut query: Query<(&mut Transform, &Projectile)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (mut transform, projectile) in query.iter_mut() {
        transform.translation.x += projectile.velocity.x * delta;
        transform.translation.y += projectile.velocity.y * delta;
    }
}

/// System: lifetime countdown, по истечении — despawn
pub fn projectile_lifetime(
    mut commands: Commands,
    mut query: Query<(Entity, &mut Projectile)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, mut projectile) in query.iter_mut() {
        projectile.lifetime -= delta;
        if projectile.lifetime <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// System: radius-overlap коллизии
///
/// First-match-wins: проверка урона игроку идёт раньше проверки врагов
/// (однопоточный tick делает это race-free). Первое попадание уничтожает
/// projectile; owner исключён из обеих проверок.
pub fn projectile_collision(
    mut commands: Commands,
    projectiles: Query<(Entity, &Transform, &Projectile)>,
    players: Query<(Entity, &Transform), (With<Player>, Without<Dead>)>,
    enemies: Query<(Entity, &Transform), (With<Enemy>, Without<Dead>)>,
    mut hits: EventWriter<ProjectileHit>,
) {
    for (proj_entity, proj_tf, projectile) in projectiles.iter() {
        let pos = proj_tf.translation.truncate();
        let mut target = None;

        if projectile.mask.hits_player {
            for (entity, tf) in players.iter() {
                if entity == projectile.owner {
                    continue;
                }
                if tf.translation.truncate().distance(pos) <= HIT_RADIUS {
                    target = Some(entity);
                    break;
                }
            }
        }

        if target.is_none() && projectile.mask.hits_enemies {
            for (entity, tf) in enemies.iter() {
                if entity == projectile.owner {
                    continue;
                }
                if tf.translation.truncate().distance(pos) <= HIT_RADIUS {
                    target = Some(entity);
                    break;
                }
            }
        }

        if let Some(target) = target {
            hits.write(ProjectileHit {
                shooter: projectile.owner,
                target,
                damage: projectile.damage,
            });
            commands.entity(proj_entity).despawn();
        }
    }
}
