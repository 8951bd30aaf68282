//! Pickups: патроны на полу
//!
//! Подбор — radius overlap с игроком; патроны уходят в reserve оружия
//! (магазин не трогаем, перезарядка остаётся на игроке).

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::Player;
use crate::logger;
use crate::player::PlayerWeapon;
use crate::SimulationSet;

/// Лежащая на полу пачка патронов
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AmmoPickup {
    /// Сколько патронов даёт
    pub amount: u32,
    /// Радиус подбора
    pub radius: f32,
}

impl Default for AmmoPickup {
    fn default() -> Self {
        Self {
            amount: 12,
            radius: 0.8,
        }
    }
}

/// Event: игрок подобрал патроны
#[derive(Event, Debug, Clone)]
pub struct AmmoCollected {
    pub pickup: Entity,
    pub player: Entity,
    pub amount: u32,
}

/// System: подбор патронов игроком
pub fn collect_ammo_pickups(
    mut commands: Commands,
    pickups: Query<(Entity, &Transform, &AmmoPickup)>,
    mut players: Query<(Entity, &Transform, &mut PlayerWeapon), (With<Player>, Without<Dead>)>,
    mut collected: EventWriter<AmmoCollected>,
) {
    for (pickup_entity, pickup_tf, pickup) in pickups.iter() {
        let pickup_pos = pickup_tf.translation.truncate();

        for (player_entity, player_tf, mut weapon) in players.iter_mut() {
            if player_tf.translation.truncate().distance(pickup_pos) > pickup.radius {
                continue;
            }

            weapon.add_ammo(pickup.amount);
            collected.write(AmmoCollected {
                pickup: pickup_entity,
                player: player_entity,
                amount: pickup.amount,
            });
            commands.entity(pickup_entity).despawn();

            logger::log(&format!(
                "Pickups: player grabbed {} rounds (reserve: {})",
                pickup.amount, weapon.reserve
            ));
            break;
        }
    }
}

pub struct PickupsPlugin;

impl Plugin for PickupsPlugin {
    fn build(&self, app: &mut App) {
        // После ловушек: фиксированный порядок применения Commands
        app.add_event::<AmmoCollected>().add_systems(
            FixedUpdate,
            collect_ammo_pickups
                .in_set(SimulationSet::Hazards)
                .after(crate::hazards::trigger_traps),
        );
    }
}
