//! Hazards: одноразовые ловушки, обездвиживающие врагов
//!
//! Ловушка — area trigger: первый живой враг в радиусе срабатывает её,
//! получает hold (AIState::Trapped), ловушка расходуется и despawn-ится.

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::Enemy;
use crate::logger;
use crate::SimulationSet;

/// Ловушка (одноразовая)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Trap {
    /// Радиус срабатывания
    pub radius: f32,
    /// Сколько секунд держит пойманного
    pub hold_duration: f32,
    /// false после срабатывания (despawn в том же tick, но guard нужен:
    /// два врага в радиусе не должны спружинить одну ловушку дважды)
    pub armed: bool,
}

impl Default for Trap {
    fn default() -> Self {
        Self {
            radius: 0.8,
            hold_duration: 3.0,
            armed: true,
        }
    }
}

/// Event: ловушка сработала на враге
#[derive(Event, Debug, Clone)]
pub struct TrapSprung {
    pub trap: Entity,
    pub victim: Entity,
    pub duration: f32,
}

/// System: проверка срабатывания ловушек
///
/// Один tick — одна жертва на ловушку (первый подходящий враг).
pub fn trigger_traps(
    mut commands: Commands,
    mut traps: Query<(Entity, &Transform, &mut Trap)>,
    enemies: Query<(Entity, &Transform), (With<Enemy>, Without<Dead>)>,
    mut sprung: EventWriter<TrapSprung>,
) {
    for (trap_entity, trap_tf, mut trap) in traps.iter_mut() {
        if !trap.armed {
            continue;
        }
        let trap_pos = trap_tf.translation.truncate();

        for (enemy, enemy_tf) in enemies.iter() {
            if enemy_tf.translation.truncate().distance(trap_pos) > trap.radius {
                continue;
            }

            trap.armed = false;
            sprung.write(TrapSprung {
                trap: trap_entity,
                victim: enemy,
                duration: trap.hold_duration,
            });
            commands.entity(trap_entity).despawn();

            logger::log_info(&format!(
                "Hazards: trap {:?} sprung on {:?} ({}s hold)",
                trap_entity, enemy, trap.hold_duration
            ));
            break;
        }
    }
}

pub struct HazardsPlugin;

impl Plugin for HazardsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TrapSprung>().add_systems(
            FixedUpdate,
            trigger_traps.in_set(SimulationSet::Hazards),
        );
    }
}
