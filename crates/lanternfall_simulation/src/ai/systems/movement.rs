//! AI movement decisions: AIState → MovementCommand
//!
//! Сами Transform двигает MovementPlugin; здесь только intent.

use bevy::prelude::*;

use crate::ai::{AIConfig, AIState};
use crate::components::{Enemy, MoveSpeed, MovementCommand, Player};
use crate::world::{nav::sample_wander_point, NavOracle, PatrolRoute};
use crate::DeterministicRng;

pub fn ai_movement_from_state(
    mut agents: Query<
        (
            &mut AIState,
            &AIConfig,
            &Transform,
            &MoveSpeed,
            &mut MovementCommand,
            Option<&mut PatrolRoute>,
        ),
        (With<Enemy>, Without<Player>),
    >,
    player: Query<&Transform, (With<Player>, Without<Enemy>)>,
    nav: Res<NavOracle>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();
    let player_pos = player.single().ok().map(|tf| tf.translation.truncate());

    for (mut state, config, transform, speed, mut command, route) in agents.iter_mut() {
        let pos = transform.translation.truncate();

        match state.as_mut() {
            // Движение подавлено: команды за время удержания — no-op
            AIState::Trapped { .. } | AIState::Dying => {
                if !matches!(*command, MovementCommand::Idle) {
                    *command = MovementCommand::Idle;
                }
            }

            AIState::Patrol { waypoint } => {
                // Waypoint-маршрут приоритетнее wander
                let mut routed = false;
                if let Some(mut route) = route {
                    if let Some(current) = route.current() {
                        let target = if pos.distance(current) <= config.stopping_distance {
                            // Достигли — следующий waypoint с wrap-around
                            route.advance();
                            route.current().unwrap_or(current)
                        } else {
                            current
                        };
                        *command = MovementCommand::MoveTo {
                            target,
                            speed: speed.linear,
                            face: None,
                        };
                        routed = true;
                    }
                }

                if !routed {
                    // Wander: точка в радиусе, bounded retry; неудача —
                    // стоим до следующего tick
                    let reached = waypoint
                        .map(|w| pos.distance(w) <= config.stopping_distance)
                        .unwrap_or(true);
                    if reached {
                        *waypoint =
                            sample_wander_point(&mut rng.rng, &nav, pos, config.wander_radius);
                    }
                    *command = match *waypoint {
                        Some(target) => MovementCommand::MoveTo {
                            target,
                            speed: speed.linear,
                            face: None,
                        },
                        None => MovementCommand::Idle,
                    };
                }
            }

            AIState::Chase {
                last_known,
                repath_timer,
            }
            | AIState::Attack {
                last_known,
                repath_timer,
            } => {
                // Bounded re-path: позицию цели обновляем раз в
                // repath_interval, не каждый tick
                *repath_timer -= delta;
                if *repath_timer <= 0.0 {
                    if let Some(p) = player_pos {
                        *last_known = p;
                    }
                    *repath_timer = config.repath_interval;
                }

                // Facing разворачиваем на актуальную позицию игрока
                *command = MovementCommand::MoveTo {
                    target: *last_known,
                    speed: config.chase_speed,
                    face: player_pos,
                };
            }
        }
    }
}
