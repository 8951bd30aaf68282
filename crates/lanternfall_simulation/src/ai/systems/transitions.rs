//! FSM transitions: приоритетная оценка состояния каждый tick
//!
//! Приоритеты (первый сработавший побеждает):
//! 1. HP == 0 → Dying (терминальное)
//! 2. Сработавшая ловушка → Trapped на duration ловушки
//! 3. Активный Trapped → countdown, по истечении → Patrol
//! 4. Боевая постура по (distance, LOS, chase-cooldown) — select_posture

use bevy::prelude::*;

use crate::ai::{posture_of, select_posture, AICapabilities, AIConfig, AIState, ChaseCooldown, Posture};
use crate::combat::ContactOverlap;
use crate::components::{Enemy, Health, Player};
use crate::hazards::TrapSprung;
use crate::logger;
use crate::world::LosOracle;

pub fn ai_fsm_transitions(
    mut agents: Query<
        (
            Entity,
            &mut AIState,
            &AIConfig,
            &AICapabilities,
            &Health,
            &Transform,
            &mut ChaseCooldown,
        ),
        (With<Enemy>, Without<Player>),
    >,
    player: Query<(Entity, &Transform), With<Player>>,
    los: Res<LosOracle>,
    mut trap_events: EventReader<TrapSprung>,
    mut contact_events: EventWriter<ContactOverlap>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    // Жертвы ловушек этого tick
    let sprung: Vec<(Entity, f32)> = trap_events
        .read()
        .map(|ev| (ev.victim, ev.duration))
        .collect();

    // Target locator: позиция игрока (отсутствие цели — не ошибка,
    // агенты просто патрулируют)
    let target = player
        .single()
        .ok()
        .map(|(entity, tf)| (entity, tf.translation.truncate()));

    for (entity, mut state, config, caps, health, transform, mut cooldown) in agents.iter_mut() {
        if cooldown.remaining > 0.0 {
            cooldown.remaining = (cooldown.remaining - delta).max(0.0);
        }

        // Приоритет 1: смерть
        if !health.is_alive() {
            if !matches!(*state, AIState::Dying) {
                logger::log(&format!("AI: {:?} → Dying", entity));
                *state = AIState::Dying;
            }
            continue;
        }
        if matches!(*state, AIState::Dying) {
            continue;
        }

        // Приоритет 2: сработавшая ловушка
        if let Some(&(_, duration)) = sprung.iter().find(|(victim, _)| *victim == entity) {
            logger::log(&format!("AI: {:?} → Trapped ({}s)", entity, duration));
            *state = AIState::Trapped { remaining: duration };
            continue;
        }

        // Приоритет 3: удержание в ловушке
        if let AIState::Trapped { remaining } = *state {
            let left = remaining - delta;
            if left <= 0.0 {
                logger::log(&format!("AI: {:?} Trapped → Patrol", entity));
                *state = AIState::Patrol { waypoint: None };
            } else {
                *state = AIState::Trapped { remaining: left };
            }
            continue;
        }

        // Приоритет 4: боевая постура
        let Some((player_entity, target_pos)) = target else {
            if !matches!(*state, AIState::Patrol { .. }) {
                *state = AIState::Patrol { waypoint: None };
            }
            continue;
        };

        let pos = transform.translation.truncate();
        let distance = pos.distance(target_pos);
        let in_sight = los.clear(pos, target_pos);

        // Контакт с игроком в Chase/Attack: урон + re-engagement cooldown,
        // принудительный возврат в Patrol (поведение ChasingGhost)
        if matches!(*state, AIState::Chase { .. } | AIState::Attack { .. })
            && distance <= config.contact_range
        {
            contact_events.write(ContactOverlap {
                attacker: entity,
                target: player_entity,
                damage: config.contact_damage,
            });
            cooldown.remaining = config.chase_cooldown;
            logger::log(&format!(
                "AI: {:?} contact with player, backing off ({}s cooldown)",
                entity, config.chase_cooldown
            ));
            *state = AIState::Patrol { waypoint: None };
            continue;
        }

        let next = select_posture(
            posture_of(&state),
            distance,
            in_sight,
            cooldown.remaining > 0.0,
            config,
            caps,
        );

        let new_state = match next {
            Posture::Patrol => match *state {
                AIState::Patrol { .. } => continue, // уже патрулируем, wander-точку не сбрасываем
                _ => AIState::Patrol { waypoint: None },
            },
            Posture::Chase => match *state {
                AIState::Chase { .. } => continue,
                // Attack → Chase: кэш re-path сохраняем
                AIState::Attack {
                    last_known,
                    repath_timer,
                } => AIState::Chase {
                    last_known,
                    repath_timer,
                },
                _ => AIState::Chase {
                    last_known: target_pos,
                    repath_timer: config.repath_interval,
                },
            },
            Posture::Attack => match *state {
                AIState::Attack { .. } => continue,
                AIState::Chase {
                    last_known,
                    repath_timer,
                } => AIState::Attack {
                    last_known,
                    repath_timer,
                },
                _ => AIState::Attack {
                    last_known: target_pos,
                    repath_timer: config.repath_interval,
                },
            },
        };

        logger::log(&format!(
            "AI: {:?} {:?} → {:?} (dist {:.2}, los {})",
            entity,
            posture_of(&state),
            next,
            distance,
            in_sight
        ));
        *state = new_state;
    }
}
