//! AI decision-making module
//!
//! Один параметризованный FSM вместо нескольких copy-paste вариантов:
//! capability-флаги (chase, ranged_attack) включают/выключают боевые
//! состояния, patrol работает у всех.

use bevy::prelude::*;

pub mod fsm;
pub mod systems;

// Re-export основных типов
pub use fsm::{posture_of, select_posture, AICapabilities, AIConfig, AIState, ChaseCooldown, Posture};

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate (фаза SimulationSet::Ai).
/// Порядок выполнения:
/// 1. ai_fsm_transitions — обновление FSM state
/// 2. ai_movement_from_state — конвертация state → MovementCommand
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                systems::transitions::ai_fsm_transitions,
                systems::movement::ai_movement_from_state,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Ai),
        );
    }
}
