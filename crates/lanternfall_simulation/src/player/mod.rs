//! Player-подсистемы: оружие с магазином и перезарядкой

use bevy::prelude::*;

pub mod weapon;

pub use weapon::{FireOutcome, PlayerWeapon};

use crate::SimulationSet;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // Intents игрока кладём в очередь до AI (фиксированный порядок —
        // иначе порядок спавна projectiles плавает между прогонами)
        app.add_systems(
            FixedUpdate,
            weapon::player_weapon_system
                .in_set(SimulationSet::Combat)
                .before(crate::combat::weapon::ai_weapon_fire_intent),
        );
    }
}
