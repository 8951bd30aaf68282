//! Combat module: стрельба, projectiles, урон, смерть
//!
//! Пайплайн событий за один tick:
//! intent (AI/player) → WeaponFireIntent → spawn Projectile →
//! ProjectileHit / ContactOverlap → DamageDealt (+ EntityDied) → Dead.

use bevy::prelude::*;

pub mod damage;
pub mod projectile;
pub mod weapon;

// Re-export основных типов
pub use damage::{
    apply_contact_damage, apply_projectile_damage, ContactOverlap, DamageDealt, Dead,
    DespawnAfter, EntityDied,
};
pub use projectile::{DamageMask, Projectile, ProjectileHit};
pub use weapon::{WeaponFireIntent, WeaponStats, MIN_FIRE_RATE};

use crate::SimulationSet;

/// Combat Plugin
///
/// Порядок выполнения (chain внутри фазы Combat):
/// 1. ai_weapon_fire_intent — стрельба из Attack state
/// 2. process_fire_intents — спавн projectiles (единая точка спавна)
/// 3. projectile движение / lifetime / collision
/// 4. применение урона (projectile, contact)
/// 5. handle_death — маркировка трупов
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<WeaponFireIntent>()
            .add_event::<ProjectileHit>()
            .add_event::<ContactOverlap>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            weapon::update_weapon_cooldowns.in_set(SimulationSet::Cooldowns),
        );

        app.add_systems(
            FixedUpdate,
            (
                weapon::ai_weapon_fire_intent,
                weapon::process_fire_intents,
                projectile::projectile_movement,
                projectile::projectile_lifetime,
                projectile::projectile_collision,
                damage::apply_projectile_damage,
                damage::apply_contact_damage,
                damage::handle_death,
            )
                .chain()
                .in_set(SimulationSet::Combat),
        );

        app.add_systems(
            FixedUpdate,
            damage::despawn_after_timeout.in_set(SimulationSet::Cleanup),
        );
    }
}
