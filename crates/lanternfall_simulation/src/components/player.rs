//! Player control marker component

use bevy::prelude::*;

use super::Health;

/// Marker component для player-controlled entity
///
/// AI systems используют игрока как target через query по этому маркеру
/// (target locator). Акторы БЕЗ этого компонента управляются AI.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health)]
pub struct Player;
