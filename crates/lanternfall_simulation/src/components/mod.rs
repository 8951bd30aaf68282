//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: живые существа (Enemy marker, Health)
//! - movement: скорость, input, команды перемещения
//! - player: player control marker

pub mod actor;
pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use player::*;
