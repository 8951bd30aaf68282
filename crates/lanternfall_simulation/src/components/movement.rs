//! Movement компоненты: скорость, input, команды перемещения

use bevy::prelude::*;

/// Команда движения для актора (выполняется интегратором в MovementPlugin)
///
/// Архитектура:
/// - AI система пишет MovementCommand (high-level intent из AIState)
/// - integrate_movement_commands читает и двигает Transform
///
/// Top-down плоскость: X/Y, поворот вокруг Z.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum MovementCommand {
    /// Стоять на месте
    Idle,
    /// Двигаться к точке (world coordinates)
    ///
    /// `face` — точка, на которую разворачиваем facing (Chase/Attack смотрят
    /// на игрока, а не по направлению движения). None ⇒ смотрим по движению.
    MoveTo {
        target: Vec2,
        speed: f32,
        face: Option<Vec2>,
    },
}

impl Default for MovementCommand {
    fn default() -> Self {
        Self::Idle
    }
}

/// Скорость актора
///
/// linear — м/с, angular — град/с (разворот facing).
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct MoveSpeed {
    pub linear: f32,
    pub angular: f32,
}

impl Default for MoveSpeed {
    fn default() -> Self {
        Self {
            linear: 2.5,    // базовая скорость врага
            angular: 720.0, // deg/sec к цели
        }
    }
}

/// Входные данные для движения игрока
///
/// Для headless тестов — mock input через этот компонент.
/// Хост-движок заполняет из устройств ввода.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    /// Направление движения (ненормализованное допустимо)
    pub direction: Vec2,
}
