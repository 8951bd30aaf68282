//! Kinematic интеграция движения
//!
//! Физического движка нет (non-goal): MovementCommand → Transform напрямую,
//! с точной остановкой на цели и ограниченной скоростью разворота facing.

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::{MoveSpeed, MovementCommand, MovementInput, Player};
use crate::SimulationSet;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (apply_player_input, integrate_movement_commands)
                .chain()
                .in_set(SimulationSet::Movement),
        );
    }
}

/// Система: движение игрока от MovementInput
///
/// Headless-тесты пишут direction напрямую; хост — из устройств ввода.
pub fn apply_player_input(
    mut query: Query<(&mut Transform, &MovementInput, &MoveSpeed), (With<Player>, Without<Dead>)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut transform, input, speed) in query.iter_mut() {
        let direction = input.direction.normalize_or_zero();
        if direction == Vec2::ZERO {
            continue;
        }
        transform.translation.x += direction.x * speed.linear * delta;
        transform.translation.y += direction.y * speed.linear * delta;
    }
}

/// Система: исполнение MovementCommand
///
/// MoveTo двигает к цели без перелёта (шаг ≤ остаток пути) и разворачивает
/// facing вокруг Z с угловой скоростью MoveSpeed::angular.
pub fn integrate_movement_commands(
    mut query: Query<(&mut Transform, &MovementCommand, &MoveSpeed)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut transform, command, speed) in query.iter_mut() {
        let MovementCommand::MoveTo {
            target,
            speed: linear,
            face,
        } = *command
        else {
            continue;
        };

        let pos = transform.translation.truncate();
        let to_target = target - pos;
        let dist = to_target.length();

        if dist > f32::EPSILON {
            let step = (linear * delta).min(dist);
            let dir = to_target / dist;
            transform.translation.x += dir.x * step;
            transform.translation.y += dir.y * step;
        }

        // Facing: на face-точку (Chase/Attack смотрят на игрока),
        // иначе по направлению движения
        let face_dir = match face {
            Some(point) => point - pos,
            None => to_target,
        };
        if face_dir.length_squared() > 1e-6 {
            let current = transform.rotation.to_euler(EulerRot::ZYX).0;
            let target_angle = face_dir.y.atan2(face_dir.x);
            let max_step = speed.angular.to_radians() * delta;
            let new_angle = rotate_towards(current, target_angle, max_step);
            transform.rotation = Quat::from_rotation_z(new_angle);
        }
    }
}

/// Поворот угла к цели по кратчайшей дуге, не быстрее max_delta (радианы)
pub fn rotate_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    use std::f32::consts::{PI, TAU};

    let mut diff = (target - current) % TAU;
    if diff > PI {
        diff -= TAU;
    } else if diff < -PI {
        diff += TAU;
    }

    if diff.abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_rotate_towards_reaches_target() {
        let angle = rotate_towards(0.0, 0.5, 1.0);
        assert_eq!(angle, 0.5);
    }

    #[test]
    fn test_rotate_towards_is_rate_limited() {
        let angle = rotate_towards(0.0, 2.0, 0.25);
        assert!((angle - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_towards_takes_shortest_arc() {
        // Из +170° в -170°: короткая дуга через 180°, не через 0
        let current = 170.0_f32.to_radians();
        let target = -170.0_f32.to_radians();
        let angle = rotate_towards(current, target, 0.1);
        assert!(angle > current, "должны идти вверх через PI");

        // Полный поворот кратчайшей дугой — 20°, не 340°
        let angle = rotate_towards(current, target, PI);
        assert!((angle - target).abs() < 1e-6);
    }
}
