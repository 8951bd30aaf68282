//! Weapon stats + fire intent pipeline
//!
//! ECS владеет cooldown state и strategic decision «стрелять»;
//! спавн projectile — единственная точка (process_fire_intents),
//! ей пользуются и AI, и player weapon.

use bevy::prelude::*;

use crate::ai::AIState;
use crate::combat::projectile::{spawn_projectile, DamageMask};
use crate::components::{Enemy, Player};
use crate::logger;

/// Нижний порог fire rate (защита от деления на ноль)
pub const MIN_FIRE_RATE: f32 = 0.01;

/// Ranged weapon врага
///
/// Cooldown-гейт: интервал между выстрелами = 1 / fire_rate.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct WeaponStats {
    /// Урон одного projectile
    pub damage: u32,
    /// Выстрелов в секунду
    pub fire_rate: f32,
    /// Текущий cooldown timer (уменьшается до 0, не уходит в минус)
    pub cooldown_timer: f32,
    /// Скорость projectile (м/с)
    pub projectile_speed: f32,
    /// Время жизни projectile (секунды)
    pub projectile_lifetime: f32,
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self::ghast_bolt()
    }
}

impl WeaponStats {
    /// Ranged-атака ghast (дальнобойный призрак)
    pub fn ghast_bolt() -> Self {
        Self {
            damage: 10,
            fire_rate: 1.5,
            cooldown_timer: 0.0,
            projectile_speed: 12.0,
            projectile_lifetime: 5.0,
        }
    }

    /// Может ли стрелять (cooldown == 0)
    pub fn can_fire(&self) -> bool {
        self.cooldown_timer <= 0.0
    }

    /// Интервал между выстрелами с floor по fire rate
    pub fn fire_interval(&self) -> f32 {
        1.0 / self.fire_rate.max(MIN_FIRE_RATE)
    }

    /// Начать cooldown после выстрела
    pub fn start_cooldown(&mut self) {
        self.cooldown_timer = self.fire_interval();
    }
}

/// Event: актёр хочет выстрелить (strategic intent)
///
/// Обрабатывается единым спавнером process_fire_intents.
#[derive(Event, Debug, Clone)]
pub struct WeaponFireIntent {
    /// Кто стреляет (исключается из коллизий своего projectile)
    pub shooter: Entity,
    /// Точка вылета
    pub origin: Vec2,
    /// Направление (ненулевое; нормализуется при спавне)
    pub direction: Vec2,
    /// Урон пули
    pub damage: u32,
    /// Скорость пули (м/с)
    pub speed: f32,
    /// Время жизни пули (секунды)
    pub lifetime: f32,
    /// Кого пуля может ранить
    pub mask: DamageMask,
}

/// System: обновление weapon cooldowns
///
/// Инвариант: cooldown только убывает и не уходит в минус.
pub fn update_weapon_cooldowns(mut weapons: Query<&mut WeaponStats>, time: Res<Time>) {
    for mut weapon in weapons.iter_mut() {
        if weapon.cooldown_timer > 0.0 {
            weapon.cooldown_timer = (weapon.cooldown_timer - time.delta_secs()).max(0.0);
        }
    }
}

/// System: AI стрельба из Attack state
///
/// Целимся в актуальную позицию игрока; cooldown сбрасывается сразу,
/// даже если спавн пропустят guard-проверки (не спамим intents).
pub fn ai_weapon_fire_intent(
    mut agents: Query<(Entity, &AIState, &Transform, &mut WeaponStats), With<Enemy>>,
    player: Query<&Transform, With<Player>>,
    mut intents: EventWriter<WeaponFireIntent>,
) {
    let Ok(player_tf) = player.single() else {
        return; // Цели нет — тихо пропускаем tick
    };
    let target_pos = player_tf.translation.truncate();

    for (entity, state, transform, mut weapon) in agents.iter_mut() {
        // Стреляем только в Attack state
        let AIState::Attack { .. } = state else {
            continue;
        };

        if !weapon.can_fire() {
            continue;
        }

        let origin = transform.translation.truncate();
        let direction = target_pos - origin;

        intents.write(WeaponFireIntent {
            shooter: entity,
            origin,
            direction,
            damage: weapon.damage,
            speed: weapon.projectile_speed,
            lifetime: weapon.projectile_lifetime,
            mask: DamageMask {
                hits_player: true,
                hits_enemies: false,
            },
        });
        weapon.start_cooldown();

        logger::log(&format!("Combat: {:?} fires at player", entity));
    }
}

/// System: единый спавнер projectiles
///
/// Вырожденное направление — intent пропускается с warning,
/// симуляция продолжает тикать.
pub fn process_fire_intents(
    mut commands: Commands,
    mut intents: EventReader<WeaponFireIntent>,
) {
    for intent in intents.read() {
        if spawn_projectile(
            &mut commands,
            intent.shooter,
            intent.origin,
            intent.direction,
            intent.speed,
            intent.damage,
            intent.lifetime,
            intent.mask,
        )
        .is_none()
        {
            logger::log_warning(&format!(
                "Combat: degenerate fire direction from {:?}, intent dropped",
                intent.shooter
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_cooldown_cycle() {
        let mut weapon = WeaponStats::ghast_bolt();
        assert!(weapon.can_fire());

        weapon.start_cooldown();
        assert!(!weapon.can_fire());
        assert!((weapon.cooldown_timer - 1.0 / 1.5).abs() < 1e-6);

        // Simulate ticks
        weapon.cooldown_timer -= 0.3;
        assert!(!weapon.can_fire());

        weapon.cooldown_timer -= 0.5;
        assert!(weapon.can_fire());
    }

    #[test]
    fn test_fire_rate_floor() {
        let mut weapon = WeaponStats {
            fire_rate: 0.0,
            ..WeaponStats::ghast_bolt()
        };

        // Нулевой fire rate не делит на ноль, а клампится
        let interval = weapon.fire_interval();
        assert!(interval.is_finite());
        assert!((interval - 1.0 / MIN_FIRE_RATE).abs() < 1e-3);

        weapon.fire_rate = -3.0;
        assert!(weapon.fire_interval() > 0.0);
    }
}
