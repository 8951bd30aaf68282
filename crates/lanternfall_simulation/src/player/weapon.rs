//! Player weapon: cooldown-гейт + магазин + non-blocking reload
//!
//! Reload — deadline, не suspension: остальная симуляция тикает,
//! выстрелы во время перезарядки отклоняются. Выстрел с пустым
//! магазином сам запускает reload.

use bevy::prelude::*;

use crate::combat::{DamageMask, Dead, WeaponFireIntent, MIN_FIRE_RATE};
use crate::components::Player;
use crate::logger;

/// Оружие игрока
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PlayerWeapon {
    /// Выстрелов в секунду
    pub fire_rate: f32,
    pub damage: u32,
    pub magazine_size: u32,
    /// Патроны в магазине
    pub magazine: u32,
    /// Запас патронов
    pub reserve: u32,
    /// Длительность перезарядки (секунды)
    pub reload_time: f32,
    /// Cooldown до следующего выстрела
    pub shot_cooldown: f32,
    /// Остаток перезарядки (None = не перезаряжаемся)
    pub reload_remaining: Option<f32>,
    /// Курок зажат (host/тесты выставляют напрямую)
    pub trigger_held: bool,
    /// Направление прицела (ноль ⇒ стреляем по facing)
    pub aim: Vec2,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
}

impl Default for PlayerWeapon {
    fn default() -> Self {
        Self::sidearm()
    }
}

/// Результат попытки выстрела
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// Выстрел произведён, патрон списан
    Fired,
    /// Межвыстрельный cooldown ещё не истёк
    OnCooldown,
    /// Идёт перезарядка — выстрел отклонён
    Reloading,
    /// Магазин пуст, запущена перезарядка вместо выстрела
    ReloadStarted,
    /// Пусто и перезаряжаться нечем
    Empty,
}

impl PlayerWeapon {
    /// Стартовый пистолет
    pub fn sidearm() -> Self {
        Self {
            fire_rate: 6.0,
            damage: 15,
            magazine_size: 12,
            magazine: 12,
            reserve: 36,
            reload_time: 1.1,
            shot_cooldown: 0.0,
            reload_remaining: None,
            trigger_held: false,
            aim: Vec2::X,
            projectile_speed: 20.0,
            projectile_lifetime: 5.0,
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_remaining.is_some()
    }

    /// Продвигает таймеры; true если перезарядка завершилась на этом tick
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.shot_cooldown > 0.0 {
            self.shot_cooldown = (self.shot_cooldown - delta).max(0.0);
        }

        let Some(remaining) = self.reload_remaining else {
            return false;
        };
        let left = remaining - delta;
        if left > 0.0 {
            self.reload_remaining = Some(left);
            return false;
        }

        // Перезарядка завершена: переливаем min(needed, reserve)
        let needed = self.magazine_size - self.magazine;
        let loaded = needed.min(self.reserve);
        self.magazine += loaded;
        self.reserve -= loaded;
        self.reload_remaining = None;
        true
    }

    /// Попытка выстрела (см. FireOutcome)
    pub fn try_fire(&mut self) -> FireOutcome {
        if self.is_reloading() {
            return FireOutcome::Reloading;
        }
        if self.shot_cooldown > 0.0 {
            return FireOutcome::OnCooldown;
        }
        if self.magazine == 0 {
            return if self.start_reload() {
                FireOutcome::ReloadStarted
            } else {
                FireOutcome::Empty
            };
        }

        self.magazine -= 1;
        self.shot_cooldown = 1.0 / self.fire_rate.max(MIN_FIRE_RATE);
        FireOutcome::Fired
    }

    /// Запуск перезарядки; false если она не нужна/невозможна
    pub fn start_reload(&mut self) -> bool {
        if self.is_reloading() || self.magazine == self.magazine_size || self.reserve == 0 {
            return false;
        }
        self.reload_remaining = Some(self.reload_time);
        true
    }

    /// Пополнение запаса (ammo pickup)
    pub fn add_ammo(&mut self, amount: u32) {
        self.reserve = self.reserve.saturating_add(amount);
    }
}

/// System: тикает оружие игрока и конвертирует зажатый курок в fire intents
pub fn player_weapon_system(
    mut players: Query<(Entity, &Transform, &mut PlayerWeapon), (With<Player>, Without<Dead>)>,
    mut intents: EventWriter<WeaponFireIntent>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, transform, mut weapon) in players.iter_mut() {
        if weapon.tick(delta) {
            logger::log(&format!(
                "Player: reload complete ({}/{} + {} reserve)",
                weapon.magazine, weapon.magazine_size, weapon.reserve
            ));
        }

        if !weapon.trigger_held {
            continue;
        }
        if weapon.try_fire() != FireOutcome::Fired {
            continue;
        }

        // Прицел, иначе текущий facing (+X повёрнутый на rotation)
        let direction = if weapon.aim.length_squared() > 1e-6 {
            weapon.aim
        } else {
            (transform.rotation * Vec3::X).truncate()
        };

        intents.write(WeaponFireIntent {
            shooter: entity,
            origin: transform.translation.truncate(),
            direction,
            damage: weapon.damage,
            speed: weapon.projectile_speed,
            lifetime: weapon.projectile_lifetime,
            mask: DamageMask {
                hits_player: false,
                hits_enemies: true,
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_consumes_ammo_and_starts_cooldown() {
        let mut weapon = PlayerWeapon::sidearm();
        assert_eq!(weapon.try_fire(), FireOutcome::Fired);
        assert_eq!(weapon.magazine, 11);
        assert!(weapon.shot_cooldown > 0.0);

        assert_eq!(weapon.try_fire(), FireOutcome::OnCooldown);
        assert_eq!(weapon.magazine, 11);

        weapon.tick(1.0 / 6.0);
        assert_eq!(weapon.try_fire(), FireOutcome::Fired);
    }

    #[test]
    fn test_empty_magazine_triggers_reload() {
        let mut weapon = PlayerWeapon {
            magazine: 0,
            reserve: 10,
            reload_time: 1.0,
            ..PlayerWeapon::sidearm()
        };

        assert_eq!(weapon.try_fire(), FireOutcome::ReloadStarted);
        assert!(weapon.is_reloading());
    }

    #[test]
    fn test_reload_transfers_min_of_needed_and_reserve() {
        // magazine=0, reserve=10, reloadTime=1.0s
        let mut weapon = PlayerWeapon {
            magazine: 0,
            reserve: 10,
            reload_time: 1.0,
            ..PlayerWeapon::sidearm()
        };
        weapon.start_reload();

        // Никаких выстрелов на [0, 1.0)
        for _ in 0..3 {
            weapon.tick(0.25);
            assert_eq!(weapon.try_fire(), FireOutcome::Reloading);
            assert_eq!(weapon.magazine, 0);
        }

        // t = 1.0: магазин = min(needed=12, reserve=10) = 10
        let completed = weapon.tick(0.25);
        assert!(completed);
        assert_eq!(weapon.magazine, 10);
        assert_eq!(weapon.reserve, 0);
        assert_eq!(weapon.try_fire(), FireOutcome::Fired);
    }

    #[test]
    fn test_reload_refused_when_pointless() {
        let mut weapon = PlayerWeapon::sidearm(); // полный магазин
        assert!(!weapon.start_reload());

        let mut weapon = PlayerWeapon {
            magazine: 0,
            reserve: 0,
            ..PlayerWeapon::sidearm()
        };
        assert!(!weapon.start_reload());
        assert_eq!(weapon.try_fire(), FireOutcome::Empty);
    }

    #[test]
    fn test_reload_not_restarted_while_in_progress() {
        let mut weapon = PlayerWeapon {
            magazine: 3,
            ..PlayerWeapon::sidearm()
        };
        assert!(weapon.start_reload());
        assert!(!weapon.start_reload()); // уже идёт
    }

    #[test]
    fn test_add_ammo() {
        let mut weapon = PlayerWeapon {
            reserve: 0,
            ..PlayerWeapon::sidearm()
        };
        weapon.add_ammo(12);
        assert_eq!(weapon.reserve, 12);
    }
}
