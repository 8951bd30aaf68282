//! FSM компоненты поведения врага + чистое transition-ядро

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Состояние поведения врага
///
/// Инвариант: каждый tick агент ровно в одном состоянии.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub enum AIState {
    /// Patrol — обход waypoint-маршрута или случайный wander
    Patrol {
        /// Текущая wander-точка (None = нужно сэмплировать)
        waypoint: Option<Vec2>,
    },

    /// Chase — преследование игрока
    Chase {
        /// Закэшированная позиция цели (re-path с bounded интервалом)
        last_known: Vec2,
        /// Время до следующего re-path
        repath_timer: f32,
    },

    /// Attack — в радиусе атаки, стрельба по cooldown
    Attack {
        last_known: Vec2,
        repath_timer: f32,
    },

    /// Trapped — пойман ловушкой, движение и targeting подавлены
    Trapped {
        /// Оставшееся время удержания
        remaining: f32,
    },

    /// Dying — терминальное состояние (HP == 0)
    Dying,
}

impl Default for AIState {
    fn default() -> Self {
        Self::Patrol { waypoint: None }
    }
}

/// Параметры AI (все пороги и таймеры — конфигурация, не хардкод)
#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct AIConfig {
    /// Дальность обнаружения игрока (метры)
    pub sight_range: f32,
    /// Дальность перехода в Attack (метры)
    pub attack_range: f32,
    /// Hysteresis: выход из Attack при distance > attack_range × этот фактор
    pub attack_exit_factor: f32,
    /// Интервал re-path в Chase/Attack (секунды, не каждый tick)
    pub repath_interval: f32,
    /// Скорость преследования (м/с)
    pub chase_speed: f32,
    /// Дистанция контакта с игроком в Chase (метры)
    pub contact_range: f32,
    /// Урон при контакте
    pub contact_damage: u32,
    /// Cooldown повторного преследования после контакта (секунды)
    pub chase_cooldown: f32,
    /// Радиус wander-точек вокруг агента (метры)
    pub wander_radius: f32,
    /// Дистанция «waypoint достигнут» (метры)
    pub stopping_distance: f32,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            sight_range: 12.0,
            attack_range: 8.0,
            attack_exit_factor: 1.15, // шире входного порога, гасит flicker
            repath_interval: 0.25,
            chase_speed: 4.0,
            contact_range: 0.6,
            contact_damage: 10,
            chase_cooldown: 2.0,
            wander_radius: 6.0,
            stopping_distance: 0.15,
        }
    }
}

/// Capability-флаги агента
///
/// Один FSM обслуживает все варианты врагов:
/// - wanderer: только Patrol (бродячий призрак)
/// - chaser: Patrol + Chase (преследующий призрак)
/// - gunner: полный набор, Attack со стрельбой
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct AICapabilities {
    pub chase: bool,
    pub ranged_attack: bool,
}

impl Default for AICapabilities {
    fn default() -> Self {
        Self {
            chase: true,
            ranged_attack: true,
        }
    }
}

impl AICapabilities {
    /// Только патруль, без боя
    pub fn wanderer() -> Self {
        Self {
            chase: false,
            ranged_attack: false,
        }
    }

    /// Преследует, но не стреляет (контактный урон)
    pub fn chaser() -> Self {
        Self {
            chase: true,
            ranged_attack: false,
        }
    }

    /// Полный набор: патруль, преследование, стрельба
    pub fn gunner() -> Self {
        Self::default()
    }
}

/// Cooldown повторного преследования (после контакта с игроком)
///
/// Пока remaining > 0 агент принудительно в Patrol.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ChaseCooldown {
    pub remaining: f32,
}

/// Боевая постура (свёртка AIState для transition-ядра)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posture {
    Patrol,
    Chase,
    Attack,
}

/// Чистое transition-ядро: постура по (дистанция, LOS, cooldown)
///
/// Детерминировано: одинаковые входы ⇒ одинаковый выход.
/// Приоритеты (Dying/Trapped обрабатываются выше, системой):
/// - нет capability chase, активный chase-cooldown, нет LOS,
///   либо distance > sight_range → Patrol
/// - distance ≤ attack_range (и есть ranged_attack) → Attack
/// - иначе → Chase
///
/// Hysteresis: уже в Attack — выходим в Chase только при
/// distance > attack_range × attack_exit_factor.
pub fn select_posture(
    current: Posture,
    distance: f32,
    line_of_sight: bool,
    chase_blocked: bool,
    config: &AIConfig,
    caps: &AICapabilities,
) -> Posture {
    if !caps.chase || chase_blocked || !line_of_sight || distance > config.sight_range {
        return Posture::Patrol;
    }

    if caps.ranged_attack {
        let attack_exit = config.attack_range * config.attack_exit_factor;
        let in_attack_range = if current == Posture::Attack {
            distance <= attack_exit
        } else {
            distance <= config.attack_range
        };
        if in_attack_range {
            return Posture::Attack;
        }
    }

    Posture::Chase
}

/// Свёртка текущего AIState в постуру
pub fn posture_of(state: &AIState) -> Posture {
    match state {
        AIState::Attack { .. } => Posture::Attack,
        AIState::Chase { .. } => Posture::Chase,
        _ => Posture::Patrol,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AIConfig {
        AIConfig {
            sight_range: 12.0,
            attack_range: 8.0,
            attack_exit_factor: 1.15,
            ..AIConfig::default()
        }
    }

    #[test]
    fn test_posture_attack_in_range() {
        // distance=5, sightRange=12, attackRange=8, LOS → Attack
        let p = select_posture(
            Posture::Patrol,
            5.0,
            true,
            false,
            &config(),
            &AICapabilities::gunner(),
        );
        assert_eq!(p, Posture::Attack);
    }

    #[test]
    fn test_posture_chase_between_ranges() {
        let p = select_posture(
            Posture::Patrol,
            10.0,
            true,
            false,
            &config(),
            &AICapabilities::gunner(),
        );
        assert_eq!(p, Posture::Chase);
    }

    #[test]
    fn test_posture_patrol_beyond_sight() {
        let p = select_posture(
            Posture::Chase,
            12.5,
            true,
            false,
            &config(),
            &AICapabilities::gunner(),
        );
        assert_eq!(p, Posture::Patrol);
    }

    #[test]
    fn test_posture_patrol_without_los() {
        let p = select_posture(
            Posture::Attack,
            5.0,
            false,
            false,
            &config(),
            &AICapabilities::gunner(),
        );
        assert_eq!(p, Posture::Patrol);
    }

    #[test]
    fn test_attack_hysteresis() {
        let cfg = config();
        let caps = AICapabilities::gunner();

        // В Attack на границе 8.0
        let p = select_posture(Posture::Patrol, 8.0, true, false, &cfg, &caps);
        assert_eq!(p, Posture::Attack);

        // 9.1 < 8×1.15=9.2 — остаёмся в Attack
        let p = select_posture(Posture::Attack, 9.1, true, false, &cfg, &caps);
        assert_eq!(p, Posture::Attack);

        // 9.3 > 9.2 — выходим в Chase
        let p = select_posture(Posture::Attack, 9.3, true, false, &cfg, &caps);
        assert_eq!(p, Posture::Chase);

        // Не из Attack порог входа обычный: 9.1 > 8.0 → Chase
        let p = select_posture(Posture::Chase, 9.1, true, false, &cfg, &caps);
        assert_eq!(p, Posture::Chase);
    }

    #[test]
    fn test_capability_gating() {
        let cfg = config();

        // wanderer никогда не покидает Patrol
        let p = select_posture(
            Posture::Patrol,
            3.0,
            true,
            false,
            &cfg,
            &AICapabilities::wanderer(),
        );
        assert_eq!(p, Posture::Patrol);

        // chaser не входит в Attack даже вплотную
        let p = select_posture(
            Posture::Patrol,
            3.0,
            true,
            false,
            &cfg,
            &AICapabilities::chaser(),
        );
        assert_eq!(p, Posture::Chase);
    }

    #[test]
    fn test_chase_cooldown_forces_patrol() {
        let p = select_posture(
            Posture::Chase,
            5.0,
            true,
            true, // cooldown активен
            &config(),
            &AICapabilities::gunner(),
        );
        assert_eq!(p, Posture::Patrol);
    }

    #[test]
    fn test_ai_state_default() {
        let state = AIState::default();
        assert!(matches!(state, AIState::Patrol { waypoint: None }));
    }

    #[test]
    fn test_ai_config_default() {
        let config = AIConfig::default();
        assert_eq!(config.attack_exit_factor, 1.15);
        assert_eq!(config.chase_cooldown, 2.0);
        assert!(config.sight_range > config.attack_range);
    }
}
