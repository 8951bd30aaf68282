//! Waypoint/patrol-point source
//!
//! Два источника точек патруля:
//! - PatrolRoute: упорядоченный маршрут с wrap-around
//! - wander sampling: случайная точка в радиусе с bounded retry (10 попыток),
//!   достижимость проверяет инжектированный NavSampler

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Бюджет попыток подбора wander-точки за один tick
pub const WANDER_SAMPLE_ATTEMPTS: usize = 10;

/// Oracle достижимости: заменяет pathfinding хоста
///
/// Хост (navmesh, grid) отвечает «дойдёт ли агент из from в to».
pub trait NavSampler: Send + Sync {
    fn reachable(&self, from: Vec2, to: Vec2) -> bool;
}

/// Resource-обёртка для инжекции реализации
#[derive(Resource)]
pub struct NavOracle(pub Box<dyn NavSampler>);

impl NavOracle {
    pub fn new(sampler: impl NavSampler + 'static) -> Self {
        Self(Box::new(sampler))
    }

    /// Открытая навигация: всё достижимо
    pub fn open() -> Self {
        Self::new(OpenNav)
    }

    pub fn reachable(&self, from: Vec2, to: Vec2) -> bool {
        self.0.reachable(from, to)
    }
}

/// Тривиальный sampler: любая точка достижима
pub struct OpenNav;

impl NavSampler for OpenNav {
    fn reachable(&self, _from: Vec2, _to: Vec2) -> bool {
        true
    }
}

/// Прямоугольная арена: достижимо всё внутри half_extent
pub struct BoundedArena {
    pub half_extent: f32,
}

impl NavSampler for BoundedArena {
    fn reachable(&self, _from: Vec2, to: Vec2) -> bool {
        to.x.abs() <= self.half_extent && to.y.abs() <= self.half_extent
    }
}

/// Упорядоченный маршрут патруля
///
/// index всегда указывает на текущую цель; advance() двигает по кругу.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    pub points: Vec<Vec2>,
    pub index: usize,
}

impl Default for PatrolRoute {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            index: 0,
        }
    }
}

impl PatrolRoute {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points, index: 0 }
    }

    /// Текущий waypoint (None для пустого маршрута)
    pub fn current(&self) -> Option<Vec2> {
        self.points.get(self.index).copied()
    }

    /// Переход к следующему waypoint с wrap-around
    pub fn advance(&mut self) {
        if self.points.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.points.len();
    }
}

/// Подбирает случайную достижимую точку в радиусе от from
///
/// До WANDER_SAMPLE_ATTEMPTS попыток; если sampler всё отверг —
/// None (агент пробует снова на следующем tick).
pub fn sample_wander_point(
    rng: &mut ChaCha8Rng,
    nav: &NavOracle,
    from: Vec2,
    radius: f32,
) -> Option<Vec2> {
    for _ in 0..WANDER_SAMPLE_ATTEMPTS {
        let angle = rng.gen::<f32>() * std::f32::consts::TAU;
        let distance = rng.gen::<f32>() * radius;
        let candidate = from + Vec2::new(angle.cos(), angle.sin()) * distance;

        if nav.reachable(from, candidate) {
            return Some(candidate);
        }
    }
    None
}
