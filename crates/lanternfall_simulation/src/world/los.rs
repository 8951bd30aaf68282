//! Line-of-sight oracle
//!
//! AI спрашивает «чист ли луч от агента к цели» каждый tick. Реализацию
//! предоставляет хост (raycast по своей геометрии); для headless-прогонов
//! и тестов есть OpenField и WallSet.

use bevy::prelude::*;

/// Oracle: есть ли непрерывная прямая между двумя точками
///
/// Контракт: луч до самой цели считается чистым, если первое препятствие —
/// сама цель (хост-raycast исключает target из проверки).
pub trait LineOfSight: Send + Sync {
    fn clear(&self, from: Vec2, to: Vec2) -> bool;
}

/// Resource-обёртка для инжекции реализации
#[derive(Resource)]
pub struct LosOracle(pub Box<dyn LineOfSight>);

impl LosOracle {
    pub fn new(oracle: impl LineOfSight + 'static) -> Self {
        Self(Box::new(oracle))
    }

    /// Открытое поле: препятствий нет
    pub fn open_field() -> Self {
        Self::new(OpenField)
    }

    pub fn clear(&self, from: Vec2, to: Vec2) -> bool {
        self.0.clear(from, to)
    }
}

/// Тривиальный oracle: LOS всегда чист
pub struct OpenField;

impl LineOfSight for OpenField {
    fn clear(&self, _from: Vec2, _to: Vec2) -> bool {
        true
    }
}

/// Набор стен-отрезков (для тестов и headless-сцен)
///
/// LOS чист, если луч from→to не пересекает ни одну стену.
pub struct WallSet {
    pub walls: Vec<(Vec2, Vec2)>,
}

impl LineOfSight for WallSet {
    fn clear(&self, from: Vec2, to: Vec2) -> bool {
        self.walls
            .iter()
            .all(|&(a, b)| !segments_intersect(from, to, a, b))
    }
}

/// Пересечение отрезков p1-p2 и p3-p4 (ориентированные площади)
fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let d1 = cross(p4 - p3, p1 - p3);
    let d2 = cross(p4 - p3, p2 - p3);
    let d3 = cross(p2 - p1, p3 - p1);
    let d4 = cross(p2 - p1, p4 - p1);

    (d1 * d2) < 0.0 && (d3 * d4) < 0.0
}

fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_field_always_clear() {
        let oracle = LosOracle::open_field();
        assert!(oracle.clear(Vec2::ZERO, Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_wall_blocks_ray() {
        // Вертикальная стена x=5 между наблюдателем и целью
        let oracle = LosOracle::new(WallSet {
            walls: vec![(Vec2::new(5.0, -10.0), Vec2::new(5.0, 10.0))],
        });

        assert!(!oracle.clear(Vec2::ZERO, Vec2::new(10.0, 0.0)));
        // Цель перед стеной — луч чист
        assert!(oracle.clear(Vec2::ZERO, Vec2::new(4.0, 0.0)));
        // Луч параллельно стене — чист
        assert!(oracle.clear(Vec2::new(0.0, 20.0), Vec2::new(10.0, 20.0)));
    }
}
