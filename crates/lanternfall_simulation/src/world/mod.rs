//! Внешние collaborators мира (инжектятся как ресурсы)
//!
//! Симуляция не владеет геометрией уровня — line-of-sight и достижимость
//! точек предоставляет хост через trait objects:
//! - los: LineOfSight oracle (чист ли луч между точками)
//! - nav: NavSampler (достижима ли точка) + patrol маршруты

pub mod los;
pub mod nav;

pub use los::{LineOfSight, LosOracle, OpenField, WallSet};
pub use nav::{NavOracle, NavSampler, OpenNav, PatrolRoute, WANDER_SAMPLE_ATTEMPTS};
