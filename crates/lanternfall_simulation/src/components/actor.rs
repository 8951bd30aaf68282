//! Базовые компоненты живых существ: Enemy, Health

use bevy::prelude::*;

/// Marker: враждебный агент (призрак, ghast)
///
/// Автоматически добавляет Health через Required Components.
/// Поведение задаётся отдельно: AIState + AIConfig + AICapabilities.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health)]
pub struct Enemy;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Наносит урон, клампит на нуле (saturating)
    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);
        assert_eq!(health.current, 100);

        health.take_damage(30);
        assert_eq!(health.current, 70);
        assert!(health.is_alive());

        // Урон меньше остатка: состояние живое, health = h - d
        health.take_damage(69);
        assert_eq!(health.current, 1);
        assert!(health.is_alive());
    }

    #[test]
    fn test_health_overkill_clamps_to_zero() {
        let mut health = Health::new(50);
        health.take_damage(51); // h + 1
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());

        // Повторный урон не уводит в минус
        health.take_damage(100);
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_health_heal() {
        let mut health = Health::new(100);
        health.take_damage(50);
        assert_eq!(health.current, 50);

        health.heal(30);
        assert_eq!(health.current, 80);

        health.heal(100); // Clamped to max
        assert_eq!(health.current, 100);
    }
}
