use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Slowest selectable speed, in steps per second
pub const MIN_SPEED: u32 = 3;
/// Fastest selectable speed, in steps per second
pub const MAX_SPEED: u32 = 20;
/// Longest accepted side of the grid, in cells
pub const MAX_GRID_SIDE: usize = 200;
/// Longest accepted player name, in characters
pub const MAX_PLAYER_NAME_LEN: usize = 15;

/// Configuration for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake, head included
    pub initial_snake_length: usize,
    /// Simulation steps per second
    pub speed: u32,
    /// Points awarded for each food item eaten
    pub points_per_food: u32,
    /// Name shown in the header and submitted to the leaderboard
    pub player_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 20,
            initial_snake_length: 3,
            speed: 4,
            points_per_food: 10,
            player_name: "player".to_string(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Interval between two ticks of the external timer
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed.max(1)))
    }

    /// Check the grid size and grid fit, ignoring the menu-only fields
    pub fn validate_grid(&self) -> Result<(), GameError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(GameError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(GameError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                max: MAX_GRID_SIDE,
            });
        }

        // The spawn row must hold the whole snake and leave a cell for food.
        let spawn_x = (self.grid_width / 2) as i64 - 1;
        let fits = self.initial_snake_length >= 1
            && spawn_x + 1 >= self.initial_snake_length as i64
            && self.initial_snake_length < self.grid_width * self.grid_height;
        if !fits {
            return Err(GameError::SnakeTooLong {
                length: self.initial_snake_length,
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        Ok(())
    }

    /// Validate every field, as the menu does before a session can start
    pub fn validate(&self) -> Result<(), GameError> {
        self.validate_grid()?;

        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(GameError::InvalidSpeed {
                speed: self.speed,
                min: MIN_SPEED,
                max: MAX_SPEED,
            });
        }

        let len = self.player_name.chars().count();
        if len == 0 || len > MAX_PLAYER_NAME_LEN {
            return Err(GameError::InvalidPlayerName {
                len,
                max: MAX_PLAYER_NAME_LEN,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.points_per_food, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
    }

    #[test]
    fn test_tick_interval() {
        let mut config = GameConfig::default();
        config.speed = 4;
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        config.speed = 20;
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_zero_grid_rejected() {
        assert_eq!(
            GameConfig::new(0, 10).validate(),
            Err(GameError::InvalidGrid {
                width: 0,
                height: 10
            })
        );
        assert!(GameConfig::new(10, 0).validate().is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        assert_eq!(
            GameConfig::new(40000, 4).validate(),
            Err(GameError::GridTooLarge {
                width: 40000,
                height: 4,
                max: MAX_GRID_SIDE
            })
        );
        assert!(GameConfig::new(10, MAX_GRID_SIDE + 1).validate().is_err());
        assert!(GameConfig::new(MAX_GRID_SIDE, MAX_GRID_SIDE).validate().is_ok());
    }

    #[test]
    fn test_speed_range() {
        let mut config = GameConfig::small();
        config.speed = 2;
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidSpeed { speed: 2, .. })
        ));
        config.speed = 21;
        assert!(config.validate().is_err());
        config.speed = 3;
        assert!(config.validate().is_ok());
        config.speed = 20;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_player_name_rules() {
        let mut config = GameConfig::small();
        config.player_name = String::new();
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidPlayerName { len: 0, .. })
        ));

        config.player_name = "a".repeat(16);
        assert!(config.validate().is_err());

        config.player_name = "a".repeat(15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_snake_must_fit_spawn_row() {
        // Spawn head at x = 0 leaves no room behind it.
        let config = GameConfig::new(2, 10);
        assert!(matches!(
            config.validate_grid(),
            Err(GameError::SnakeTooLong { .. })
        ));

        // Head at x = 2 with two body cells behind it.
        assert!(GameConfig::new(6, 1).validate_grid().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::small();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
