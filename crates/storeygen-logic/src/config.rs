//! Generation parameters and their validation.
//!
//! A `GenerationConfig` is read-only for the duration of one generation run.
//! It is plain data so it can be built in code, edited by a settings screen,
//! or deserialized from a JSON preset.
//!
//! ```
//! use storeygen_logic::config::{validate_config, GenerationConfig};
//!
//! let mut config = GenerationConfig::default();
//! config.floor_count = 3;
//! config.roof_enabled = true;
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// Everything a generation run needs besides the random stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Plot extent along x.
    pub plot_width: u32,
    /// Plot extent along z.
    pub plot_height: u32,
    /// Smallest room side.
    pub min_room_size: u32,
    /// Largest room side.
    pub max_room_size: u32,
    /// Rooms placed on the ground floor.
    pub room_count: u32,
    pub floor_count: u32,
    /// Doors to the outside, all on the ground floor.
    pub outside_door_count: u32,
    /// Top-floor rooms turned into balconies.
    pub balcony_count: u32,
    /// Rooms of each floor (counted from the end) not stacked upward.
    pub remove_room_count: u32,
    /// Windows per wall, capped by wall length.
    pub window_count: u32,
    /// Draw each room's window count from `[1, window_count]`.
    pub randomise_windows: bool,
    pub roof_enabled: bool,
    /// Run the door-pruning walk on every floor.
    pub pathfind_doors: bool,
    /// Height of doors and windows above a floor's base.
    pub wall_height: f32,
    /// Vertical distance between floors.
    pub roof_height: f32,
    /// Attempts allowed for each bounded placement search.
    pub retry_budget: u32,
    /// Steps allowed for the door-pruning walk on one floor.
    pub walk_budget: u32,
    /// Abort the run on the first exhausted search instead of degrading.
    pub strict: bool,
    /// Random seed (None = random).
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            plot_width: 50,
            plot_height: 50,
            min_room_size: 4,
            max_room_size: 15,
            room_count: 4,
            floor_count: 2,
            outside_door_count: 1,
            balcony_count: 1,
            remove_room_count: 0,
            window_count: 1,
            randomise_windows: false,
            roof_enabled: false,
            pathfind_doors: true,
            wall_height: 1.4,
            roof_height: 3.0,
            retry_budget: 1000,
            walk_budget: 10_000,
            strict: false,
            seed: None,
        }
    }
}

impl GenerationConfig {
    pub fn plot_width_f(&self) -> f32 {
        self.plot_width as f32
    }

    pub fn plot_height_f(&self) -> f32 {
        self.plot_height as f32
    }

    pub fn min_room_size_f(&self) -> f32 {
        self.min_room_size as f32
    }

    pub fn max_room_size_f(&self) -> f32 {
        self.max_room_size as f32
    }

    /// Index of the top floor.
    pub fn top_floor(&self) -> usize {
        self.floor_count.saturating_sub(1) as usize
    }

    /// Base elevation of a floor.
    pub fn floor_elevation(&self, floor: usize) -> f32 {
        self.roof_height * floor as f32
    }

    /// Elevation of doors and windows on a floor.
    pub fn opening_elevation(&self, floor: usize) -> f32 {
        self.wall_height + self.floor_elevation(floor)
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Plot width or height is zero.
    EmptyPlot { width: u32, height: u32 },
    /// Minimum room size is zero.
    ZeroRoomSize,
    /// Minimum room size exceeds the maximum.
    RoomSizeRange { min: u32, max: u32 },
    /// A maximum-size room would not fit in the plot.
    RoomLargerThanPlot(u32),
    NoRooms,
    NoFloors,
    /// Removing this many rooms per floor would leave nothing to stack.
    RemoveCountTooLarge { remove: u32, rooms: u32 },
    /// Retry or walk budget is zero.
    ZeroBudget,
    /// Wall or roof height is not positive.
    NonPositiveHeight(f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyPlot { width, height } => {
                write!(f, "plot must be non-empty, got {}x{}", width, height)
            }
            ConfigError::ZeroRoomSize => write!(f, "minimum room size must be positive"),
            ConfigError::RoomSizeRange { min, max } => {
                write!(f, "minimum room size {} exceeds maximum {}", min, max)
            }
            ConfigError::RoomLargerThanPlot(size) => {
                write!(f, "maximum room size {} does not fit in the plot", size)
            }
            ConfigError::NoRooms => write!(f, "room count must be at least 1"),
            ConfigError::NoFloors => write!(f, "floor count must be at least 1"),
            ConfigError::RemoveCountTooLarge { remove, rooms } => write!(
                f,
                "cannot remove {} of {} rooms on each upper floor",
                remove, rooms
            ),
            ConfigError::ZeroBudget => write!(f, "retry and walk budgets must be positive"),
            ConfigError::NonPositiveHeight(h) => write!(f, "heights must be positive, got {}", h),
        }
    }
}

/// Validate a generation configuration, returning all errors found.
pub fn validate_config(config: &GenerationConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.plot_width == 0 || config.plot_height == 0 {
        errors.push(ConfigError::EmptyPlot {
            width: config.plot_width,
            height: config.plot_height,
        });
    }
    if config.min_room_size == 0 {
        errors.push(ConfigError::ZeroRoomSize);
    }
    if config.min_room_size > config.max_room_size {
        errors.push(ConfigError::RoomSizeRange {
            min: config.min_room_size,
            max: config.max_room_size,
        });
    }
    if config.max_room_size > config.plot_width || config.max_room_size > config.plot_height {
        errors.push(ConfigError::RoomLargerThanPlot(config.max_room_size));
    }
    if config.room_count == 0 {
        errors.push(ConfigError::NoRooms);
    }
    if config.floor_count == 0 {
        errors.push(ConfigError::NoFloors);
    }
    if config.floor_count > 1 && config.room_count > 0 && config.remove_room_count >= config.room_count
    {
        errors.push(ConfigError::RemoveCountTooLarge {
            remove: config.remove_room_count,
            rooms: config.room_count,
        });
    }
    if config.retry_budget == 0 || config.walk_budget == 0 {
        errors.push(ConfigError::ZeroBudget);
    }
    for h in [config.wall_height, config.roof_height] {
        if h.is_nan() || h <= 0.0 {
            errors.push(ConfigError::NonPositiveHeight(h));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GenerationConfig::default();
        let errors = validate_config(&config);
        assert!(
            errors.is_empty(),
            "default config should be valid: {errors:?}"
        );
    }

    #[test]
    fn empty_plot() {
        let mut config = GenerationConfig::default();
        config.plot_width = 0;
        assert!(validate_config(&config).contains(&ConfigError::EmptyPlot {
            width: 0,
            height: 50
        }));
    }

    #[test]
    fn inverted_room_size_range() {
        let mut config = GenerationConfig::default();
        config.min_room_size = 10;
        config.max_room_size = 5;
        assert!(validate_config(&config)
            .contains(&ConfigError::RoomSizeRange { min: 10, max: 5 }));
    }

    #[test]
    fn room_larger_than_plot() {
        let mut config = GenerationConfig::default();
        config.plot_height = 10;
        assert!(validate_config(&config).contains(&ConfigError::RoomLargerThanPlot(15)));
    }

    #[test]
    fn zero_counts() {
        let mut config = GenerationConfig::default();
        config.room_count = 0;
        config.floor_count = 0;
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::NoRooms));
        assert!(errors.contains(&ConfigError::NoFloors));
    }

    #[test]
    fn remove_count_only_matters_with_upper_floors() {
        let mut config = GenerationConfig::default();
        config.room_count = 3;
        config.remove_room_count = 3;
        assert!(validate_config(&config)
            .contains(&ConfigError::RemoveCountTooLarge { remove: 3, rooms: 3 }));
        config.floor_count = 1;
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn zero_budget() {
        let mut config = GenerationConfig::default();
        config.walk_budget = 0;
        assert!(validate_config(&config).contains(&ConfigError::ZeroBudget));
    }

    #[test]
    fn non_positive_heights() {
        let mut config = GenerationConfig::default();
        config.roof_height = 0.0;
        config.wall_height = -1.0;
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::NonPositiveHeight(0.0)));
        assert!(errors.contains(&ConfigError::NonPositiveHeight(-1.0)));
    }

    #[test]
    fn elevations() {
        let config = GenerationConfig::default();
        assert_eq!(config.floor_elevation(0), 0.0);
        assert_eq!(config.floor_elevation(2), 6.0);
        assert!((config.opening_elevation(1) - 4.4).abs() < 1e-5);
        assert_eq!(config.top_floor(), 1);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "floor_count": 3, "roof_enabled": true, "seed": 9 }"#)
                .expect("valid json");
        assert_eq!(config.floor_count, 3);
        assert!(config.roof_enabled);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.plot_width, 50);
        assert_eq!(config.retry_budget, 1000);
    }

    #[test]
    fn error_messages_are_readable() {
        let msg = ConfigError::RoomSizeRange { min: 10, max: 5 }.to_string();
        assert!(msg.contains("10") && msg.contains('5'));
    }
}
