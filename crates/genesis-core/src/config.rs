//! Configuration System
//!
//! Loads tuning parameters from tuning.toml for easy adjustment without recompiling.
//! Every section falls back to its defaults, so a partial file only overrides
//! what it names.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::components::grid::Season;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub world: WorldConfig,
    pub energy: EnergyConfig,
    pub chemicals: ChemicalConfig,
    pub movement: MovementConfig,
    pub pathways: PathwayConfig,
    pub markers: MarkerConfig,
    pub predator: PredatorConfig,
    pub seasons: SeasonsConfig,
    pub agents: AgentConfig,
}

/// Grid size, food placement and scent field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub grid_size: usize,
    /// Fraction of cells that start with food
    pub food_spawn_rate: f64,
    pub food_spawn_min: f64,
    pub food_spawn_max: f64,
    /// Added to a cell when it regrows
    pub food_regen_amount: f64,
    /// Multiplier applied to a cell that decays
    pub food_decay_factor: f64,
    /// Food below this density cannot be eaten
    pub edible_threshold: f64,
    pub scent_decay: f64,
    pub scent_blur_passes: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: 60,
            food_spawn_rate: 0.15,
            food_spawn_min: 0.5,
            food_spawn_max: 1.0,
            food_regen_amount: 0.1,
            food_decay_factor: 0.9,
            edible_threshold: 0.05,
            scent_decay: 0.05,
            scent_blur_passes: 3,
        }
    }
}

/// Energy budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    pub start: f64,
    pub max: f64,
    /// Drained every tick just for existing
    pub passive_drain: f64,
    /// Additional drain on ticks the agent moves
    pub move_drain: f64,
    /// Gained per unit of food density eaten
    pub food_gain: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            start: 100.0,
            max: 150.0,
            passive_drain: 0.3,
            move_drain: 0.7,
            food_gain: 30.0,
        }
    }
}

/// Chemical rates that are worth tuning; the rest of the coupling constants
/// live in `systems::chemistry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemicalConfig {
    pub satiation_decay: f64,
    /// Curiosity gained on entering a never-visited cell
    pub curiosity_gain: f64,
    /// Curiosity lost per tick on a known cell
    pub curiosity_decay: f64,
}

impl Default for ChemicalConfig {
    fn default() -> Self {
        Self {
            satiation_decay: 0.02,
            curiosity_gain: 0.15,
            curiosity_decay: 0.01,
        }
    }
}

/// Movement scoring weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub hunger_weight: f64,
    pub fear_weight: f64,
    pub curiosity_weight: f64,
    /// Base half-width of the uniform score noise
    pub noise_range: f64,
    /// Extra noise half-width per unit of stress
    pub stress_noise: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            hunger_weight: 2.0,
            fear_weight: 1.2,
            curiosity_weight: 1.0,
            noise_range: 0.1,
            stress_noise: 0.15,
        }
    }
}

/// Pathway memory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathwayConfig {
    pub reinforce: f64,
    pub weaken: f64,
    /// Score bonus per unit of pathway strength
    pub weight: f64,
    pub prune_threshold: f64,
    /// Length of the move history that gets reinforced on a meal
    pub lookback: usize,
    /// Pathway entries sampled for the territory density term
    pub density_sample: usize,
}

impl Default for PathwayConfig {
    fn default() -> Self {
        Self {
            reinforce: 0.1,
            weaken: 0.05,
            weight: 0.3,
            prune_threshold: 0.01,
            lookback: 5,
            density_sample: 20,
        }
    }
}

/// Food and alarm markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub food_decay: f64,
    pub alarm_decay: f64,
    pub food_weight: f64,
    pub alarm_weight: f64,
    /// Strength of the food marker left after a meal
    pub food_deposit: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            food_decay: 0.005,
            alarm_decay: 0.01,
            food_weight: 1.2,
            alarm_weight: 0.8,
            food_deposit: 0.8,
        }
    }
}

/// Predator behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredatorConfig {
    pub enabled: bool,
    /// Moves every N ticks
    pub speed_interval: u64,
    pub damage: f64,
    pub sense_range: f64,
    pub fear_boost: f64,
    pub start_x: i32,
    pub start_y: i32,
    /// Agents closer than this are attacked
    pub attack_radius: f64,
    pub trail_len: usize,
}

impl Default for PredatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed_interval: 3,
            damage: 15.0,
            sense_range: 8.0,
            fear_boost: 0.4,
            start_x: 30,
            start_y: 30,
            attack_radius: 2.0,
            trail_len: 25,
        }
    }
}

/// Rates that change with the season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonProfile {
    /// Per-cell probability of regrowth each tick
    pub food_regen: f64,
    /// Per-cell probability of decay each tick
    pub food_decay: f64,
    pub scent_diffusion: f64,
    /// Multiplier on all energy drain
    pub drain_modifier: f64,
    pub color: [u8; 3],
}

/// Season length and the per-season rate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonsConfig {
    /// Ticks per season
    pub length: u64,
    pub spring: SeasonProfile,
    pub summer: SeasonProfile,
    pub autumn: SeasonProfile,
    pub winter: SeasonProfile,
}

impl SeasonsConfig {
    pub fn profile(&self, season: Season) -> &SeasonProfile {
        match season {
            Season::Spring => &self.spring,
            Season::Summer => &self.summer,
            Season::Autumn => &self.autumn,
            Season::Winter => &self.winter,
        }
    }
}

impl Default for SeasonsConfig {
    fn default() -> Self {
        Self {
            length: 500,
            spring: SeasonProfile {
                food_regen: 0.003,
                food_decay: 0.0,
                scent_diffusion: 0.45,
                drain_modifier: 1.0,
                color: [15, 25, 15],
            },
            summer: SeasonProfile {
                food_regen: 0.006,
                food_decay: 0.0,
                scent_diffusion: 0.5,
                drain_modifier: 0.9,
                color: [10, 20, 10],
            },
            autumn: SeasonProfile {
                food_regen: 0.002,
                food_decay: 0.0005,
                scent_diffusion: 0.35,
                drain_modifier: 1.1,
                color: [25, 15, 5],
            },
            winter: SeasonProfile {
                food_regen: 0.0003,
                food_decay: 0.002,
                scent_diffusion: 0.2,
                drain_modifier: 1.4,
                color: [10, 10, 20],
            },
        }
    }
}

/// Agent bookkeeping and inheritance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub trail_len: usize,
    /// Scale applied to pathway strength passed to offspring
    pub inheritance_strength: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            trail_len: 40,
            inheritance_strength: 0.7,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_TUNING_PATH, e);
            Self::default()
        })
    }

    /// Serialize this configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Reject values that would make the grid or the clocks meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.grid_size < 8 {
            return Err(ConfigError::Invalid(format!(
                "world.grid_size must be at least 8, got {}",
                self.world.grid_size
            )));
        }
        if self.seasons.length == 0 {
            return Err(ConfigError::Invalid("seasons.length must be positive".into()));
        }
        if self.predator.speed_interval == 0 {
            return Err(ConfigError::Invalid(
                "predator.speed_interval must be positive".into(),
            ));
        }
        if self.pathways.lookback == 0 {
            return Err(ConfigError::Invalid("pathways.lookback must be positive".into()));
        }
        Ok(())
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.world.grid_size, 60);
        assert_eq!(config.energy.food_gain, 30.0);
        assert_eq!(config.seasons.length, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [predator]
            damage = 5.0

            [seasons.winter]
            food_regen = 0.0
            food_decay = 0.01
            scent_diffusion = 0.1
            drain_modifier = 2.0
            color = [0, 0, 0]
            "#,
        )
        .unwrap();

        assert_eq!(config.predator.damage, 5.0);
        assert_eq!(config.predator.speed_interval, 3);
        assert_eq!(config.seasons.profile(Season::Winter).drain_modifier, 2.0);
        assert_eq!(config.seasons.profile(Season::Spring).scent_diffusion, 0.45);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Config::from_toml("[world]\ngrid_size = 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_toml("[world]\ngrid_size = \"big\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_round_trip_through_file() {
        let mut config = Config::default();
        config.movement.noise_range = 0.0;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_toml().unwrap().as_bytes()).unwrap();

        let loaded = Config::load(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_shipped_tuning_matches_defaults() {
        let shipped = Config::from_toml(include_str!("../../../tuning.toml")).unwrap();
        assert_eq!(shipped, Config::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load("/definitely/not/here/tuning.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
