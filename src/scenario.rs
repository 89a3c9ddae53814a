use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;
use crate::game::{Game, GameBuilder};
use crate::terrain::TerrainMode;
use crate::world::{Coord, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};

/// Side length of the all-grass preset.
pub const FLAT_GRID_SIZE: usize = 10;

fn default_name() -> String {
    "skirmish".to_string()
}

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

fn default_city_name() -> String {
    "City".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub terrain: TerrainMode,
    #[serde(default)]
    pub settler_start: StartPosition,
    #[serde(default = "default_city_name")]
    pub city_name: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartPosition {
    pub row: usize,
    pub col: usize,
}

impl From<StartPosition> for Coord {
    fn from(value: StartPosition) -> Self {
        Coord::new(value.row, value.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: default_name(),
            grid_size: default_grid_size(),
            seed: None,
            terrain: TerrainMode::Generated,
            settler_start: StartPosition::default(),
            city_name: default_city_name(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Scenario {
    /// 10x10 all-grass map.
    pub fn flat() -> Self {
        Self {
            name: "flat".to_string(),
            grid_size: FLAT_GRID_SIZE,
            terrain: TerrainMode::Flat,
            ..Self::default()
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let scenario: Scenario = serde_yaml::from_str(text).context("Failed to parse scenario")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.grid_size == 0 {
            return Err(ScenarioError::Validation(
                "grid_size must be greater than zero".to_string(),
            ));
        }

        if self.grid_size > MAX_GRID_SIZE {
            return Err(ScenarioError::Validation(format!(
                "grid_size {} exceeds the maximum of {MAX_GRID_SIZE}",
                self.grid_size
            )));
        }

        let start = self.settler_start;
        if start.row >= self.grid_size || start.col >= self.grid_size {
            return Err(ScenarioError::Validation(format!(
                "settler_start ({}, {}) lies outside the {}x{} grid",
                start.row, start.col, self.grid_size, self.grid_size
            )));
        }

        if self.city_name.trim().is_empty() {
            return Err(ScenarioError::Validation(
                "city_name must not be empty".into(),
            ));
        }

        Ok(())
    }

    pub fn build_game(&self) -> Result<Game, ScenarioError> {
        self.validate()?;
        let builder = GameBuilder::new(self.grid_size)
            .terrain(self.terrain)
            .settler_start(self.settler_start.into())
            .city_name(self.city_name.clone());
        let builder = match self.seed {
            Some(seed) => builder.seed(seed),
            None => builder,
        };
        builder.build().map_err(ScenarioError::from)
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        Scenario::from_yaml_str(&data)
            .with_context(|| format!("Invalid scenario {}", path.display()))
    }
}
