use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{Board, RoundController, RuleSet, DEFAULT_COLS, DEFAULT_ROWS};

/// Largest board edge the terminal view can lay out.
pub const MAX_DIMENSION: usize = 16;

/// Board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: DEFAULT_COLS,
            height: DEFAULT_ROWS,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    /// Optional rules enabled at the start of every session.
    pub rules: RuleSet,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width == 0 || self.board.width > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.width must be in [1, {MAX_DIMENSION}]"
            )));
        }
        if self.board.height == 0 || self.board.height > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.height must be in [1, {MAX_DIMENSION}]"
            )));
        }
        Ok(())
    }

    /// A fresh session using this configuration. Invalid dimensions are
    /// reported rather than handed to the board.
    pub fn controller(&self) -> Result<RoundController, ConfigError> {
        self.validate()?;
        Ok(RoundController::with_board(
            Board::with_size(self.board.height, self.board.width),
            self.rules,
        ))
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
