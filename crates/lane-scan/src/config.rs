//! # Scanner Configuration
//!
//! Per-terminal configuration for the scan engine.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. TOML Config File                                                   │
//! │     ~/.config/lane-pos/scanner.toml (Linux)                            │
//! │     ~/Library/Application Support/com.lane-pos.lane-pos/scanner.toml   │
//! │                                                                         │
//! │  2. Default Values                                                     │
//! │     store_id = "store-001", generated terminal id, builtin formats     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # scanner.toml
//! terminal_id = "550e8400-e29b-41d4-a716-446655440000"
//! store_id = "store-007"
//!
//! # Extra scale-label conventions, appended to the builtin table at
//! # their length-major position. New labelers are config, not code.
//! [[formats]]
//! name = "scale-6x6"
//! total_length = 12
//! code = { start = 0, end = 6 }
//! quantity = { start = 6, end = 12 }
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ConfigError;
use lane_core::{BarcodeFormat, FormatTable, StoreId};

/// Per-terminal scanner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Stable identifier for this terminal, generated when the file does
    /// not provide one.
    #[serde(default = "generated_terminal_id")]
    pub terminal_id: String,

    /// The store every catalog search is scoped to.
    #[serde(default)]
    pub store_id: StoreId,

    /// Extra scale-label formats, registered on top of the builtins.
    #[serde(default)]
    pub formats: Vec<BarcodeFormat>,
}

fn generated_terminal_id() -> String {
    Uuid::new_v4().to_string()
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            terminal_id: generated_terminal_id(),
            store_id: StoreId::default(),
            formats: Vec::new(),
        }
    }
}

impl ScannerConfig {
    /// The platform config path for `scanner.toml`, if one exists for
    /// this user.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "lane-pos", "lane-pos")
            .map(|dirs| dirs.config_dir().join("scanner.toml"))
    }

    /// Loads the config from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no scanner config, using defaults");
                return Ok(ScannerConfig::default());
            }
            Err(err) => return Err(err.into()),
        };

        let config = Self::from_toml_str(&raw)?;
        debug!(
            path = %path.display(),
            store = %config.store_id,
            extra_formats = config.formats.len(),
            "scanner config loaded"
        );
        Ok(config)
    }

    /// Parses a config document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Builds the format table: builtins plus every configured extra at
    /// its length-major position.
    ///
    /// A configured format that violates the table invariants fails the
    /// whole load - half a label convention is worse than none.
    pub fn format_table(&self) -> Result<FormatTable, ConfigError> {
        let mut table = FormatTable::builtin();
        for format in &self.formats {
            table.register(format.clone())?;
        }
        Ok(table)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
