//! Studio configuration.
//!
//! A single optional `darzi.toml` next to the data. All fields have stock
//! defaults matching a fresh install, so no config file is required at all;
//! unknown keys are rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! upload_root = "uploads"              # Gallery file tree
//! index_file = "image_metadata.json"   # Image metadata index
//! bookings_file = "bookings.json"      # Booking log
//! whatsapp_number = "918840586403"     # Studio WhatsApp, digits only
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `darzi.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Root of the gallery file tree; category subdirectories live under it.
    pub upload_root: PathBuf,
    /// Path of the image metadata index document.
    pub index_file: PathBuf,
    /// Path of the booking log.
    pub bookings_file: PathBuf,
    /// Studio WhatsApp number, digits only, with country code.
    pub whatsapp_number: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            upload_root: PathBuf::from("uploads"),
            index_file: PathBuf::from("image_metadata.json"),
            bookings_file: PathBuf::from("bookings.json"),
            whatsapp_number: "918840586403".to_string(),
        }
    }
}

impl StudioConfig {
    /// Load from `path`. A missing file means stock defaults; a present but
    /// invalid file is an error (silently ignoring a typo'd config would be
    /// worse than failing).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let number = &self.whatsapp_number;
        if !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Validation(
                "whatsapp_number must contain digits only".into(),
            ));
        }
        if number.len() < 10 || number.len() > 15 {
            return Err(ConfigError::Validation(
                "whatsapp_number must be 10-15 digits".into(),
            ));
        }
        Ok(())
    }
}

/// A documented stock config, printable via the `gen-config` subcommand.
pub fn stock_config_toml() -> String {
    let defaults = StudioConfig::default();
    format!(
        "\
# darzi configuration. Every option is optional; the values below are the
# stock defaults. Unknown keys are rejected.

# Root of the gallery file tree. One subdirectory per category is created
# under it (blouse/, kurti/, salwar/, lehenga/, gown/, other/).
upload_root = {:?}

# The image metadata index: a single JSON document listing every image.
index_file = {:?}

# Where submitted bookings are logged.
bookings_file = {:?}

# Studio WhatsApp number: digits only, including the country code.
whatsapp_number = {:?}
",
        defaults.upload_root, defaults.index_file, defaults.bookings_file, defaults.whatsapp_number,
    )
}
