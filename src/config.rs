//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/gantt-model/gantt-model.toml`
//! 3. Local config: a file passed by the host application
//! 4. Environment variables: `GANTT_MODEL_*` prefix

use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::Calendar;

/// Settings that shape how records are turned into nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// UTC offset used for day boundaries, in minutes (e.g. 120 for +02:00)
    pub utc_offset_minutes: i32,
    /// Months added/subtracted when a record supplies only one date
    pub backfill_months: u32,
    /// Validate records before building a tree from settings
    pub validate_records: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            backfill_months: 1,
            validate_records: true,
        }
    }
}

/// Get the XDG config directory for gantt-model.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gantt-model").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("gantt-model.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_path` - Optional host-provided config file; must exist when given
    pub fn load(local_path: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), local_path)
    }

    /// Load settings with an explicit global config path instead of the XDG one.
    ///
    /// `None` skips the global layer; a given path is used only if it exists.
    pub fn load_layers(
        global_path: Option<&Path>,
        local_path: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("utc_offset_minutes", i64::from(defaults.utc_offset_minutes))
            .map_err(config_err)?
            .set_default("backfill_months", i64::from(defaults.backfill_months))
            .map_err(config_err)?
            .set_default("validate_records", defaults.validate_records)
            .map_err(config_err)?;

        if let Some(global) = global_path.filter(|p| p.exists()) {
            debug!(path = %global.display(), "loading global config");
            builder = builder.add_source(File::from(global.to_path_buf()).required(false));
        }

        if let Some(local) = local_path {
            debug!(path = %local.display(), "loading local config");
            builder = builder.add_source(File::from(local.to_path_buf()).required(true));
        }

        builder = builder.add_source(Environment::with_prefix("GANTT_MODEL").try_parsing(true));

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Date context for building trees.
    ///
    /// # Errors
    /// `Config` when the offset is not strictly within +/-24 hours.
    pub fn calendar(&self) -> Result<Calendar, ApplicationError> {
        let offset = self
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ApplicationError::Config {
                message: format!(
                    "utc_offset_minutes out of range: {}",
                    self.utc_offset_minutes
                ),
            })?;
        Ok(Calendar::new(offset, self.backfill_months))
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# gantt-model configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/gantt-model/gantt-model.toml
#   Local:  file passed by the host application
#   Env:    GANTT_MODEL_* environment variables

# UTC offset for day boundaries, in minutes (+02:00 = 120)
# utc_offset_minutes = 0

# Length of the range derived when a task has only a start or only an end
# backfill_months = 1

# Reject empty/duplicate ids, inverted ranges and cycles before wrapping
# validate_records = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
