//! Timer configuration.
//!
//! Settings are read from a JSON file (by default
//! `~/.workout-timer/config.json`). Every field has a default, so a partial
//! file is valid and a missing default file simply yields the defaults.

mod error;

pub use error::ConfigError;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shortest accepted work or rest duration, in seconds.
pub const MIN_DURATION_SECONDS: u32 = 5;

/// Longest accepted work or rest duration, in seconds.
pub const MAX_DURATION_SECONDS: u32 = 3600;

/// Directory under the home directory holding the config file.
const CONFIG_DIR_NAME: &str = ".workout-timer";

/// File name of the config file.
const CONFIG_FILE_NAME: &str = "config.json";

fn default_work_seconds() -> u32 {
    60
}

fn default_rest_seconds() -> u32 {
    90
}

fn default_adjust_step_seconds() -> u32 {
    10
}

/// Configuration for the workout pane.
///
/// # Example
///
/// ```
/// use workout_timer::config::TimerConfig;
///
/// let config = TimerConfig::default();
/// assert_eq!(config.work_seconds, 60);
/// assert_eq!(config.rest_seconds, 90);
/// assert!(!config.auto_rest);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Work duration in seconds (5-3600)
    #[serde(default = "default_work_seconds")]
    pub work_seconds: u32,

    /// Rest duration in seconds (5-3600)
    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u32,

    /// Whether a finished work countdown automatically starts the rest countdown
    #[serde(default)]
    pub auto_rest: bool,

    /// Seconds added or removed by a single adjustment (1-3600)
    #[serde(default = "default_adjust_step_seconds")]
    pub adjust_step_seconds: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_seconds: default_work_seconds(),
            rest_seconds: default_rest_seconds(),
            auto_rest: false,
            adjust_step_seconds: default_adjust_step_seconds(),
        }
    }
}

impl TimerConfig {
    /// Returns the configuration with the given work duration.
    #[must_use]
    pub fn with_work_seconds(mut self, seconds: u32) -> Self {
        self.work_seconds = seconds;
        self
    }

    /// Returns the configuration with the given rest duration.
    #[must_use]
    pub fn with_rest_seconds(mut self, seconds: u32) -> Self {
        self.rest_seconds = seconds;
        self
    }

    /// Returns the configuration with auto rest switched on or off.
    #[must_use]
    pub fn with_auto_rest(mut self, auto_rest: bool) -> Self {
        self.auto_rest = auto_rest;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` for the first setting outside its range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "work_seconds",
            self.work_seconds,
            MIN_DURATION_SECONDS,
            MAX_DURATION_SECONDS,
        )?;
        check_range(
            "rest_seconds",
            self.rest_seconds,
            MIN_DURATION_SECONDS,
            MAX_DURATION_SECONDS,
        )?;
        check_range(
            "adjust_step_seconds",
            self.adjust_step_seconds,
            1,
            MAX_DURATION_SECONDS,
        )?;
        Ok(())
    }

    /// Clamps a raw duration into the accepted work/rest range.
    pub fn clamp_duration(seconds: i64) -> u32 {
        let clamped = seconds.clamp(
            i64::from(MIN_DURATION_SECONDS),
            i64::from(MAX_DURATION_SECONDS),
        );
        // In range by construction.
        u32::try_from(clamped).unwrap_or(MAX_DURATION_SECONDS)
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// holds out-of-range values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(display.clone(), e.to_string()))?;
        let config: TimerConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(display, e.to_string()))?;
        config.validate()?;

        debug!(path = %path.display(), "loaded timer config");
        Ok(config)
    }

    /// Loads the explicit config file if given, otherwise the default file if
    /// it exists, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be loaded.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Returns the default config file path (`~/.workout-timer/config.json`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    mod defaults_tests {
        use super::*;

        #[test]
        fn test_default_config() {
            let config = TimerConfig::default();
            assert_eq!(config.work_seconds, 60);
            assert_eq!(config.rest_seconds, 90);
            assert!(!config.auto_rest);
            assert_eq!(config.adjust_step_seconds, 10);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_builders() {
            let config = TimerConfig::default()
                .with_work_seconds(45)
                .with_rest_seconds(15)
                .with_auto_rest(true);
            assert_eq!(config.work_seconds, 45);
            assert_eq!(config.rest_seconds, 15);
            assert!(config.auto_rest);
        }

        #[test]
        fn test_default_config_path_ends_with_file_name() {
            if let Some(path) = default_config_path() {
                assert!(path.ends_with(".workout-timer/config.json"));
            }
        }
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn test_work_too_short() {
            let config = TimerConfig::default().with_work_seconds(4);
            let err = config.validate().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::OutOfRange {
                    field: "work_seconds",
                    ..
                }
            ));
        }

        #[test]
        fn test_rest_too_long() {
            let config = TimerConfig::default().with_rest_seconds(3601);
            let err = config.validate().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::OutOfRange {
                    field: "rest_seconds",
                    ..
                }
            ));
        }

        #[test]
        fn test_zero_adjust_step_rejected() {
            let config = TimerConfig {
                adjust_step_seconds: 0,
                ..TimerConfig::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_bounds_are_inclusive() {
            let config = TimerConfig::default()
                .with_work_seconds(MIN_DURATION_SECONDS)
                .with_rest_seconds(MAX_DURATION_SECONDS);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_clamp_duration() {
            assert_eq!(TimerConfig::clamp_duration(-10), MIN_DURATION_SECONDS);
            assert_eq!(TimerConfig::clamp_duration(0), MIN_DURATION_SECONDS);
            assert_eq!(TimerConfig::clamp_duration(120), 120);
            assert_eq!(TimerConfig::clamp_duration(i64::MAX), MAX_DURATION_SECONDS);
        }
    }

    mod load_tests {
        use super::*;

        fn write_config(content: &str) -> tempfile::NamedTempFile {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(content.as_bytes()).unwrap();
            file
        }

        #[test]
        fn test_load_full_file() {
            let file = write_config(
                r#"{"work_seconds": 30, "rest_seconds": 20, "auto_rest": true, "adjust_step_seconds": 5}"#,
            );
            let config = TimerConfig::load(file.path()).unwrap();
            assert_eq!(config.work_seconds, 30);
            assert_eq!(config.rest_seconds, 20);
            assert!(config.auto_rest);
            assert_eq!(config.adjust_step_seconds, 5);
        }

        #[test]
        fn test_load_partial_file_uses_defaults() {
            let file = write_config(r#"{"auto_rest": true}"#);
            let config = TimerConfig::load(file.path()).unwrap();
            assert_eq!(config.work_seconds, 60);
            assert_eq!(config.rest_seconds, 90);
            assert!(config.auto_rest);
        }

        #[test]
        fn test_load_invalid_json() {
            let file = write_config("not json");
            let err = TimerConfig::load(file.path()).unwrap_err();
            assert!(matches!(err, ConfigError::Parse(_, _)));
        }

        #[test]
        fn test_load_out_of_range() {
            let file = write_config(r#"{"work_seconds": 1}"#);
            let err = TimerConfig::load(file.path()).unwrap_err();
            assert!(matches!(err, ConfigError::OutOfRange { .. }));
        }

        #[test]
        fn test_load_missing_file() {
            let dir = tempfile::tempdir().unwrap();
            let err = TimerConfig::load(&dir.path().join("missing.json")).unwrap_err();
            assert!(err.is_read_error());
        }

        #[test]
        fn test_load_or_default_with_explicit_path() {
            let file = write_config(r#"{"rest_seconds": 45}"#);
            let config = TimerConfig::load_or_default(Some(file.path())).unwrap();
            assert_eq!(config.rest_seconds, 45);
        }
    }
}
