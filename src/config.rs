//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::assistant::{ResponseCatalog, StudentProfile, GREETING};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Per-field overrides of the canned replies
    #[serde(default)]
    pub responses: ResponseCatalog,

    /// Student context and interests for the tutoring prompt
    #[serde(default)]
    pub profile: StudentProfile,
}

/// Chat assistant behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Pause before the bot reply is appended
    #[serde(default = "default_response_delay")]
    pub response_delay_ms: u64,

    /// Opening bot message of a new chat
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

fn default_response_delay() -> u64 {
    1500
}

fn default_greeting() -> String {
    GREETING.to_string()
}

impl AssistantConfig {
    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: default_response_delay(),
            greeting: default_greeting(),
        }
    }
}

/// Where chat exports are written
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub dir: String,
}

fn default_export_dir() -> String {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string())
}

impl ExportConfig {
    /// Export directory with a leading `~` expanded
    pub fn path(&self) -> PathBuf {
        match self.dir.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.dir)),
            None => PathBuf::from(&self.dir),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("tutorly").join("config.toml")),
            Some(PathBuf::from("./tutorly.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(delay) = std::env::var("TUTORLY_RESPONSE_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                self.assistant.response_delay_ms = ms;
            }
        }

        if let Ok(dir) = std::env::var("TUTORLY_EXPORT_DIR") {
            self.export.dir = dir;
        }

        if let Ok(level) = std::env::var("TUTORLY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TUTORLY_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Tutorly Configuration
#
# Environment variables override these settings:
# - TUTORLY_RESPONSE_DELAY_MS
# - TUTORLY_EXPORT_DIR
# - TUTORLY_LOG_LEVEL
# - TUTORLY_LOG_FORMAT

[assistant]
# Pause before the assistant replies (ms)
response_delay_ms = 1500

# Opening message of a new chat
# greeting = "Hello! I'm your learning assistant. How can I help you today?"

[export]
# Directory chat exports are written to
dir = "~/Downloads"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Override any canned reply. Keys: summary, notes, quiz, explanation,
# video_help, course_recommendation, progress_summary, achievement_summary,
# generic_help, fallback
[responses]
# fallback = "Ask me about courses, progress, achievements or videos."

# Student profile used by the tutoring prompt
[profile]
# context = "a student"
# likes = "learning"
"#
    .to_string()
}
