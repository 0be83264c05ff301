// FofaSift - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for FofaSift configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Full path of the default config.toml
    /// (e.g. ~/.config/fofasift/config.toml or %APPDATA%\FofaSift\config\config.toml).
    pub config_file: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        let config_dir = match ProjectDirs::from("", "", constants::APP_ID) {
            Some(proj_dirs) => proj_dirs.config_dir().to_path_buf(),
            None => {
                tracing::warn!("Could not determine platform directories, using current directory");
                PathBuf::from(".")
            }
        };
        let config_file = config_dir.join(constants::CONFIG_FILE_NAME);

        tracing::debug!(config = %config_file.display(), "Platform paths resolved");

        Self { config_file }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[display]` section.
    pub display: DisplaySection,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Default output format: "table", "csv", "csv-strict" or "json".
    pub format: Option<String>,
    /// Directory for `--output auto` files.
    pub directory: Option<String>,
}

/// `[display]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Title column width in table output.
    pub max_title_width: Option<usize>,
}

/// How query results are written to stdout or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text table for terminals.
    #[default]
    Table,
    /// Delimited text (the CSV export contract).
    Csv,
    /// RFC 4180 CSV: as `Csv`, with embedded quotes doubled.
    CsvStrict,
    /// Pretty-printed JSON array.
    Json,
}

impl OutputFormat {
    /// Case-insensitive lookup; unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "csv" => Some(OutputFormat::Csv),
            "csv-strict" => Some(OutputFormat::CsvStrict),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Default output format when `--format` is not given.
    pub output_format: OutputFormat,
    /// Directory for automatically named exports. None = current directory.
    pub export_dir: Option<PathBuf>,
    /// Title column width in table output.
    pub max_title_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            output_format: OutputFormat::Table,
            export_dir: None,
            max_title_width: constants::DEFAULT_MAX_TITLE_WIDTH,
        }
    }
}

/// Load and validate the config file at the default location.
///
/// A missing file returns defaults with no warnings (first run). An
/// unreadable or unparseable file returns defaults with a warning, so the
/// tool still runs but the user is told why their settings were ignored.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    match load_config_strict(config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

/// Load and validate a config file the user named explicitly.
///
/// Unlike `load_config`, a missing or malformed file is an error. Values that
/// are out of range are still reported as warnings.
pub fn load_config_strict(config_path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    Ok(validate(raw))
}

/// Validate each field against named constants, accumulating all warnings.
fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "[logging] level".to_string(),
                    value: level.clone(),
                    expected: "error, warn, info, debug or trace".to_string(),
                }
                .to_string(),
            );
        }
    }

    // -- Export: format --
    if let Some(ref format) = raw.export.format {
        match OutputFormat::from_name(format) {
            Some(parsed) => config.output_format = parsed,
            None => warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "[export] format".to_string(),
                    value: format.clone(),
                    expected: "table, csv, csv-strict or json".to_string(),
                }
                .to_string(),
            ),
        }
    }

    // -- Export: directory --
    if let Some(ref dir) = raw.export.directory {
        if !dir.is_empty() {
            config.export_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Display: max_title_width --
    if let Some(width) = raw.display.max_title_width {
        if (constants::MIN_TITLE_WIDTH..=constants::MAX_TITLE_WIDTH).contains(&width) {
            config.max_title_width = width;
        } else {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "[display] max_title_width".to_string(),
                    value: width.to_string(),
                    expected: format!(
                        "{}-{} (default {})",
                        constants::MIN_TITLE_WIDTH,
                        constants::MAX_TITLE_WIDTH,
                        constants::DEFAULT_MAX_TITLE_WIDTH
                    ),
                }
                .to_string(),
            );
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}
