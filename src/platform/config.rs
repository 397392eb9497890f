// VaporLog - platform/config.rs
//
// Optional config.toml loading with startup validation.
//
// The file lives in the platform config directory (XDG on Linux, AppData
// on Windows, Library on macOS, via the `directories` crate). A missing
// file is normal first-run behaviour; an unparseable file or an
// out-of-range value produces a non-fatal warning and falls back to the
// defaults, so a bad config never prevents a collection run.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolve the platform config directory for this application.
pub fn project_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", constants::APP_ID).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[discovery]` section.
    pub discovery: DiscoverySection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[discovery]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    /// Directory recursion depth when searching per-title data dirs.
    pub search_depth: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory recursion depth for log discovery.
    pub search_depth: usize,

    /// Log level from config (consumed by logging init, which gives the
    /// CLI flag and RUST_LOG priority over it).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search_depth: constants::DEFAULT_SEARCH_DEPTH,
            log_level: None,
        }
    }
}

/// Load and validate config.toml from the given config directory.
///
/// Returns the validated config plus a list of non-fatal warnings to log
/// once the logging subsystem is up.
pub fn load_config(config_dir: Option<&Path>) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let Some(config_dir) = config_dir else {
        return (AppConfig::default(), warnings);
    };
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    let mut config = AppConfig::default();

    if let Some(depth) = raw.discovery.search_depth {
        if (constants::MIN_SEARCH_DEPTH..=constants::ABSOLUTE_MAX_SEARCH_DEPTH)
            .contains(&depth)
        {
            config.search_depth = depth;
        } else {
            warnings.push(format!(
                "[discovery] search_depth = {depth} is out of range ({}-{}). Using default ({}).",
                constants::MIN_SEARCH_DEPTH,
                constants::ABSOLUTE_MAX_SEARCH_DEPTH,
                constants::DEFAULT_SEARCH_DEPTH,
            ));
        }
    }

    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    (config, warnings)
}

// =============================================================================
// Tests
// =============================================================================
