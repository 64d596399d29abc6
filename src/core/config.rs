//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.promptforge/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Environment lookups go through an injected closure (`resolve_with`), so
//! tests never touch the real process environment.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PromptForgeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub model: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TelemetryConfig {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL: &str = "gemini-flash-latest";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Low temperature keeps generated prompts conservative.
pub const GENERATION_TEMPERATURE: f64 = 0.2;
pub const GENERATION_MAX_OUTPUT_TOKENS: u32 = 3000;

// ============================================================================
// Resolved Config (concrete values)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub model_name: String,
    /// `None` means generation reports a configuration error and sends nothing.
    pub api_key: Option<String>,
    pub gemini_base_url: String,
    /// `None` disables the launch beacon.
    pub telemetry_endpoint: Option<String>,
}

/// Values supplied on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub model: Option<String>,
    pub no_telemetry: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.promptforge/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".promptforge").join("config.toml"))
}

/// Load config from `~/.promptforge/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PromptForgeConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PromptForgeConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PromptForgeConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PromptForgeConfig::default());
    }

    load_config_from(&path)
}

/// Parses the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<PromptForgeConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PromptForgeConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // api_key deliberately not logged
    debug!(
        "Config: model={:?}, base_url={:?}, telemetry={:?}",
        config.general.model, config.gemini.base_url, config.telemetry
    );
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# PromptForge Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# model = "gemini-flash-latest"      # Or set PROMPTFORGE_MODEL env var

# [gemini]
# api_key = "AIza..."                # Or set GEMINI_API_KEY env var
# base_url = "https://generativelanguage.googleapis.com/v1beta"

# [telemetry]
# enabled = true
# endpoint = "https://example.com/beacon"   # Or PROMPTFORGE_TELEMETRY_ENDPOINT
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve against the real process environment.
pub fn resolve(config: &PromptForgeConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `lookup` reads environment variables. Empty values count as unset.
pub fn resolve_with<F>(config: &PromptForgeConfig, cli: &CliOverrides, lookup: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let env = |key: &str| non_empty(lookup(key));

    // Model: CLI → env → config → default
    let model_name = non_empty(cli.model.clone())
        .or_else(|| env("PROMPTFORGE_MODEL"))
        .or_else(|| non_empty(config.general.model.clone()))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // API key: env → config
    let api_key = env("GEMINI_API_KEY").or_else(|| non_empty(config.gemini.api_key.clone()));

    // Base URL: env → config → default
    let gemini_base_url = env("GEMINI_BASE_URL")
        .or_else(|| non_empty(config.gemini.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    // Telemetry: CLI kill switch → config enabled flag → env → config endpoint
    let telemetry_enabled = !cli.no_telemetry && config.telemetry.enabled.unwrap_or(true);
    let telemetry_endpoint = if telemetry_enabled {
        env("PROMPTFORGE_TELEMETRY_ENDPOINT")
            .or_else(|| non_empty(config.telemetry.endpoint.clone()))
    } else {
        None
    };

    ResolvedConfig {
        model_name,
        api_key,
        gemini_base_url,
        telemetry_endpoint,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
