//! Grading configuration.
//!
//! Settings are passed per call; nothing here is global. The loader reads
//! an optional TOML file and applies environment overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::MatchMethod;

/// Default passing percentage.
pub const DEFAULT_PASSING_PERCENTAGE: f64 = 60.0;

/// How answers are compared and what score passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Comparison method for answers that are not a single option letter.
    #[serde(default)]
    pub method: MatchMethod,
    /// Similarity or keyword threshold in `[0, 1]`. Unset or out-of-range
    /// values use the method's default.
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Score percentage needed to pass, compared as given.
    #[serde(default = "default_passing_percentage")]
    pub passing_percentage: f64,
    /// Whether exact matching distinguishes case.
    #[serde(default)]
    pub case_sensitive: bool,
}

fn default_passing_percentage() -> f64 {
    DEFAULT_PASSING_PERCENTAGE
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            method: MatchMethod::Fuzzy,
            threshold: None,
            passing_percentage: default_passing_percentage(),
            case_sensitive: false,
        }
    }
}

impl GradingConfig {
    /// A config for `method` with an explicit threshold.
    pub fn new(method: MatchMethod, threshold: f64, passing_percentage: f64) -> Self {
        Self {
            method,
            threshold: Some(threshold),
            passing_percentage,
            case_sensitive: false,
        }
    }

    /// The threshold actually applied by the matching engine.
    pub fn effective_threshold(&self) -> f64 {
        match self.threshold {
            Some(t) if (0.0..=1.0).contains(&t) => t,
            _ => self.method.default_threshold(),
        }
    }

    /// The passing percentage actually applied.
    ///
    /// Used as given, so a pass mark above 100 can never be reached. Only
    /// NaN falls back to the default.
    pub fn effective_passing_percentage(&self) -> f64 {
        if self.passing_percentage.is_nan() {
            DEFAULT_PASSING_PERCENTAGE
        } else {
            self.passing_percentage
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(method) = std::env::var("SHEETGRADE_METHOD") {
            self.method = MatchMethod::from(method.as_str());
        }
        if let Some(t) = env_f64("SHEETGRADE_THRESHOLD") {
            self.threshold = Some(t);
        }
        if let Some(p) = env_f64("SHEETGRADE_PASSING_PERCENTAGE") {
            self.passing_percentage = p;
        }
    }
}

fn env_f64(name: &str) -> Option<f64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("ignoring {name}={raw}: not a number");
            None
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `sheetgrade.toml` in the current directory
/// 2. `~/.config/sheetgrade/config.toml`
///
/// Environment overrides: `SHEETGRADE_METHOD`, `SHEETGRADE_THRESHOLD`,
/// `SHEETGRADE_PASSING_PERCENTAGE`.
pub fn load_config() -> Result<GradingConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradingConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("sheetgrade.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_file(&path)?
        }
        None => GradingConfig::default(),
    };
    config.apply_env_overrides();
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<GradingConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<GradingConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("sheetgrade"))
}
