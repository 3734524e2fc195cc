use crate::{Error, Result};
use commentscope_engine::MatchMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "commentscope";
const FALLBACK_DIR: &str = ".commentscope";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. COMMENTSCOPE_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory
/// 4. ~/.commentscope/config.toml
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("COMMENTSCOPE_CONFIG") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join(APP_DIR).join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(FALLBACK_DIR).join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

/// Directory for the log file and report exports.
pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join(APP_DIR));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(FALLBACK_DIR));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub(crate) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How long the mock analysis takes
    pub delay_ms: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { delay_ms: 6000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    pub step_interval_ms: u64,
    pub max_step: u8,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: 2000,
            max_step: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject links with anything but query parameters or a fragment after the id
    pub strict: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter for every command. Unset means `info` for the viewer's log
    /// file and `warn` for commands that log to stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        resolve_config_path(None)
    }

    pub fn validate(&self) -> Result<()> {
        if self.loading.step_interval_ms == 0 {
            return Err(Error::Config(
                "loading.step_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.loading.max_step == 0 {
            return Err(Error::Config(
                "loading.max_step must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis.delay_ms)
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.loading.step_interval_ms)
    }

    pub fn match_mode(&self) -> MatchMode {
        if self.validation.strict {
            MatchMode::Strict
        } else {
            MatchMode::Prefix
        }
    }

    /// Where exported reports go, falling back to `<data dir>/exports`.
    pub fn export_dir(&self) -> Result<PathBuf> {
        match &self.export.dir {
            Some(dir) => Ok(expand_tilde(&dir.to_string_lossy())),
            None => Ok(resolve_data_dir()?.join("exports")),
        }
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        match &self.log.file {
            Some(file) => Ok(expand_tilde(&file.to_string_lossy())),
            None => Ok(resolve_data_dir()?.join("commentscope.log")),
        }
    }
}
