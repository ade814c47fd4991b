use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::CaseMode;

pub const CONFIG_ENV: &str = "ASK_CONFIG";
pub const VERBOSE_ENV: &str = "ASK_VERBOSE";
pub const LOG_FILE_ENV: &str = "ASK_LOG_FILE";

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub(crate) defaults: DefaultsConfig,
    #[serde(default)]
    pub(crate) log: LogConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct DefaultsConfig {
    #[serde(default)]
    pub(crate) case_sensitive: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct LogConfig {
    #[serde(default)]
    pub(crate) file: Option<String>,
    #[serde(default)]
    pub(crate) verbose: bool,
}

/// Environment inputs, captured once so callers can supply their own.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub config: Option<PathBuf>,
    pub verbose: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl EnvOverrides {
    pub fn from_process() -> Self {
        Self {
            config: env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()).map(PathBuf::from),
            verbose: env::var(VERBOSE_ENV).ok(),
            log_file: env::var_os(LOG_FILE_ENV).filter(|v| !v.is_empty()).map(PathBuf::from),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Settings {
    pub(crate) case_mode: CaseMode,
    pub(crate) verbose: bool,
    pub(crate) log_file: Option<PathBuf>,
}

impl Settings {
    /// Merges command line, environment and config file. Verbosity and the log
    /// file take the environment over the config file. Case sensitivity is on
    /// when either `-c` or the config file asks for it; neither can turn it off.
    /// A config file that cannot be loaded is reported and skipped.
    pub(crate) fn resolve(case_sensitive: bool, env: &EnvOverrides) -> Self {
        let config = match env.config.as_deref().map(load_config).transpose() {
            Ok(config) => config.unwrap_or_default(),
            Err(err) => {
                eprintln!("warn: {err:#}; using defaults");
                ConfigFile::default()
            }
        };

        let verbose = match env.verbose.as_deref() {
            Some(value) => !value.is_empty() && value != "0",
            None => config.log.verbose,
        };

        let config_dir = env.config.as_deref().and_then(Path::parent);
        let log_file = env.log_file.clone().or_else(|| {
            config.log.file.as_deref().map(|file| resolve_relative(file, config_dir))
        });

        Self {
            case_mode: CaseMode::from_flag(case_sensitive || config.defaults.case_sensitive),
            verbose,
            log_file,
        }
    }
}

pub(crate) fn load_config(config_path: &Path) -> Result<ConfigFile> {
    let config_text = fs::read_to_string(config_path)
        .with_context(|| format!("failed to read config: {}", config_path.display()))?;
    toml::from_str(&config_text)
        .with_context(|| format!("invalid TOML config: {}", config_path.display()))
}

fn resolve_relative(raw: &str, base: Option<&Path>) -> PathBuf {
    let path = PathBuf::from(raw);
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    }
}
