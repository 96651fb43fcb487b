use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use liq_ana_tracing::TraceConfig;
use serde::Deserialize;

use crate::error::AnalysisError;

pub const ENV_PREFIX: &str = "LIQANA";

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigLog {
    pub file_name_prefix: String,
    pub dir: String,
    pub level: String,
    pub flame: bool,
    pub console: bool,
}

impl TryFrom<ConfigLog> for TraceConfig {
    type Error = AnalysisError;

    fn try_from(log_cfg: ConfigLog) -> Result<Self, Self::Error> {
        TraceConfig::with_level_str(
            &log_cfg.file_name_prefix,
            &log_cfg.dir,
            &log_cfg.level,
            log_cfg.console,
            log_cfg.flame,
        )
        .map_err(|e| AnalysisError::InvalidParameter(e.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigStorage {
    pub data_dir: String,
    pub source_file: String,
    pub force_close_file: String,
    pub col_token_file: String,
    pub legacy_file: String,
}

impl ConfigStorage {
    pub fn source_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.source_file)
    }

    pub fn force_close_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.force_close_file)
    }

    pub fn col_token_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.col_token_file)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    pub log: ConfigLog,
    pub storage: ConfigStorage,
}

impl AnalysisConfig {
    /// Layers built-in defaults, `<dir>/<ENV>`, `<dir>/local` and `LIQANA_*` variables.
    /// Missing files are skipped.
    pub fn load(dir: &str) -> Result<Config, ConfigError> {
        let env = std::env::var("ENV").unwrap_or("default".into());
        Config::builder()
            .set_default("log.file_name_prefix", "liq-ana")?
            .set_default("log.dir", "logs")?
            .set_default("log.level", "INFO")?
            .set_default("log.flame", false)?
            .set_default("log.console", false)?
            .set_default("storage.data_dir", "data")?
            .set_default("storage.source_file", "liquidated_list.json")?
            .set_default("storage.force_close_file", "ana_force_close.json")?
            .set_default("storage.col_token_file", "ana_col_token.json")?
            .set_default("storage.legacy_file", "ForceClose_list.json")?
            .add_source(File::with_name(&format!("{}/{}", dir, env)).required(false))
            .add_source(File::with_name(&format!("{}/local", dir)).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__"))
            .build()
    }

    pub fn try_load(dir: &str) -> Result<Self, AnalysisError> {
        let config = Self::load(dir)?;
        Ok(config.try_deserialize()?)
    }
}
