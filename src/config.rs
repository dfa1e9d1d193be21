use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::parser::CyclesFormat;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    pub installer: InstallerConfig,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstallerConfig {
    pub program: String,
    pub network: Option<String>,
    #[serde(default)]
    pub extra_args: Vec<String>,
    pub cycles_format: CyclesFormat,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            program: "dfx".to_string(),
            network: None,
            extra_args: Vec::new(),
            cycles_format: CyclesFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Text,
    Json,
}

/// Load settings, layering an optional TOML file over the built-in defaults
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut builder = config::Config::builder()
        .set_default("installer.program", "dfx")?
        .set_default("installer.cycles_format", "json")?
        .set_default("log.level", "warn")?
        .set_default("log.format", "text")?;
    if let Some(path) = path {
        builder = builder.add_source(
            config::File::new(&path.to_string_lossy(), config::FileFormat::Toml).required(true),
        );
    }

    let cfg: Settings = builder.build()?.try_deserialize()?;
    cfg.validate()?;

    Ok(cfg)
}

impl Settings {
    /// Reject values the installer or the log filter cannot use
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.installer.program.trim().is_empty() {
            anyhow::bail!("installer.program cannot be empty");
        }

        if let Some(network) = &self.installer.network {
            if network.trim().is_empty() {
                anyhow::bail!("installer.network cannot be empty when set");
            }
        }

        if let Err(e) = EnvFilter::try_new(&self.log.level) {
            anyhow::bail!("Invalid log.level '{}': {}", self.log.level, e);
        }

        Ok(())
    }
}
