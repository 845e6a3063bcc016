//! Run configuration: parsing, validation, and path resolution.
//!
//! A run is described by a small TOML file:
//! - `[input]`: the trade table and the zone used for naive timestamps
//! - `[output]`: where the bars go and in which format
//! - `[divider]`: which threshold strategy to use (`kind = "price"` or `kind = "gold"`)
//! - `[log]`: default log level for the binary
//!
//! Entrypoints:
//! - Parse + validate from a TOML string: [`load_config_str`]
//! - Parse + validate from a file path, resolving relative paths against the file's
//!   directory: [`load_config_path`]

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use toml::from_str;

use crate::{
    io::{
        sink::{OutputFormat, STDOUT_PATH},
        time::parse_timezone,
    },
    logging::LogLevel,
    models::gold::{GoldBar, GoldBarType},
};

/// Environment variable consulted for the config path when `--config` is absent.
pub const CONFIG_ENV: &str = "CUSTOM_BAR_CONFIG";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub input: InputCfg,
    #[serde(default)]
    pub output: OutputCfg,
    pub divider: DividerCfg,
    #[serde(default)]
    pub log: LogCfg,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InputCfg {
    /// CSV with `date_time, open, high, low, close, volume` columns.
    pub trades: PathBuf,
    /// IANA zone for timestamps without an offset (e.g. "America/New_York").
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputCfg {
    /// Destination file; `-` writes to stdout.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputCfg {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: OutputFormat::default(),
        }
    }
}

/// Threshold strategy, tagged by `kind`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum DividerCfg {
    /// Fixed dollar threshold per bar.
    Price { restriction: Decimal },
    /// Threshold = value of `count × bar_type` of gold at each bar's open.
    Gold {
        /// CSV with `date_time, close` columns (price per gram).
        series: PathBuf,
        #[serde(default = "default_count")]
        count: u32,
        bar_type: GoldBarType,
    },
}

impl DividerCfg {
    pub fn gold_bar(&self) -> anyhow::Result<Option<GoldBar>> {
        match self {
            DividerCfg::Price { .. } => Ok(None),
            DividerCfg::Gold {
                count, bar_type, ..
            } => Ok(Some(GoldBar::try_new(*count, *bar_type)?)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogCfg {
    #[serde(default)]
    pub level: LogLevel,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from(STDOUT_PATH)
}

fn default_count() -> u32 {
    1
}

impl AppConfig {
    pub fn timezone(&self) -> anyhow::Result<Tz> {
        parse_timezone(&self.input.timezone).context("input.timezone")
    }

    /// Make relative input/output paths relative to `base` instead of the working directory.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() && p.as_os_str() != STDOUT_PATH {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.input.trades);
        resolve(&mut self.output.path);
        if let DividerCfg::Gold { series, .. } = &mut self.divider {
            resolve(series);
        }
    }
}

/// Checks the parts serde cannot: zone names and gold counts.
pub fn validate_config(cfg: &AppConfig) -> anyhow::Result<()> {
    cfg.timezone()?;
    cfg.divider.gold_bar().context("divider")?;
    if cfg.input.trades.as_os_str().is_empty() {
        bail!("input.trades must not be empty");
    }
    Ok(())
}

/// Parse and validate a config TOML string. Paths are left as written.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<AppConfig> {
    let cfg: AppConfig = from_str(toml_str).context("failed to parse config TOML")?;
    validate_config(&cfg).context("invalid config")?;
    Ok(cfg)
}

/// Read a config file, parse, validate and resolve relative paths against its directory.
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<AppConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    let mut cfg = load_config_str(&text)?;
    if let Some(dir) = path.parent() {
        cfg.resolve_paths(dir);
    }
    Ok(cfg)
}
