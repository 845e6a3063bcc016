use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// `RUST_LOG` directives, with `log_level` as the base level.
pub fn build_env_filter(log_level: LogLevel) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(log_level.as_level_filter().into())
}

/// Install the global fmt subscriber. Logs go to stderr so stdout stays free for bars.
pub fn setup_logs(log_level: LogLevel) -> anyhow::Result<()> {
    let subscriber = fmt()
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_env_filter(build_env_filter(log_level))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Cannot setup_logs")?;
    Ok(())
}
