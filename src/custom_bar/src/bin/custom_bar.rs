use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use custom_bar::{
    config::{CONFIG_ENV, load_config_path},
    io::time::{parse_timestamp, parse_timezone},
    logging::{LogLevel, setup_logs},
    models::gold::{GoldBar, GoldBarType},
    pipeline,
};

#[derive(Parser)]
#[command(version, about = "Build custom dollar-value and gold-denominated bars")]
struct Cli {
    /// Overrides `[log] level` from the config
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Convert a trade table into custom bars as described by a config file
    Convert {
        #[arg(short, long, value_name = "FILE", env = CONFIG_ENV)]
        config: PathBuf,
    },
    /// Print the value of a gold denomination at a point in time
    GoldPrice {
        /// CSV with `date_time, close` (price per gram)
        #[arg(long, value_name = "FILE")]
        series: PathBuf,
        /// RFC-3339, or a naive timestamp read in `--timezone`
        #[arg(long)]
        at: String,
        #[arg(long, default_value_t = 1)]
        count: u32,
        #[arg(long, default_value = "kilogram")]
        bar_type: GoldBarType,
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Convert { config } => {
            let cfg = load_config_path(&config)?;
            setup_logs(cli.log_level.unwrap_or(cfg.log.level))?;
            let summary = pipeline::run(&cfg)?;
            eprintln!("{summary}");
        }
        Cmd::GoldPrice {
            series,
            at,
            count,
            bar_type,
            timezone,
        } => {
            setup_logs(cli.log_level.unwrap_or_default())?;
            let tz = parse_timezone(&timezone)?;
            let at = parse_timestamp(&at, tz).context("--at")?;
            let gold_bar = GoldBar::try_new(count, bar_type)?;
            let value = pipeline::gold_price(&series, &gold_bar, at, tz)?;
            println!("{value}");
        }
    }

    Ok(())
}
