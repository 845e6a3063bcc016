//! End-to-end conversion run: read trades, build the divider, convert, write.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    config::{AppConfig, DividerCfg},
    converter::BarConverter,
    divider::{BarRestriction, GoldBarCalc, GoldBarDivider, PriceDivider},
    io::{
        sink::sink_for,
        source::{read_gold_series_path, read_trades_path},
    },
    models::gold::GoldBar,
};

/// What a run did, for the one-line CLI report.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub trades: usize,
    pub bars: usize,
    pub divider: &'static str,
    pub output: PathBuf,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} trades -> {} bars ({} divider) -> {}",
            self.trades,
            self.bars,
            self.divider,
            self.output.display()
        )
    }
}

/// Load the gold reference series behind a [`GoldBarCalc`].
pub fn load_gold_calc(series: &Path, tz: Tz) -> anyhow::Result<GoldBarCalc> {
    let rows = read_gold_series_path(series, tz)
        .with_context(|| format!("read gold series {}", series.display()))?;
    Ok(GoldBarCalc::new(rows)?)
}

pub fn build_divider(cfg: &DividerCfg, tz: Tz) -> anyhow::Result<BarRestriction> {
    Ok(match cfg {
        DividerCfg::Price { restriction } => PriceDivider::new(*restriction).into(),
        DividerCfg::Gold {
            series,
            count,
            bar_type,
        } => {
            let gold_bars = GoldBar::try_new(*count, *bar_type)?;
            GoldBarDivider::new(load_gold_calc(series, tz)?, gold_bars).into()
        }
    })
}

pub fn run(cfg: &AppConfig) -> anyhow::Result<RunSummary> {
    let tz = cfg.timezone()?;
    let trades = read_trades_path(&cfg.input.trades, tz)
        .with_context(|| format!("read trades {}", cfg.input.trades.display()))?;
    let divider = build_divider(&cfg.divider, tz)?;
    let name = divider.name();

    let bars = BarConverter::new(divider)
        .make_custom_bars(&trades)
        .context("bar conversion failed")?;

    let written = sink_for(cfg.output.format, &cfg.output.path)
        .and_then(|mut sink| sink.write(&bars))
        .with_context(|| format!("write bars to {}", cfg.output.path.display()))?;

    let summary = RunSummary {
        trades: trades.len(),
        bars: written,
        divider: name,
        output: cfg.output.path.clone(),
    };
    info!(%summary, "run complete");
    Ok(summary)
}

/// Value of `gold_bar` at `at`, read from a series file.
pub fn gold_price(
    series: &Path,
    gold_bar: &GoldBar,
    at: DateTime<Utc>,
    tz: Tz,
) -> anyhow::Result<Decimal> {
    let calc = load_gold_calc(series, tz)?;
    Ok(calc.calc_gold_price(gold_bar, at)?)
}
