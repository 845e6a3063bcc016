mod common;

use chrono_tz::Tz;
use common::{TRADES_CSV, minute, write_file};
use custom_bar::{
    config::load_config_path,
    converter::BarConverter,
    divider::PriceDivider,
    io::source::read_trades,
    models::{bar_series::PriceBarSeries, gold::GoldBar},
    pipeline,
};
use rust_decimal_macros::dec;

#[test]
fn price_run_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "trades.csv", TRADES_CSV);
    let config = write_file(
        dir.path(),
        "run.toml",
        r#"
        [input]
        trades = "trades.csv"

        [output]
        path = "bars.csv"

        [divider]
        kind = "price"
        restriction = "2020"
        "#,
    );

    let cfg = load_config_path(&config).unwrap();
    let summary = pipeline::run(&cfg).unwrap();
    assert_eq!(summary.trades, 4);
    assert_eq!(summary.bars, 2);
    assert_eq!(summary.divider, "price");

    let written = std::fs::read_to_string(dir.path().join("bars.csv")).unwrap();
    assert_eq!(
        written,
        "\
date_time,open,high,low,close,volume
2023-01-01T10:00:00Z,100.0,106.0,95.0,103.0,20
2023-01-01T10:02:00Z,102.0,108.0,97.0,105.0,20
"
    );
}

#[test]
fn gold_run_tracks_reference_price() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "trades.csv", TRADES_CSV);
    // 1 kg at 2.02/g = 2020 until 10:02, then 1 kg at 1/g = 1000
    write_file(
        dir.path(),
        "gold.csv",
        "date_time,close\n2023-01-01 09:00:00,2.02\n2023-01-01 10:02:00,1\n",
    );
    let config = write_file(
        dir.path(),
        "run.toml",
        r#"
        [input]
        trades = "trades.csv"

        [output]
        path = "bars.json"
        format = "json"

        [divider]
        kind = "gold"
        series = "gold.csv"
        bar_type = "kg"
        "#,
    );

    let cfg = load_config_path(&config).unwrap();
    let summary = pipeline::run(&cfg).unwrap();
    assert_eq!(summary.divider, "gold");
    assert_eq!(summary.bars, 3);

    let bars: PriceBarSeries =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("bars.json")).unwrap())
            .unwrap();
    assert_eq!(bars.index(), vec![minute(0), minute(2), minute(3)]);
    let volumes: Vec<_> = bars.iter().map(|b| b.volume).collect();
    assert_eq!(volumes, vec![dec!(20), dec!(10), dec!(10)]);
}

#[test]
fn trades_before_gold_series_fail() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "trades.csv", TRADES_CSV);
    write_file(dir.path(), "gold.csv", "date_time,close\n2023-01-02,60\n");
    let config = write_file(
        dir.path(),
        "run.toml",
        r#"
        [input]
        trades = "trades.csv"
        [output]
        path = "bars.csv"
        [divider]
        kind = "gold"
        series = "gold.csv"
        bar_type = "gram"
        "#,
    );

    let cfg = load_config_path(&config).unwrap();
    let err = pipeline::run(&cfg).unwrap_err();
    assert!(format!("{err:#}").contains("no gold reference price"));
    assert!(!dir.path().join("bars.csv").exists());
}

#[test]
fn missing_volume_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "trades.csv",
        "date_time,open,high,low,close\n2023-01-01 10:00:00,1,1,1,1\n",
    );
    let config = write_file(
        dir.path(),
        "run.toml",
        "[input]\ntrades = \"trades.csv\"\n[divider]\nkind = \"price\"\nrestriction = 1\n",
    );

    let cfg = load_config_path(&config).unwrap();
    let err = pipeline::run(&cfg).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("read trades"));
    assert!(msg.contains("missing required column: volume"));
}

#[test]
fn gold_price_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let series = write_file(
        dir.path(),
        "gold.csv",
        "date_time,close\n2023-01-01 09:00:00,60\n2023-01-01 11:00:00,61\n",
    );
    let oz: GoldBar = "oz".parse().unwrap();
    let value = pipeline::gold_price(&series, &oz, minute(30), Tz::UTC).unwrap();
    assert_eq!(value.to_string(), "1866.2086");
}

#[test]
fn converted_series_snapshot() {
    let trades = read_trades(TRADES_CSV.as_bytes(), Tz::UTC).unwrap();
    let bars = BarConverter::new(PriceDivider::new(dec!(3000)))
        .make_custom_bars(&trades)
        .unwrap();
    insta::assert_json_snapshot!(bars, @r###"
    [
      {
        "date_time": "2023-01-01T10:00:00Z",
        "open": "100.0",
        "high": "107.0",
        "low": "95.0",
        "close": "104.0",
        "volume": "30"
      },
      {
        "date_time": "2023-01-01T10:03:00Z",
        "open": "103.0",
        "high": "108.0",
        "low": "98.0",
        "close": "105.0",
        "volume": "10"
      }
    ]
    "###);
}
