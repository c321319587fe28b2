//! End to end: INI config and CSV provider files on disk feeding a portfolio.

use rust_decimal_macros::dec;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tickerfolio::adapters::csv_market_data_adapter::CsvMarketDataAdapter;
use tickerfolio::adapters::file_config_adapter::FileConfigAdapter;
use tickerfolio::domain::classification::Classification;
use tickerfolio::domain::config_validation::validate_market_data_config;
use tickerfolio::domain::instrument::Instrument;
use tickerfolio::domain::period::{Duration, Interval};
use tickerfolio::domain::portfolio::Portfolio;
use tickerfolio::{ErrorKind, TickerfolioError};

const SPOT: [(&str, &str); 6] = [
    ("regularMarketVolume", "1000"),
    ("regularMarketOpen", "1"),
    ("regularMarketPreviousClose", "1"),
    ("regularMarketDayHigh", "1"),
    ("regularMarketDayLow", "1"),
    ("exchange", "TEST"),
];

fn write_quotes(dir: &Path) {
    let mut rows = vec!["symbol,field,value".to_string()];
    let mut push = |symbol: &str, fields: &[(&str, &str)]| {
        for (field, value) in fields.iter().chain(SPOT.iter()) {
            rows.push(format!("{symbol},{field},{value}"));
        }
        rows.push(format!("{symbol},symbol,{symbol}"));
    };
    push(
        "MSFT",
        &[
            ("quoteType", "EQUITY"),
            ("regularMarketPrice", "400"),
            ("shortName", "Microsoft"),
            ("marketCap", "3.1e12"),
        ],
    );
    push(
        "ETH-USD",
        &[
            ("quoteType", "CRYPTOCURRENCY"),
            ("regularMarketPrice", "3000"),
            ("shortName", "Ethereum USD"),
        ],
    );
    fs::write(dir.join("quotes.csv"), rows.join("\n")).unwrap();

    fs::create_dir(dir.join("history")).unwrap();
    fs::write(
        dir.join("history").join("MSFT.csv"),
        "date,open,high,low,close,volume,dividend,split\n\
         2024-01-02,370,375,365,372,100,,\n\
         2024-02-14,405,410,400,408,100,0.75,\n\
         2024-03-28,418,422,415,420,100,,\n",
    )
    .unwrap();
}

fn setup(holdings: &str) -> (TempDir, FileConfigAdapter) {
    let dir = TempDir::new().unwrap();
    write_quotes(dir.path());
    let ini = format!(
        "[market_data]\npath = {}\n\n[holdings]\n{}",
        dir.path().display(),
        holdings
    );
    (dir, FileConfigAdapter::from_string(&ini).unwrap())
}

fn provider(config: &FileConfigAdapter) -> Arc<CsvMarketDataAdapter> {
    let path = validate_market_data_config(config).unwrap();
    Arc::new(CsvMarketDataAdapter::new(path))
}

#[test]
fn portfolio_from_config_values_holdings() {
    let (_dir, config) = setup("MSFT = 10, 3500\nETH-USD = 2\n");
    let portfolio = Portfolio::from_config(provider(&config), &config).unwrap();

    assert_eq!(portfolio.len(), 2);
    assert_eq!(portfolio.value(), dec!(10000));
    assert_eq!(portfolio.returns(), dec!(6500));

    let rows = portfolio.diversification();
    assert_eq!(rows[0].classification, Classification::Equity);
    assert_eq!(rows[0].percentage, dec!(40));
    assert_eq!(rows[1].classification, Classification::Cryptocurrency);
    assert_eq!(rows[1].percentage, dec!(60));
}

#[test]
fn equity_reads_dividends_from_history_file() {
    let (_dir, config) = setup("MSFT = 1\n");
    let portfolio = Portfolio::from_config(provider(&config), &config).unwrap();
    let msft = portfolio.get("MSFT").unwrap().instrument.as_equity().unwrap();
    assert_eq!(msft.dividends().len(), 1);
    assert_eq!(msft.dividends()[0].amount, dec!(0.75));

    let monthly = msft
        .historical_data(Duration::Max, Interval::Month1)
        .unwrap();
    assert_eq!(monthly.len(), 3);
}

#[test]
fn csv_export_round_trips_through_reader() {
    let (_dir, config) = setup("MSFT = 10, 3500\nETH-USD = 2\n");
    let portfolio = Portfolio::from_config(provider(&config), &config).unwrap();

    let mut out = Vec::new();
    portfolio.write_csv(&mut out).unwrap();
    let mut rdr = csv::Reader::from_reader(out.as_slice());
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "ETH-USD");
    assert_eq!(&rows[0][2], "unavailable");
    assert_eq!(&rows[1][1], "EQUITY");
}

#[test]
fn unknown_holding_aborts_construction() {
    let (_dir, config) = setup("MSFT = 1\nNOPE = 1\n");
    let err = Portfolio::from_config(provider(&config), &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSymbol);
}

#[test]
fn malformed_holding_is_config_error() {
    let (_dir, config) = setup("MSFT = lots\n");
    let err = Portfolio::from_config(provider(&config), &config).unwrap_err();
    assert!(matches!(err, TickerfolioError::ConfigInvalid { .. }));
}

#[test]
fn config_file_on_disk() {
    let (dir, _) = setup("");
    let ini_path = dir.path().join("portfolio.ini");
    fs::write(
        &ini_path,
        format!(
            "[market_data]\npath = {}\n[holdings]\nETH-USD = 1.5, 4000\n",
            dir.path().display()
        ),
    )
    .unwrap();
    let config = FileConfigAdapter::from_file(&ini_path).unwrap();
    let portfolio = Portfolio::from_config(provider(&config), &config).unwrap();
    assert_eq!(portfolio.returns(), dec!(500));
    assert!(portfolio.to_string().contains("ETH-USD"));
}
