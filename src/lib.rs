//! tickerfolio: typed financial instruments, technical indicators and portfolio valuation.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use rust_decimal_macros::dec;
//! use tickerfolio::adapters::csv_market_data_adapter::CsvMarketDataAdapter;
//! use tickerfolio::domain::portfolio::Portfolio;
//! use tickerfolio::ports::market_data_port::MarketDataPort;
//!
//! let port: Arc<dyn MarketDataPort> = Arc::new(CsvMarketDataAdapter::new("data".into()));
//! let mut portfolio = Portfolio::new(port);
//! portfolio.add("BTC-USD", dec!(1), Some(dec!(50000)))?;
//! println!("{portfolio}");
//! # Ok::<(), tickerfolio::TickerfolioError>(())
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use domain::error::{ErrorKind, Result, TickerfolioError};
