//! Configuration validation.
//!
//! Reads and checks the `[market_data]` and `[holdings]` sections before any
//! provider is queried.

use crate::domain::error::{Result, TickerfolioError};
use crate::domain::quote_record::parse_decimal;
use crate::ports::config_port::ConfigPort;
use rust_decimal::Decimal;
use std::path::PathBuf;

pub const MARKET_DATA_SECTION: &str = "market_data";
pub const HOLDINGS_SECTION: &str = "holdings";

/// One `SYMBOL = quantity[, cost_basis]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldingSpec {
    pub symbol: String,
    pub quantity: Decimal,
    pub cost_basis: Option<Decimal>,
}

/// Directory holding `quotes.csv` and `history/`.
pub fn validate_market_data_config(config: &dyn ConfigPort) -> Result<PathBuf> {
    match config.get_string(MARKET_DATA_SECTION, "path") {
        Some(s) if !s.trim().is_empty() => Ok(PathBuf::from(s.trim())),
        _ => Err(TickerfolioError::ConfigMissing {
            section: MARKET_DATA_SECTION.to_string(),
            key: "path".to_string(),
        }),
    }
}

/// Holdings in symbol order. A missing section is an empty portfolio.
pub fn parse_holdings(config: &dyn ConfigPort) -> Result<Vec<HoldingSpec>> {
    config
        .keys(HOLDINGS_SECTION)
        .into_iter()
        .map(|symbol| {
            let raw = config
                .get_string(HOLDINGS_SECTION, &symbol)
                .unwrap_or_default();
            parse_holding_line(&symbol, &raw)
        })
        .collect()
}

fn parse_holding_line(symbol: &str, raw: &str) -> Result<HoldingSpec> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let (quantity, cost_basis) = match parts.as_slice() {
        [qty] => (*qty, None),
        [qty, cost] => (*qty, Some(*cost)),
        _ => return Err(invalid(symbol, "expected quantity[, cost_basis]")),
    };

    let quantity = parse_amount(symbol, quantity, "quantity")?;
    let cost_basis = cost_basis
        .map(|c| parse_amount(symbol, c, "cost_basis"))
        .transpose()?;

    Ok(HoldingSpec {
        symbol: symbol.to_string(),
        quantity,
        cost_basis,
    })
}

fn parse_amount(symbol: &str, raw: &str, what: &str) -> Result<Decimal> {
    let value = parse_decimal(raw)
        .ok_or_else(|| invalid(symbol, &format!("{what} '{raw}' is not a number")))?;
    if value < Decimal::ZERO {
        return Err(invalid(symbol, &format!("{what} must be non-negative")));
    }
    Ok(value)
}

fn invalid(symbol: &str, reason: &str) -> TickerfolioError {
    TickerfolioError::ConfigInvalid {
        section: HOLDINGS_SECTION.to_string(),
        key: symbol.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;
    use rust_decimal_macros::dec;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn market_data_path_is_read() {
        let config = make_config("[market_data]\npath = ./data\n");
        assert_eq!(
            validate_market_data_config(&config).unwrap(),
            PathBuf::from("./data")
        );
    }

    #[test]
    fn market_data_path_missing() {
        let config = make_config("[market_data]\npath =\n");
        let err = validate_market_data_config(&config).unwrap_err();
        assert!(matches!(err, TickerfolioError::ConfigMissing { key, .. } if key == "path"));
    }

    #[test]
    fn holdings_with_and_without_cost_basis() {
        let config = make_config(
            r#"
[holdings]
MSFT = 4
AAPL = 10, 1500.50
"#,
        );
        let holdings = parse_holdings(&config).unwrap();
        assert_eq!(
            holdings,
            vec![
                HoldingSpec {
                    symbol: "AAPL".into(),
                    quantity: dec!(10),
                    cost_basis: Some(dec!(1500.50)),
                },
                HoldingSpec {
                    symbol: "MSFT".into(),
                    quantity: dec!(4),
                    cost_basis: None,
                },
            ]
        );
    }

    #[test]
    fn missing_section_is_empty() {
        let config = make_config("[market_data]\npath = x\n");
        assert!(parse_holdings(&config).unwrap().is_empty());
    }

    #[test]
    fn non_numeric_quantity_fails() {
        let config = make_config("[holdings]\nAAPL = ten\n");
        let err = parse_holdings(&config).unwrap_err();
        assert!(matches!(err, TickerfolioError::ConfigInvalid { key, .. } if key == "AAPL"));
    }

    #[test]
    fn negative_cost_basis_fails() {
        let config = make_config("[holdings]\nAAPL = 1, -20\n");
        assert!(matches!(
            parse_holdings(&config).unwrap_err(),
            TickerfolioError::ConfigInvalid { .. }
        ));
    }

    #[test]
    fn too_many_fields_fails() {
        let config = make_config("[holdings]\nAAPL = 1, 2, 3\n");
        assert!(parse_holdings(&config).is_err());
    }

    #[test]
    fn empty_value_fails() {
        let config = make_config("[holdings]\nAAPL =\n");
        assert!(parse_holdings(&config).is_err());
    }
}
