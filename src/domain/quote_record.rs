//! Raw provider record: the key/value snapshot returned for a symbol.
//!
//! Values are kept as text and parsed on access so that every numeric field is
//! read into an exact [`Decimal`] without passing through floating point.

use crate::domain::error::{Result, TickerfolioError};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteRecord {
    fields: BTreeMap<String, String>,
}

impl QuoteRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Required text field; missing or blank values are a parsing failure.
    pub fn text(&self, symbol: &str, field: &str) -> Result<String> {
        match self.present(field) {
            Some(v) => Ok(v.to_string()),
            None => Err(TickerfolioError::parsing(symbol, field, "missing field")),
        }
    }

    pub fn optional_text(&self, field: &str) -> Option<String> {
        self.present(field).map(str::to_string)
    }

    /// Required numeric field.
    pub fn decimal(&self, symbol: &str, field: &str) -> Result<Decimal> {
        match self.optional_decimal(symbol, field)? {
            Some(v) => Ok(v),
            None => Err(TickerfolioError::parsing(symbol, field, "missing field")),
        }
    }

    /// Numeric field that may be absent; a present but non-numeric value is
    /// still a parsing failure.
    pub fn optional_decimal(&self, symbol: &str, field: &str) -> Result<Option<Decimal>> {
        let Some(raw) = self.present(field) else {
            return Ok(None);
        };
        parse_decimal(raw)
            .map(Some)
            .ok_or_else(|| TickerfolioError::parsing(symbol, field, format!("not a number: {raw}")))
    }

    fn present(&self, field: &str) -> Option<&str> {
        self.get(field)
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("none"))
    }
}

/// Accepts plain and scientific notation (`1.5e9`).
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
