//! Portfolio: a registry of holdings keyed by symbol, with derived valuation.

use crate::domain::classification::Classification;
use crate::domain::config_validation;
use crate::domain::error::{Result, TickerfolioError};
use crate::domain::instrument::factory;
use crate::domain::instrument::{AnyInstrument, Instrument};
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;
use log::info;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::sync::Arc;

pub const COST_BASIS_UNAVAILABLE: &str = "unavailable";

/// Quantity held and the total amount paid for it, when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Holding {
    pub quantity: Decimal,
    pub cost_basis: Option<Decimal>,
}

#[derive(Debug)]
pub struct Record {
    pub holding: Holding,
    pub instrument: AnyInstrument,
}

impl Record {
    /// Price × quantity. `Portfolio` only admits holdings whose product fits.
    pub fn value(&self) -> Decimal {
        self.instrument.price() * self.holding.quantity
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HoldingRow {
    pub symbol: String,
    pub classification: Classification,
    pub cost_basis: Option<Decimal>,
    pub quantity: Decimal,
    pub value: Decimal,
}

impl HoldingRow {
    pub fn cost_basis_text(&self) -> String {
        self.cost_basis
            .map(|c| c.to_string())
            .unwrap_or_else(|| COST_BASIS_UNAVAILABLE.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AllocationRow {
    pub classification: Classification,
    pub value: Decimal,
    /// Share of total portfolio value, 0..=100.
    pub percentage: Decimal,
}

pub struct Portfolio {
    port: Arc<dyn MarketDataPort>,
    records: BTreeMap<String, Record>,
}

impl Portfolio {
    pub fn new(port: Arc<dyn MarketDataPort>) -> Self {
        Self {
            port,
            records: BTreeMap::new(),
        }
    }

    /// Adds each `(symbol, quantity, cost_basis)` in order, stopping at the first failure.
    pub fn from_holdings<I, S>(port: Arc<dyn MarketDataPort>, holdings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Decimal, Option<Decimal>)>,
        S: AsRef<str>,
    {
        let mut portfolio = Self::new(port);
        for (symbol, quantity, cost_basis) in holdings {
            portfolio.add(symbol.as_ref(), quantity, cost_basis)?;
        }
        Ok(portfolio)
    }

    /// Builds from the `[holdings]` section: `SYMBOL = quantity[, cost_basis]`.
    pub fn from_config(port: Arc<dyn MarketDataPort>, config: &dyn ConfigPort) -> Result<Self> {
        let holdings = config_validation::parse_holdings(config)?;
        Self::from_holdings(
            port,
            holdings
                .into_iter()
                .map(|h| (h.symbol, h.quantity, h.cost_basis)),
        )
    }

    pub fn add(
        &mut self,
        symbol: &str,
        quantity: Decimal,
        cost_basis: Option<Decimal>,
    ) -> Result<()> {
        if self.records.contains_key(symbol) {
            return Err(TickerfolioError::DuplicateSymbol {
                symbol: symbol.to_string(),
            });
        }
        check_quantity(symbol, quantity)?;
        if let Some(cost) = cost_basis {
            check_cost_basis(symbol, cost)?;
        }

        if self.paid_with(symbol, cost_basis).is_none() {
            return Err(invalid_cost_basis(
                symbol,
                cost_basis.unwrap_or_default(),
                OVERFLOW,
            ));
        }

        let instrument = factory::construct(&self.port, symbol)?;
        if self.value_with(symbol, instrument.price(), quantity).is_none() {
            return Err(invalid_quantity(symbol, quantity, OVERFLOW));
        }
        info!(
            "Added {} {} ({}) to portfolio",
            quantity,
            symbol,
            instrument.classification()
        );
        self.records.insert(
            symbol.to_string(),
            Record {
                holding: Holding {
                    quantity,
                    cost_basis,
                },
                instrument,
            },
        );
        Ok(())
    }

    pub fn remove(&mut self, symbol: &str) -> Result<Holding> {
        let record = self
            .records
            .remove(symbol)
            .ok_or_else(|| not_found(symbol))?;
        info!("Removed {symbol} from portfolio");
        Ok(record.holding)
    }

    pub fn update_quantity(&mut self, symbol: &str, quantity: Decimal) -> Result<()> {
        let price = self
            .records
            .get(symbol)
            .ok_or_else(|| not_found(symbol))?
            .instrument
            .price();
        check_quantity(symbol, quantity)?;
        if self.value_with(symbol, price, quantity).is_none() {
            return Err(invalid_quantity(symbol, quantity, OVERFLOW));
        }
        if let Some(record) = self.records.get_mut(symbol) {
            record.holding.quantity = quantity;
        }
        Ok(())
    }

    pub fn update_cost_basis(&mut self, symbol: &str, cost_basis: Decimal) -> Result<()> {
        if !self.records.contains_key(symbol) {
            return Err(not_found(symbol));
        }
        check_cost_basis(symbol, cost_basis)?;
        if self.paid_with(symbol, Some(cost_basis)).is_none() {
            return Err(invalid_cost_basis(symbol, cost_basis, OVERFLOW));
        }
        if let Some(record) = self.records.get_mut(symbol) {
            record.holding.cost_basis = Some(cost_basis);
        }
        Ok(())
    }

    /// Total value with `symbol` priced at `price` × `quantity`, or `None` when
    /// the total, or the total scaled to a percentage, does not fit a `Decimal`.
    fn value_with(&self, symbol: &str, price: Decimal, quantity: Decimal) -> Option<Decimal> {
        let mut total = price.checked_mul(quantity)?;
        for (key, record) in &self.records {
            if key != symbol {
                total = total.checked_add(record.value())?;
            }
        }
        total.checked_mul(Decimal::ONE_HUNDRED)?;
        Some(total)
    }

    /// Total cost basis with `symbol` set to `cost_basis`, or `None` on overflow.
    fn paid_with(&self, symbol: &str, cost_basis: Option<Decimal>) -> Option<Decimal> {
        let mut paid = cost_basis.unwrap_or_default();
        for (key, record) in &self.records {
            if key != symbol {
                paid = paid.checked_add(record.holding.cost_basis.unwrap_or_default())?;
            }
        }
        Some(paid)
    }

    /// Σ price × quantity at the construction-time price snapshot.
    pub fn value(&self) -> Decimal {
        self.records.values().map(Record::value).sum()
    }

    /// `value()` minus the cost basis of holdings that have one. Holdings
    /// without a cost basis still count towards value.
    pub fn returns(&self) -> Decimal {
        let paid: Decimal = self
            .records
            .values()
            .filter_map(|r| r.holding.cost_basis)
            .sum();
        self.value() - paid
    }

    /// Value per classification and its share of the total. Percentages are
    /// zero when the portfolio is worth nothing.
    pub fn diversification(&self) -> Vec<AllocationRow> {
        let mut groups: BTreeMap<Classification, Decimal> = BTreeMap::new();
        for record in self.records.values() {
            *groups
                .entry(record.instrument.classification())
                .or_default() += record.value();
        }

        let total: Decimal = groups.values().copied().sum();
        groups
            .into_iter()
            .map(|(classification, value)| AllocationRow {
                classification,
                value,
                percentage: value
                    .checked_mul(Decimal::ONE_HUNDRED)
                    .and_then(|scaled| scaled.checked_div(total))
                    .unwrap_or(Decimal::ZERO),
            })
            .collect()
    }

    pub fn as_table(&self) -> Vec<HoldingRow> {
        self.records
            .iter()
            .map(|(symbol, record)| HoldingRow {
                symbol: symbol.clone(),
                classification: record.instrument.classification(),
                cost_basis: record.holding.cost_basis,
                quantity: record.holding.quantity,
                value: record.value(),
            })
            .collect()
    }

    pub fn get_instruments(&self) -> BTreeMap<&str, &AnyInstrument> {
        self.records
            .iter()
            .map(|(symbol, record)| (symbol.as_str(), &record.instrument))
            .collect()
    }

    pub fn get_entries(&self) -> BTreeMap<String, Holding> {
        self.records
            .iter()
            .map(|(symbol, record)| (symbol.clone(), record.holding))
            .collect()
    }

    pub fn get(&self, symbol: &str) -> Option<&Record> {
        self.records.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.records.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes [`Portfolio::as_table`] as CSV with a header row.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["symbol", "classification", "cost_basis", "quantity", "value"])
            .map_err(io::Error::from)?;
        for row in self.as_table() {
            wtr.write_record([
                row.symbol.clone(),
                row.classification.to_string(),
                row.cost_basis_text(),
                row.quantity.to_string(),
                row.value.to_string(),
            ])
            .map_err(io::Error::from)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn not_found(symbol: &str) -> TickerfolioError {
    TickerfolioError::SymbolNotFound {
        symbol: symbol.to_string(),
    }
}

const OVERFLOW: &str = "portfolio totals would overflow";

fn invalid_quantity(symbol: &str, quantity: Decimal, reason: &str) -> TickerfolioError {
    TickerfolioError::InvalidQuantity {
        symbol: symbol.to_string(),
        quantity,
        reason: reason.to_string(),
    }
}

fn invalid_cost_basis(symbol: &str, cost_basis: Decimal, reason: &str) -> TickerfolioError {
    TickerfolioError::InvalidCostBasis {
        symbol: symbol.to_string(),
        cost_basis,
        reason: reason.to_string(),
    }
}

fn check_quantity(symbol: &str, quantity: Decimal) -> Result<()> {
    if quantity < Decimal::ZERO {
        return Err(invalid_quantity(symbol, quantity, "must be non-negative"));
    }
    Ok(())
}

fn check_cost_basis(symbol: &str, cost_basis: Decimal) -> Result<()> {
    if cost_basis < Decimal::ZERO {
        return Err(invalid_cost_basis(symbol, cost_basis, "must be non-negative"));
    }
    Ok(())
}

impl fmt::Debug for Portfolio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Portfolio")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Portfolio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<12} {:<15} {:>14} {:>14} {:>16}",
            "Symbol", "Type", "Cost Basis", "Quantity", "Value"
        )?;
        writeln!(f, "{}", "-".repeat(75))?;
        for row in self.as_table() {
            writeln!(
                f,
                "{:<12} {:<15} {:>14} {:>14} {:>16}",
                row.symbol,
                row.classification,
                row.cost_basis_text(),
                row.quantity,
                row.value.round_dp(2)
            )?;
        }
        write!(f, "{:<12} {:>62}", "Total", self.value().round_dp(2))
    }
}
