//! Symbol to instrument dispatch.

use super::{
    AnyInstrument, Currency, Equity, Etf, GenericInstrument, MutualFund, TreasuryInstrument,
};
use crate::domain::classification::{Classification, classification_of};
use crate::domain::error::Result;
use crate::ports::market_data_port::MarketDataPort;
use log::debug;
use std::sync::Arc;

/// Fetches the provider record once, classifies it, and builds the matching
/// variant from that same record.
pub fn construct(port: &Arc<dyn MarketDataPort>, symbol: &str) -> Result<AnyInstrument> {
    let record = port.quote_record(symbol)?;
    let classification = classification_of(&record, symbol)?;
    debug!("Constructing {symbol} as {classification}");

    let port = Arc::clone(port);
    let instrument = match classification {
        Classification::Equity => AnyInstrument::Equity(Equity::from_record(port, symbol, record)?),
        Classification::ExchangeTradedFund => {
            AnyInstrument::Etf(Etf::from_record(port, symbol, record)?)
        }
        Classification::MutualFund => {
            AnyInstrument::MutualFund(MutualFund::from_record(port, symbol, record)?)
        }
        Classification::TreasuryInstrument => {
            AnyInstrument::Treasury(TreasuryInstrument::from_record(port, symbol, record)?)
        }
        Classification::Currency | Classification::Cryptocurrency => {
            AnyInstrument::Currency(Currency::from_record(port, symbol, record)?)
        }
        Classification::Generic => {
            AnyInstrument::Generic(GenericInstrument::from_record(port, symbol, record)?)
        }
    };
    Ok(instrument)
}
