//! Port traits: the boundaries to external collaborators.

pub mod config_port;
pub mod market_data_port;
pub mod social_port;
