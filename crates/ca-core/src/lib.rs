//! Core domain logic for the current record analyzer.
//!
//! This crate contains the fundamental types and logic for:
//! - Parsing: validating monitor log text into a [`Series`]
//! - Time resolution: converting between timestamps, date-time text and runtime offsets
//! - Queries: interpolating channel integrals and computing net charge over a window

pub mod channel;
pub mod parser;
pub mod query;
mod series;
pub mod time;

pub use channel::{Channel, UnknownChannel};
pub use parser::{DUAL_CHANNEL_HEADER, ParseError, SESSION_MARKER, SINGLE_CHANNEL_HEADER, parse};
pub use query::{
    Boundary, ChargeResult, ChargeWindow, QueryError, charge_between, compute_charge,
    compute_charge_in, value_at,
};
pub use series::{Sample, Series};
pub use time::TimeInput;
