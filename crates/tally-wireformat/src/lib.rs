//! Wire entities and request descriptors for the tally billing API.
//!
//! Each module covers one service area: wallets and budgets, rating plans,
//! terms agreements, SLA authorizations, and metric batches. Types here are
//! plain data records with (de)serialization and, where presentation needs
//! it, a deterministic order. They perform no I/O; the `tally-client` crate
//! sends them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod metrics;
pub mod plan;
pub mod request;
pub mod sla;
pub mod terms;
pub mod wallet;

pub use request::{ApiRequest, Method};
