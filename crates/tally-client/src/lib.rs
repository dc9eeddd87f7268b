//! Client SDK for the tally billing API.
//!
//! One client per service area: [`WalletClient`] for wallets and budgets,
//! [`PlanClient`] for rating plans, [`TermsClient`] for terms agreements,
//! and [`SlaClient`] for SLA authorizations. Every client is constructed
//! from a [`ClientConfig`] and classifies failures into a single typed
//! [`Error`].
//!
//! # Example
//!
//! ```no_run
//! use tally_client::{ClientConfig, WalletClient};
//!
//! # async fn example() -> Result<(), tally_client::Error> {
//! let client = WalletClient::new(ClientConfig::default())?;
//! let message = client.create_wallet("personal", "200").await?;
//! println!("{message}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod connection;
mod error;
mod plan;
mod sla;
mod terms;
mod wallet;

pub use config::ClientConfig;
pub use error::Error;
pub use tally_wireformat as wireformat;
pub use plan::PlanClient;
pub use sla::SlaClient;
pub use terms::{TermsClient, TERMS_URL_VAR};
pub use wallet::WalletClient;

/// Default base URL of the production billing API.
pub const DEFAULT_URL: &str = "https://api.tallyhq.io/billing/v3";

/// Default base URL of the production terms service.
pub const DEFAULT_TERMS_URL: &str = "https://api.tallyhq.io/terms/v1";
