//! Client for the SLA service area.

use tally_wireformat::sla::{SlaRequest, SlaResponse};

use crate::config::ClientConfig;
use crate::connection::Connection;
use crate::error::Error;
use crate::DEFAULT_URL;

/// Client for SLA authorizations.
#[derive(Debug, Clone)]
pub struct SlaClient {
    connection: Connection,
}

impl SlaClient {
    /// Creates an SLA client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the default transport cannot be
    /// built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self {
            connection: Connection::new(config, DEFAULT_URL, "sla")?,
        })
    }

    /// The base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.connection.base_url()
    }

    /// Obtains an SLA authorization for a model at the given support level,
    /// charged against `budget`.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure;
    /// [`Error::UserValidationFailed`] signals a credential rejection the
    /// caller can react to.
    pub async fn authorize(
        &self,
        model_uuid: &str,
        support_level: &str,
        budget: &str,
    ) -> Result<SlaResponse, Error> {
        let request = SlaRequest {
            model_uuid: model_uuid.to_string(),
            level: support_level.to_string(),
            budget: budget.to_string(),
        };
        self.connection.send(&request).await
    }
}
