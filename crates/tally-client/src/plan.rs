//! Client for the rating-plan service area.

use serde_json::Value;

use tally_wireformat::plan::{AuthorizationRequest, GetAssociatedPlansRequest, Plan};

use crate::config::ClientConfig;
use crate::connection::Connection;
use crate::error::Error;
use crate::DEFAULT_URL;

/// Client for rating-plan queries and plan authorization.
#[derive(Debug, Clone)]
pub struct PlanClient {
    connection: Connection,
}

impl PlanClient {
    /// Creates a plan client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the default transport cannot be
    /// built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self {
            connection: Connection::new(config, DEFAULT_URL, "plan")?,
        })
    }

    /// The base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.connection.base_url()
    }

    /// Lists the plans offered for the given charm.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure.
    pub async fn get_associated_plans(&self, charm_url: &str) -> Result<Vec<Plan>, Error> {
        let request = GetAssociatedPlansRequest {
            charm_url: charm_url.to_string(),
        };
        self.connection.send(&request).await
    }

    /// Requests authorization to attach `plan_url` to a deployed service,
    /// returning the opaque authorization credential.
    ///
    /// The request is validated locally before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the identifiers are malformed, or a
    /// classified [`Error`] on any transport or server failure.
    pub async fn authorize(
        &self,
        model_uuid: &str,
        charm_url: &str,
        service_name: &str,
        plan_url: &str,
    ) -> Result<Value, Error> {
        let request = AuthorizationRequest {
            environment_uuid: model_uuid.to_string(),
            charm_url: charm_url.to_string(),
            service_name: service_name.to_string(),
            plan_url: plan_url.to_string(),
        };
        request.validate()?;
        self.connection.send(&request).await
    }
}
