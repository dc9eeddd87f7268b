//! Client for the terms-agreement service area.

use tally_wireformat::terms::{
    AgreementResponse, CheckAgreementsRequest, GetUsersAgreementsRequest, SaveAgreementResponses,
    SaveAgreements, TermsResponse,
};

use crate::config::ClientConfig;
use crate::connection::Connection;
use crate::error::Error;
use crate::DEFAULT_TERMS_URL;

/// Environment variable overriding the terms service base URL.
pub const TERMS_URL_VAR: &str = "TALLY_TERMS";

/// Client for listing, checking, and saving terms agreements.
///
/// The default base URL is resolved once, at construction: the
/// [`TERMS_URL_VAR`] environment variable when set and non-empty, else the
/// compiled-in production URL. An explicit `base_url` in the config always
/// wins.
#[derive(Debug, Clone)]
pub struct TermsClient {
    connection: Connection,
}

impl TermsClient {
    /// Creates a terms client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the default transport cannot be
    /// built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let default_url = std::env::var(TERMS_URL_VAR)
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_TERMS_URL.to_string());
        Ok(Self {
            connection: Connection::new(config, &default_url, "terms")?,
        })
    }

    /// The base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.connection.base_url()
    }

    /// Lists the agreements the caller has signed.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure.
    pub async fn get_users_agreements(&self) -> Result<Vec<AgreementResponse>, Error> {
        self.connection.send(&GetUsersAgreementsRequest).await
    }

    /// Returns the terms revisions from `request` the caller has not yet
    /// signed, with their content.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure.
    pub async fn get_unsigned_terms(
        &self,
        request: &CheckAgreementsRequest,
    ) -> Result<Vec<TermsResponse>, Error> {
        self.connection.send(request).await
    }

    /// Records the caller's agreement to the given terms revisions.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure.
    pub async fn save_agreement(
        &self,
        request: &SaveAgreements,
    ) -> Result<SaveAgreementResponses, Error> {
        self.connection.send(request).await
    }
}
