//! Client construction options.

/// Configuration shared by all API clients.
///
/// Unset fields take documented defaults: a `reqwest` client with a 30
/// second timeout, and the compiled-in production base URL of the service
/// area the client talks to. The record is consumed at construction; clients
/// hold no other state.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Transport override, e.g. to add TLS settings or a cookie store.
    pub http: Option<reqwest::Client>,
    /// Base URL override. A trailing slash is trimmed.
    pub base_url: Option<String>,
}

impl ClientConfig {
    /// A config that only overrides the base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: None,
            base_url: Some(base_url.into()),
        }
    }
}
