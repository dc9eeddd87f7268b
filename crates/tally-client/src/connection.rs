//! The single request/response path shared by every API client.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use tally_wireformat::{ApiRequest, Method};

use crate::config::ClientConfig;
use crate::error::{classify_transport, Error, ErrorResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A configured transport bound to one service area.
#[derive(Debug, Clone)]
pub(crate) struct Connection {
    http: reqwest::Client,
    base_url: String,
    resource: &'static str,
}

impl Connection {
    /// Builds a connection from `config`, falling back to `default_url` and
    /// a default transport for unset fields.
    pub fn new(
        config: ClientConfig,
        default_url: &str,
        resource: &'static str,
    ) -> Result<Self, Error> {
        let http = match config.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .map_err(|err| Error::Configuration(err.to_string()))?,
        };
        let base_url = config
            .base_url
            .unwrap_or_else(|| default_url.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            http,
            base_url,
            resource,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one request and decodes the response, classifying any failure.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: &impl ApiRequest,
    ) -> Result<T, Error> {
        let url = request.url(&self.base_url);
        let mut builder = self.http.request(reqwest_method(request.method()), &url);
        let query = request.query();
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = request.body() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        tracing::debug!(method = request.method().as_str(), url = %url, "issuing request");
        let response = builder
            .send()
            .await
            .map_err(|err| classify_transport(self.resource, err))?;
        self.decode(response).await
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T, Error> {
        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(Error::ServiceUnavailable {
                resource: self.resource,
            });
        }

        let status_text = status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string();
        let body = response
            .text()
            .await
            .map_err(|err| classify_transport(self.resource, err))?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(resp) if resp.is_user_validation_failure() => Error::UserValidationFailed {
                    message: resp.error,
                },
                Ok(resp) => Error::Http {
                    status: status.as_u16(),
                    message: resp.error,
                },
                Err(_) => Error::MalformedResponse {
                    status: status_text,
                    body,
                },
            });
        }

        serde_json::from_str(&body).map_err(|_| Error::MalformedResponse {
            status: status_text,
            body,
        })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}
