//! Rating-plan wire entities and request descriptors.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::request::{ApiRequest, Method};

/// An ISV-created rating plan and the charm URLs it is valid for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Name of the rating plan.
    pub url: String,
    /// The rating plan definition.
    #[serde(rename = "plan")]
    pub definition: String,
    /// When the plan was created, as an RFC3339 timestamp.
    #[serde(rename = "created-on", default)]
    pub created_on: String,
}

/// A local precondition failure detected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Why the value was rejected.
    pub message: String,
}

impl ValidationError {
    /// A validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Requests authorization to attach a rating plan to a service.
///
/// Older servers send `env-uuid` and `service-name`; newer ones `model-uuid`
/// and `application-name`. Both decode into the same fields, with the
/// `env-uuid`/`service-name` spelling preferred when both are present.
/// Serialization always emits the preferred spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorizationRequest {
    /// UUID of the model the service is deployed in.
    #[serde(rename = "env-uuid")]
    pub environment_uuid: String,
    /// The charm the service runs.
    #[serde(rename = "charm-url")]
    pub charm_url: String,
    /// Name of the deployed service.
    #[serde(rename = "service-name")]
    pub service_name: String,
    /// The plan being requested.
    #[serde(rename = "plan-url")]
    pub plan_url: String,
}

impl<'de> Deserialize<'de> for AuthorizationRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(rename = "env-uuid", default)]
            environment_uuid: String,
            #[serde(rename = "model-uuid", default)]
            model_uuid: String,
            #[serde(rename = "charm-url", default)]
            charm_url: String,
            #[serde(rename = "service-name", default)]
            service_name: String,
            #[serde(rename = "application-name", default)]
            application_name: String,
            #[serde(rename = "plan-url", default)]
            plan_url: String,
        }

        let wire = Wire::deserialize(deserializer)?;
        let environment_uuid = if wire.environment_uuid.is_empty() {
            wire.model_uuid
        } else {
            wire.environment_uuid
        };
        let service_name = if wire.service_name.is_empty() {
            wire.application_name
        } else {
            wire.service_name
        };
        Ok(AuthorizationRequest {
            environment_uuid,
            charm_url: wire.charm_url,
            service_name,
            plan_url: wire.plan_url,
        })
    }
}

impl AuthorizationRequest {
    /// Checks the request for errors before it is sent.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the environment UUID, service name,
    /// charm URL, or plan URL is missing or malformed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_valid_uuid(&self.environment_uuid) {
            return Err(ValidationError::new(format!(
                "invalid environment UUID: {:?}",
                self.environment_uuid
            )));
        }
        if self.service_name.is_empty() {
            return Err(ValidationError::new("undefined service name"));
        }
        if !is_valid_service_name(&self.service_name) {
            return Err(ValidationError::new(format!(
                "invalid service name: {:?}",
                self.service_name
            )));
        }
        if self.charm_url.is_empty() {
            return Err(ValidationError::new("undefined charm url"));
        }
        if !is_valid_charm_url(&self.charm_url) {
            return Err(ValidationError::new(format!(
                "invalid charm url: {:?}",
                self.charm_url
            )));
        }
        if self.plan_url.is_empty() {
            return Err(ValidationError::new("undefined plan url"));
        }
        Ok(())
    }
}

impl ApiRequest for AuthorizationRequest {
    fn method(&self) -> Method {
        Method::Post
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/plan/authorize")
    }

    fn body(&self) -> Option<Value> {
        Some(json!(self))
    }
}

/// Lists the plans offered for a charm.
#[derive(Debug, Clone)]
pub struct GetAssociatedPlansRequest {
    /// The charm to look up plans for.
    pub charm_url: String,
}

impl ApiRequest for GetAssociatedPlansRequest {
    fn method(&self) -> Method {
        Method::Get
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/plan")
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("charm-url", self.charm_url.clone())]
    }
}

/// Whether `s` is a canonical hyphenated lowercase UUID.
#[must_use]
pub fn is_valid_uuid(s: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
            .expect("valid regex")
    });
    re.is_match(s)
}

/// Whether `s` is a well-formed service/application name: lowercase
/// alphanumeric segments joined by single hyphens, each segment containing at
/// least one letter, starting with a letter.
#[must_use]
pub fn is_valid_service_name(s: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[a-z][a-z0-9]*(?:-[a-z0-9]*[a-z][a-z0-9]*)*$").expect("valid regex")
    });
    re.is_match(s)
}

/// Whether `s` is a well-formed charm reference in either accepted grammar:
/// the legacy series-qualified form `cs:[~user/]series/name[-revision]` or
/// the current form `cs:[~user/]name[-revision]`.
#[must_use]
pub fn is_valid_charm_url(s: &str) -> bool {
    static LEGACY: OnceLock<Regex> = OnceLock::new();
    static CURRENT: OnceLock<Regex> = OnceLock::new();
    let legacy = LEGACY.get_or_init(|| {
        Regex::new(
            r"^cs:(?:~[a-z0-9][a-z0-9.+-]*/)?[a-z]+/[a-z][a-z0-9]*(?:-[a-z0-9]*[a-z][a-z0-9]*)*(?:-[0-9]+)?$",
        )
        .expect("valid regex")
    });
    let current = CURRENT.get_or_init(|| {
        Regex::new(
            r"^cs:(?:~[a-z0-9][a-z0-9.+-]*/)?[a-z][a-z0-9]*(?:-[a-z0-9]*[a-z][a-z0-9]*)*(?:-[0-9]+)?$",
        )
        .expect("valid regex")
    });
    legacy.is_match(s) || current.is_match(s)
}
