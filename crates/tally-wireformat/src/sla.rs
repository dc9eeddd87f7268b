//! SLA authorization wire entities and request descriptors.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::request::{ApiRequest, Method};

/// Requests an SLA authorization for a model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaRequest {
    /// UUID of the model the SLA applies to.
    #[serde(rename = "model")]
    pub model_uuid: String,
    /// Requested support level.
    #[serde(rename = "sla")]
    pub level: String,
    /// Budget to charge the support fee against.
    pub budget: String,
}

impl ApiRequest for SlaRequest {
    fn method(&self) -> Method {
        Method::Post
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/sla/authorize")
    }

    fn body(&self) -> Option<Value> {
        Some(json!(self))
    }
}

/// An SLA authorization granted by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaResponse {
    /// Owner the authorization was granted to.
    #[serde(default)]
    pub owner: String,
    /// Opaque authorization credential; passed through, never inspected.
    #[serde(default)]
    pub credentials: Value,
    /// Human-readable message accompanying the grant.
    #[serde(default)]
    pub message: String,
}
