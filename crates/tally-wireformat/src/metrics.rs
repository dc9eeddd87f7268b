//! Metric-batch wire entities for the usage collector.
//!
//! Batches of timestamped key/value metrics are tagged with the unit and
//! model that produced them; collector responses acknowledge batches per
//! model and carry per-unit statuses.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single metric sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// Metric key.
    pub key: String,
    /// Metric value.
    pub value: String,
    /// When the sample was taken.
    pub time: DateTime<Utc>,
}

/// A batch of metrics sent to the collector.
///
/// The model identifier is accepted under either `env-uuid` or `model-uuid`,
/// with `env-uuid` preferred when both are present. Serialization always
/// emits `env-uuid`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricBatch {
    /// Unique identifier of the batch.
    pub uuid: String,
    /// UUID of the model the metrics were gathered in.
    #[serde(rename = "env-uuid")]
    pub model_uuid: String,
    /// Unit that produced the metrics.
    #[serde(rename = "unit-name")]
    pub unit_name: String,
    /// Charm the unit runs.
    #[serde(rename = "charm-url")]
    pub charm_url: String,
    /// When the batch was created.
    pub created: Option<DateTime<Utc>>,
    /// The metric samples.
    pub metrics: Vec<Metric>,
    /// Opaque credentials blob authorizing the send.
    pub credentials: String,
}

impl<'de> Deserialize<'de> for MetricBatch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(default)]
            uuid: String,
            #[serde(rename = "env-uuid", default)]
            env_uuid: String,
            #[serde(rename = "model-uuid", default)]
            model_uuid: String,
            #[serde(rename = "unit-name", default)]
            unit_name: String,
            #[serde(rename = "charm-url", default)]
            charm_url: String,
            #[serde(default)]
            created: Option<DateTime<Utc>>,
            #[serde(default)]
            metrics: Vec<Metric>,
            #[serde(default)]
            credentials: String,
        }

        let wire = Wire::deserialize(deserializer)?;
        let model_uuid = if wire.env_uuid.is_empty() {
            wire.model_uuid
        } else {
            wire.env_uuid
        };
        Ok(MetricBatch {
            uuid: wire.uuid,
            model_uuid,
            unit_name: wire.unit_name,
            charm_url: wire.charm_url,
            created: wire.created,
            metrics: wire.metrics,
            credentials: wire.credentials,
        })
    }
}

/// Status reported for a single unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStatus {
    /// Status value.
    pub status: String,
    /// Additional detail.
    #[serde(default)]
    pub info: String,
}

/// Collector response data for one model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvResponse {
    /// Batches the collector acknowledged.
    #[serde(rename = "acks", default, skip_serializing_if = "Vec::is_empty")]
    pub acknowledged_batches: Vec<String>,
    /// Per-unit statuses.
    #[serde(
        rename = "unit-statuses",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub unit_statuses: BTreeMap<String, UnitStatus>,
}

/// Collector response data keyed by model UUID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentResponses(pub BTreeMap<String, EnvResponse>);

impl EnvironmentResponses {
    /// Adds `batch_uuid` to the acknowledged batches of `model_uuid`.
    pub fn ack(&mut self, model_uuid: &str, batch_uuid: &str) {
        self.0
            .entry(model_uuid.to_string())
            .or_default()
            .acknowledged_batches
            .push(batch_uuid.to_string());
    }

    /// Records the status of `unit_name` under `model_uuid`.
    pub fn set_status(&mut self, model_uuid: &str, unit_name: &str, status: &str, info: &str) {
        self.0
            .entry(model_uuid.to_string())
            .or_default()
            .unit_statuses
            .insert(
                unit_name.to_string(),
                UnitStatus {
                    status: status.to_string(),
                    info: info.to_string(),
                },
            );
    }

    /// Number of models with response data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any model has response data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The collector's response to a metric send.
///
/// Per-model data is accepted under either `env-responses` or
/// `model-responses`, with `env-responses` preferred when both are present
/// and non-empty. Serialization always emits `env-responses`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Response {
    /// Identifier correlating the response to the send.
    pub uuid: String,
    /// Per-model acknowledgements and statuses.
    #[serde(rename = "env-responses")]
    pub env_responses: EnvironmentResponses,
    /// Updated grace period, in nanoseconds.
    #[serde(rename = "new-grace-period")]
    pub new_grace_period: i64,
}

impl<'de> Deserialize<'de> for Response {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(default)]
            uuid: String,
            #[serde(rename = "env-responses", default)]
            env_responses: EnvironmentResponses,
            #[serde(rename = "model-responses", default)]
            model_responses: EnvironmentResponses,
            #[serde(rename = "new-grace-period", default)]
            new_grace_period: i64,
        }

        let wire = Wire::deserialize(deserializer)?;
        let env_responses = if wire.env_responses.is_empty() {
            wire.model_responses
        } else {
            wire.env_responses
        };
        Ok(Response {
            uuid: wire.uuid,
            env_responses,
            new_grace_period: wire.new_grace_period,
        })
    }
}
