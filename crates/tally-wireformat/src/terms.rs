//! Terms-agreement wire entities and request descriptors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::request::{ApiRequest, Method};

/// An agreement a user has signed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementResponse {
    /// The user who signed.
    #[serde(default)]
    pub user: String,
    /// Name of the terms document.
    #[serde(default)]
    pub term: String,
    /// Signed revision of the terms document.
    #[serde(default)]
    pub revision: i64,
    /// When the agreement was recorded.
    #[serde(rename = "created-on", default)]
    pub created_on: Option<DateTime<Utc>>,
}

/// A terms document revision with its content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsResponse {
    /// Name of the terms document.
    #[serde(default)]
    pub name: String,
    /// Revision of the terms document.
    #[serde(default)]
    pub revision: i64,
    /// The document text.
    #[serde(default)]
    pub content: String,
}

/// One agreement to record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAgreement {
    /// Name of the terms document being agreed to.
    pub term: String,
    /// Revision being agreed to.
    pub revision: i64,
}

/// Records the caller's agreement to one or more terms revisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAgreements {
    /// The agreements to record.
    pub agreements: Vec<SaveAgreement>,
}

impl ApiRequest for SaveAgreements {
    fn method(&self) -> Method {
        Method::Post
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/agreement")
    }

    fn body(&self) -> Option<Value> {
        Some(json!(self))
    }
}

/// Response to saving agreements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAgreementResponses {
    /// The agreements that were recorded.
    #[serde(default)]
    pub agreements: Vec<AgreementResponse>,
}

/// Asks which of the named terms revisions the caller has not yet signed.
///
/// Terms are identified as `name/revision` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckAgreementsRequest {
    /// The terms revisions to check.
    pub terms: Vec<String>,
}

impl ApiRequest for CheckAgreementsRequest {
    fn method(&self) -> Method {
        Method::Get
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/agreement")
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.terms
            .iter()
            .map(|term| ("Terms", term.clone()))
            .collect()
    }
}

/// Lists the agreements the caller has signed.
#[derive(Debug, Clone, Copy)]
pub struct GetUsersAgreementsRequest;

impl ApiRequest for GetUsersAgreementsRequest {
    fn method(&self) -> Method {
        Method::Get
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/agreements")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.example.com/terms/v1";

    #[test]
    fn agreement_response_round_trips() {
        let agreement = AgreementResponse {
            user: "test-user".to_string(),
            term: "hello-world-terms".to_string(),
            revision: 1,
            created_on: Some(Utc::now()),
        };
        let encoded = serde_json::to_string(&agreement).unwrap();
        let decoded: AgreementResponse = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, agreement);
    }

    #[test]
    fn agreement_response_tolerates_missing_timestamp() {
        let decoded: AgreementResponse =
            serde_json::from_str(r#"{"user": "bob", "term": "t", "revision": 2}"#).unwrap();
        assert_eq!(decoded.revision, 2);
        assert!(decoded.created_on.is_none());
    }

    #[test]
    fn save_agreements_descriptor() {
        let r = SaveAgreements {
            agreements: vec![SaveAgreement {
                term: "hello-world-terms".to_string(),
                revision: 1,
            }],
        };
        assert_eq!(r.method(), Method::Post);
        assert_eq!(r.url(BASE), format!("{BASE}/agreement"));
        assert_eq!(
            r.body().unwrap(),
            json!({"agreements": [{"term": "hello-world-terms", "revision": 1}]})
        );
    }

    #[test]
    fn check_agreements_descriptor_repeats_terms() {
        let r = CheckAgreementsRequest {
            terms: vec![
                "hello-world-terms/1".to_string(),
                "hello-universe-terms/1".to_string(),
            ],
        };
        assert_eq!(r.method(), Method::Get);
        assert_eq!(r.url(BASE), format!("{BASE}/agreement"));
        assert_eq!(
            r.query(),
            vec![
                ("Terms", "hello-world-terms/1".to_string()),
                ("Terms", "hello-universe-terms/1".to_string()),
            ]
        );
        assert!(r.body().is_none());
    }

    #[test]
    fn users_agreements_descriptor() {
        let r = GetUsersAgreementsRequest;
        assert_eq!(r.method(), Method::Get);
        assert_eq!(r.url(BASE), format!("{BASE}/agreements"));
    }
}
