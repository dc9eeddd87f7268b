//! Terms base-URL environment override tests.
//!
//! Kept in their own binary so the process environment is not shared with
//! unrelated tests.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tally_client::{ClientConfig, TermsClient, TERMS_URL_VAR};

#[tokio::test]
async fn env_override_is_resolved_at_construction() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agreements"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    std::env::set_var(TERMS_URL_VAR, server.uri());
    let client = TermsClient::new(ClientConfig::default()).unwrap();
    std::env::remove_var(TERMS_URL_VAR);

    assert_eq!(client.base_url(), server.uri());
    let agreements = client.get_users_agreements().await.unwrap();
    assert!(agreements.is_empty());

    // An explicit override in the config wins over the environment.
    std::env::set_var(TERMS_URL_VAR, "http://127.0.0.1:1");
    let client = TermsClient::new(ClientConfig::with_base_url(server.uri())).unwrap();
    std::env::remove_var(TERMS_URL_VAR);
    assert_eq!(client.base_url(), server.uri());
}
