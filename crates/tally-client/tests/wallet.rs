//! Wallet and budget client integration tests.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tally_client::{ClientConfig, Error, WalletClient};

async fn client_for(server: &MockServer) -> WalletClient {
    WalletClient::new(ClientConfig::with_base_url(server.uri())).expect("client")
}

// ============================================================================
// Wallets
// ============================================================================

#[tokio::test]
async fn create_wallet_posts_exactly_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wallet"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"wallet": "personal", "limit": "200"})))
        .respond_with(ResponseTemplate::new(200).set_body_json("Wallet created successfully"))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .await
        .create_wallet("personal", "200")
        .await
        .unwrap();
    assert_eq!(response, "Wallet created successfully");
}

#[tokio::test]
async fn create_wallet_surfaces_server_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wallet"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "wallet already exists"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .create_wallet("personal", "200")
        .await
        .unwrap_err();
    match &err {
        Error::Http { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "wallet already exists");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "wallet already exists");
}

#[tokio::test]
async fn create_wallet_classifies_503_as_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wallet"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .create_wallet("personal", "200")
        .await
        .unwrap_err();
    assert!(err.is_unavailable());
    assert_eq!(err.to_string(), "wallet service not available");
}

#[tokio::test]
async fn create_wallet_classifies_connection_refused_as_unavailable() {
    // Nothing listens on port 1.
    let client = WalletClient::new(ClientConfig::with_base_url("http://127.0.0.1:1")).unwrap();

    let err = client.create_wallet("personal", "200").await.unwrap_err();
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn non_connectivity_transport_error_is_propagated_unchanged() {
    // An unsupported scheme fails in the request builder, not at connect time.
    let client = WalletClient::new(ClientConfig::with_base_url("ftp://127.0.0.1")).unwrap();

    let err = client.create_wallet("personal", "200").await.unwrap_err();
    assert!(!err.is_unavailable());
    assert!(matches!(err, Error::RequestFailed(_)));
}

#[tokio::test]
async fn create_wallet_maps_reserved_code_to_user_validation_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wallet"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "user validation failed",
            "error": "silly error"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .create_wallet("personal", "200")
        .await
        .unwrap_err();
    assert!(err.is_user_validation_failed());
    assert_eq!(err.to_string(), "silly error");
}

#[tokio::test]
async fn create_wallet_reports_undecodable_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wallet"))
        .respond_with(ResponseTemplate::new(404).set_body_string("something failed"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .create_wallet("personal", "200")
        .await
        .unwrap_err();
    match err {
        Error::MalformedResponse { status, body } => {
            assert_eq!(status, "Not Found");
            assert_eq!(body, "something failed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn list_wallets_decodes_summaries_and_totals() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wallet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "wallets": [
                {
                    "owner": "bob",
                    "wallet": "personal",
                    "limit": "50",
                    "budgeted": "30",
                    "unallocated": "20",
                    "available": "45",
                    "consumed": "5",
                    "default": true
                },
                {
                    "owner": "bob",
                    "wallet": "work",
                    "limit": "200",
                    "budgeted": "100",
                    "unallocated": "100",
                    "available": "150",
                    "consumed": "50",
                    "default": false
                }
            ],
            "total": {
                "limit": "300",
                "budgeted": "140",
                "available": "235",
                "unallocated": "160",
                "consumed": "65"
            },
            "credit": "400"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).await.list_wallets().await.unwrap();
    assert_eq!(response.wallets.len(), 2);
    assert_eq!(response.wallets[0].wallet, "personal");
    assert!(response.wallets[0].default);
    assert_eq!(response.wallets[1].consumed, "50");
    assert_eq!(response.total.limit, "300");
    assert_eq!(response.credit, "400");
}

#[tokio::test]
async fn set_wallet_patches_update_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/wallet/personal"))
        .and(body_json(json!({"update": {"limit": "200"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json("Wallet updated successfully"))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .await
        .set_wallet("personal", "200")
        .await
        .unwrap();
    assert_eq!(response, "Wallet updated successfully");
}

#[tokio::test]
async fn get_wallet_decodes_budgets_with_services() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wallet/personal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "limit": "4000",
            "total": {
                "budgeted": "2200",
                "unallocated": "1800",
                "available": "1100",
                "consumed": "1100",
                "usage": "50%"
            },
            "budgets": [
                {
                    "owner": "user.joe",
                    "limit": "1200",
                    "consumed": "500",
                    "usage": "42%",
                    "model": "model.joe",
                    "services": {
                        "mysql": {"consumed": "200"},
                        "wordpress": {"consumed": "300"}
                    }
                }
            ]
        })))
        .mount(&server)
        .await;

    let wallet = client_for(&server).await.get_wallet("personal").await.unwrap();
    assert_eq!(wallet.limit, "4000");
    assert_eq!(wallet.total.usage, "50%");
    assert_eq!(wallet.budgets.len(), 1);
    assert_eq!(wallet.budgets[0].model, "model.joe");
    assert_eq!(wallet.budgets[0].services["wordpress"].consumed, "300");
}

#[tokio::test]
async fn get_wallet_reports_undecodable_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wallet/personal"))
        .respond_with(ResponseTemplate::new(200).set_body_string("wrong response format"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .get_wallet("personal")
        .await
        .unwrap_err();
    match err {
        Error::MalformedResponse { status, body } => {
            assert_eq!(status, "OK");
            assert_eq!(body, "wrong response format");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ============================================================================
// Budgets
// ============================================================================

#[tokio::test]
async fn create_budget_posts_model_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wallet/personal/budget"))
        .and(body_json(json!({"model": "model", "limit": "200"})))
        .respond_with(ResponseTemplate::new(200).set_body_json("Budget created successfully"))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .await
        .create_budget("personal", "200", "model")
        .await
        .unwrap();
    assert_eq!(response, "Budget created successfully");
}

#[tokio::test]
async fn update_budget_patches_wallet_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/model/model-uuid/budget"))
        .and(body_json(
            json!({"update": {"wallet": "personal", "limit": "200"}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json("Budget updated."))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .await
        .update_budget("model-uuid", "personal", "200")
        .await
        .unwrap();
    assert_eq!(response, "Budget updated.");
}

#[tokio::test]
async fn update_budget_omits_empty_wallet_from_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/model/model-uuid/budget"))
        .and(body_json(json!({"update": {"limit": "200"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json("Budget updated."))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .await
        .update_budget("model-uuid", "", "200")
        .await
        .unwrap();
    assert_eq!(response, "Budget updated.");
}

#[tokio::test]
async fn delete_budget_issues_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/model/model-uuid/budget"))
        .respond_with(ResponseTemplate::new(200).set_body_json("Budget deleted."))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .await
        .delete_budget("model-uuid")
        .await
        .unwrap();
    assert_eq!(response, "Budget deleted.");
}

// ============================================================================
// Allocations
// ============================================================================

#[tokio::test]
async fn create_allocation_posts_services() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wallet/somebudget/allocation"))
        .and(body_json(json!({
            "model": "model-uuid",
            "services": ["db"],
            "limit": "42"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json("allocation created"))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .await
        .create_allocation("somebudget", "42", "model-uuid", &["db".to_string()])
        .await
        .unwrap();
    assert_eq!(response, "allocation created");
}

#[tokio::test]
async fn update_allocation_patches_service_limit() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/model/env-uuid/service/name/allocation"))
        .and(body_json(json!({"update": {"limit": "5"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json("name budget set to 5"))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .await
        .update_allocation("env-uuid", "name", "5")
        .await
        .unwrap();
    assert_eq!(response, "name budget set to 5");
}
