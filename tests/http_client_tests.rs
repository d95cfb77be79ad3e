//! Integration tests for the transport layer.
//!
//! These tests verify header injection, body encoding, and the
//! raise-on-non-2xx contract against a mocked Open edX instance.

use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use openedx_api::api::user_validation::RegistrationInfo;
use openedx_api::{AccessToken, EdxApi, EdxConfig};

fn test_config(server: &MockServer) -> EdxConfig {
    EdxConfig::builder()
        .access_token(AccessToken::new("opensesame").unwrap())
        .base_url(server.uri())
        .unwrap()
        .build()
        .unwrap()
}

fn test_api(server: &MockServer) -> EdxApi {
    EdxApi::new(&test_config(server))
}

// ============================================================================
// Header Injection
// ============================================================================

#[tokio::test]
async fn test_bearer_token_sent_on_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mobile/v0.5/my_user_info"))
        .and(header("Authorization", "Bearer opensesame"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "staff",
            "email": "staff@example.com",
            "name": "Staff Member",
            "id": 4,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let info = api.user_info().get_user_info().await.unwrap();

    assert_eq!(info.username.as_deref(), Some("staff"));
    assert_eq!(info.user_id, Some(4));
}

#[tokio::test]
async fn test_jwt_token_sent_for_bulk_retirement() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/accounts/bulk_retire_users"))
        .and(header("Authorization", "JWT opensesame"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "successful_user_retirements": ["departed"],
            "failed_user_retirements": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let outcome = api
        .bulk_retirement()
        .retire_users(&["departed".to_string()])
        .await
        .unwrap();

    assert_eq!(outcome.successful_user_retirements, vec!["departed"]);
}

#[tokio::test]
async fn test_jwt_token_sent_for_lti_user_fix() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/lti-user-fix/"))
        .and(header("Authorization", "JWT opensesame"))
        .and(body_string_contains("duplicate@example.com"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    tokio_test::assert_ok!(api.lti_tools().fix_lti_user("duplicate@example.com").await);
}

// ============================================================================
// Body Encoding
// ============================================================================

#[tokio::test]
async fn test_user_validation_posts_form_encoded_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/v1/validation/registration"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=new_user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "validation_decisions": {"username": ""},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let result = api
        .user_validation()
        .validate_user_registration_info(RegistrationInfo {
            username: Some("new_user".to_string()),
            name: None,
        })
        .await
        .unwrap();

    assert_eq!(result.username(), Some(""));
}

// ============================================================================
// Raise-on-non-2xx Contract
// ============================================================================

#[tokio::test]
async fn test_non_2xx_raises_with_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mobile/v0.5/my_user_info"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Invalid token.",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let error = api.user_info().get_user_info().await.unwrap_err();

    assert_eq!(error.status(), Some(401));
    assert!(error.to_string().contains("Invalid token."));
}

#[tokio::test]
async fn test_non_json_error_body_is_preserved_in_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mobile/v0.5/my_user_info"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server);
    let error = api.user_info().get_user_info().await.unwrap_err();

    assert_eq!(error.status(), Some(502));
    assert!(error.to_string().contains("Bad Gateway"));
}
