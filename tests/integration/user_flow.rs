//! End-to-end account flow
//!
//! Drives the service the way a client would: register, obtain a token,
//! read the profile, update it, then authenticate with the new password.

use actix_web::http::StatusCode;
use actix_web::test::{call_service, read_body_json, TestRequest};
use account_api::requests::v1::auth::TokenRequest;
use account_api::requests::v1::user::{UserStoreRequest, UserUpdateProfileRequest};

#[actix_web::test]
async fn complete_account_lifecycle() {
    let (service, _db) = account_api::service!();

    // Step 1: register.
    let register = UserStoreRequest {
        email: "jimmy@example.com".to_string(),
        password: "testpass".to_string(),
        name: Some("Jimmy Jones".to_string()),
    };

    let request = TestRequest::post()
        .uri("/v1/user/create")
        .set_json(&register)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::CREATED, "registration should succeed");

    let body: serde_json::Value = read_body_json(response).await;
    assert_eq!(body["email"], "jimmy@example.com");
    assert!(body.get("password").is_none());

    // Step 2: obtain a bearer token.
    let login = TokenRequest {
        email: "jimmy@example.com".to_string(),
        password: "testpass".to_string(),
    };

    let request = TestRequest::post()
        .uri("/v1/user/token")
        .set_json(&login)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");

    let body: serde_json::Value = read_body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    // Step 3: read the profile with the token.
    let request = TestRequest::get()
        .uri("/v1/user/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = read_body_json(response).await;
    assert_eq!(body["email"], "jimmy@example.com");
    assert_eq!(body["name"], "Jimmy Jones");

    // Step 4: update name and password.
    let update = UserUpdateProfileRequest {
        name: Some("James Jones".to_string()),
        password: Some("newerpass".to_string()),
    };

    let request = TestRequest::patch()
        .uri("/v1/user/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(&update)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK, "profile update should succeed");

    // Step 5: the profile reflects the update.
    let request = TestRequest::get()
        .uri("/v1/user/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();

    let response = call_service(&service, request).await;
    let body: serde_json::Value = read_body_json(response).await;
    assert_eq!(body["name"], "James Jones");

    // Step 6: the old password no longer authenticates, the new one does.
    let request = TestRequest::post()
        .uri("/v1/user/token")
        .set_json(&login)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(
        response.status(),
        StatusCode::BAD_REQUEST,
        "old password should be rejected"
    );

    let relogin = TokenRequest {
        email: "jimmy@example.com".to_string(),
        password: "newerpass".to_string(),
    };

    let request = TestRequest::post()
        .uri("/v1/user/token")
        .set_json(&relogin)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK, "new password should work");
}

#[actix_web::test]
async fn registering_the_same_email_twice_fails() {
    let (service, _db) = account_api::service!();

    let register = UserStoreRequest {
        email: "dup@example.com".to_string(),
        password: "testpass".to_string(),
        name: None,
    };

    let request = TestRequest::post()
        .uri("/v1/user/create")
        .set_json(&register)
        .to_request();
    assert_eq!(call_service(&service, request).await.status(), StatusCode::CREATED);

    let request = TestRequest::post()
        .uri("/v1/user/create")
        .set_json(&register)
        .to_request();
    assert_eq!(
        call_service(&service, request).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn a_token_from_one_service_does_not_authenticate_another() {
    let (first, db) = account_api::service!();
    let (second, _other_db) = account_api::service!();

    let hasher = account_api::testing::setup::password_hasher().unwrap();
    let user = account_api::testing::setup::create_test_user(&db, &hasher)
        .await
        .unwrap();
    let bearer = account_api::testing::setup::bearer(&db, user.id).await;

    let request = TestRequest::get()
        .uri("/v1/user/me")
        .insert_header(("Authorization", format!("Bearer {}", bearer)))
        .to_request();
    assert_eq!(call_service(&first, request).await.status(), StatusCode::OK);

    // The second service has its own database; the token means nothing there.
    let request = TestRequest::get()
        .uri("/v1/user/me")
        .insert_header(("Authorization", format!("Bearer {}", bearer)))
        .to_request();
    assert_eq!(
        call_service(&second, request).await.status(),
        StatusCode::UNAUTHORIZED
    );
}
