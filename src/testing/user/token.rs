#[actix_web::test]
async fn token_is_issued_for_valid_credentials() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, read_body_json, TestRequest};

    use crate::requests::v1::auth::TokenRequest;
    use crate::testing::setup;

    let (service, db) = crate::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_test_user(&db, &hasher).await.unwrap();

    let payload = TokenRequest {
        email: user.email.clone(),
        password: "password".to_string(),
    };

    let request = TestRequest::post()
        .uri("/v1/user/token")
        .set_json(&payload)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = read_body_json(response).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn token_is_not_issued_for_a_wrong_password() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, read_body_json, TestRequest};

    use crate::requests::v1::auth::TokenRequest;
    use crate::testing::setup;

    let (service, db) = crate::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_test_user(&db, &hasher).await.unwrap();

    let payload = TokenRequest {
        email: user.email.clone(),
        password: "wrongpass".to_string(),
    };

    let request = TestRequest::post()
        .uri("/v1/user/token")
        .set_json(&payload)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = read_body_json(response).await;
    assert!(body.get("token").is_none());
}

#[actix_web::test]
async fn token_is_not_issued_for_an_unknown_user() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, read_body_json, TestRequest};

    use crate::requests::v1::auth::TokenRequest;

    let (service, _db) = crate::service!();

    let payload = TokenRequest {
        email: "nobody@example.com".to_string(),
        password: "testpass".to_string(),
    };

    let request = TestRequest::post()
        .uri("/v1/user/token")
        .set_json(&payload)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = read_body_json(response).await;
    assert!(body.get("token").is_none());
}

#[actix_web::test]
async fn token_is_not_issued_for_an_empty_password() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, read_body_json, TestRequest};

    use crate::requests::v1::auth::TokenRequest;
    use crate::testing::setup;

    let (service, db) = crate::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_test_user(&db, &hasher).await.unwrap();

    let payload = TokenRequest {
        email: user.email.clone(),
        password: String::new(),
    };

    let request = TestRequest::post()
        .uri("/v1/user/token")
        .set_json(&payload)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = read_body_json(response).await;
    assert!(body.get("token").is_none());
}

#[actix_web::test]
async fn repeated_logins_reuse_the_same_token() {
    use actix_web::test::{call_service, read_body_json, TestRequest};

    use crate::requests::v1::auth::TokenRequest;
    use crate::testing::setup;

    let (service, db) = crate::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_test_user(&db, &hasher).await.unwrap();

    let payload = TokenRequest {
        email: user.email.clone(),
        password: "password".to_string(),
    };

    let request = TestRequest::post()
        .uri("/v1/user/token")
        .set_json(&payload)
        .to_request();
    let first: serde_json::Value = read_body_json(call_service(&service, request).await).await;

    let request = TestRequest::post()
        .uri("/v1/user/token")
        .set_json(&payload)
        .to_request();
    let second: serde_json::Value = read_body_json(call_service(&service, request).await).await;

    assert_eq!(first["token"], second["token"]);
}
