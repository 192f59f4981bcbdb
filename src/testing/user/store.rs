#[actix_web::test]
async fn store_creates_user_and_never_returns_the_password() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, read_body_json, TestRequest};

    use crate::entities::v1::users::Model;
    use crate::requests::v1::user::UserStoreRequest;
    use crate::testing::setup;

    let (service, db) = crate::service!();

    let payload = UserStoreRequest {
        email: "jane.doe@example.com".to_string(),
        password: "testpass".to_string(),
        name: Some("Jane Doe".to_string()),
    };

    let request = TestRequest::post()
        .uri("/v1/user/create")
        .set_json(&payload)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = read_body_json(response).await;
    assert_eq!(body["email"], "jane.doe@example.com");
    assert_eq!(body["name"], "Jane Doe");
    assert!(
        body.get("password").is_none(),
        "response must not carry a password field"
    );

    let stored = Model::find_by_email(&db, "jane.doe@example.com")
        .await
        .expect("user should be persisted");

    let hasher = setup::password_hasher().unwrap();
    assert!(stored.password.starts_with("$argon2id$"));
    assert!(hasher.verify("testpass", &stored.password).unwrap());
}

#[actix_web::test]
async fn store_rejects_a_duplicate_email() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, TestRequest};

    use crate::entities::v1::users::Model;
    use crate::requests::v1::user::UserStoreRequest;
    use crate::testing::setup;

    let (service, db) = crate::service!();
    let hasher = setup::password_hasher().unwrap();
    let existing = setup::create_test_user(&db, &hasher).await.unwrap();

    let payload = UserStoreRequest {
        email: existing.email.clone(),
        password: "testpass".to_string(),
        name: Some("Impostor".to_string()),
    };

    let request = TestRequest::post()
        .uri("/v1/user/create")
        .set_json(&payload)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The existing record is untouched.
    let stored = Model::find_by_email(&db, &existing.email).await.unwrap();
    assert_eq!(stored.name, existing.name);
    assert_eq!(stored.password, existing.password);
}

#[actix_web::test]
async fn store_rejects_a_short_password() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, read_body_json, TestRequest};

    use crate::entities::v1::users::Model;
    use crate::requests::v1::user::UserStoreRequest;

    let (service, db) = crate::service!();

    let payload = UserStoreRequest {
        email: "short@example.com".to_string(),
        password: "pw".to_string(),
        name: Some("Shorty".to_string()),
    };

    let request = TestRequest::post()
        .uri("/v1/user/create")
        .set_json(&payload)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = read_body_json(response).await;
    assert!(body["errors"]["password"][0]
        .as_str()
        .unwrap()
        .contains("at least 6"));

    // Nothing was persisted.
    assert!(Model::find_by_email(&db, "short@example.com").await.is_none());
}

#[actix_web::test]
async fn store_rejects_a_malformed_email() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, TestRequest};

    use crate::requests::v1::user::UserStoreRequest;

    let (service, _db) = crate::service!();

    let payload = UserStoreRequest {
        email: "not-an-email".to_string(),
        password: "testpass".to_string(),
        name: None,
    };

    let request = TestRequest::post()
        .uri("/v1/user/create")
        .set_json(&payload)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn store_normalizes_the_email_and_defaults_the_name() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, read_body_json, TestRequest};

    use crate::entities::v1::users::Model;
    use crate::requests::v1::user::UserStoreRequest;

    let (service, db) = crate::service!();

    let payload = UserStoreRequest {
        email: "  Jane.Doe@Example.COM ".to_string(),
        password: "testpass".to_string(),
        name: None,
    };

    let request = TestRequest::post()
        .uri("/v1/user/create")
        .set_json(&payload)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = read_body_json(response).await;
    assert_eq!(body["email"], "jane.doe@example.com");
    assert_eq!(body["name"], "");

    assert!(Model::find_by_email(&db, "jane.doe@example.com")
        .await
        .is_some());
}
