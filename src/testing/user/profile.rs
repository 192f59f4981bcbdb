#[actix_web::test]
async fn profile_requires_authentication() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, TestRequest};

    let (service, _db) = crate::service!();

    let request = TestRequest::get().uri("/v1/user/me").to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn profile_rejects_a_garbage_bearer_token() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, TestRequest};

    let (service, _db) = crate::service!();

    for header in ["Bearer not-a-token", "Token abc", "Bearer "] {
        let request = TestRequest::get()
            .uri("/v1/user/me")
            .insert_header(("Authorization", header))
            .to_request();

        let response = call_service(&service, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn profile_returns_exactly_email_and_name() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, read_body_json, TestRequest};

    use crate::testing::setup;

    let (service, db) = crate::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_test_user(&db, &hasher).await.unwrap();
    let bearer = setup::bearer(&db, user.id).await;

    let request = TestRequest::get()
        .uri("/v1/user/me")
        .insert_header(("Authorization", format!("Bearer {}", bearer)))
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = read_body_json(response).await;
    assert_eq!(body["email"], user.email);
    assert_eq!(body["name"], user.name);
    assert_eq!(
        body.as_object().unwrap().len(),
        2,
        "profile body is exactly email and name"
    );
}

#[actix_web::test]
async fn post_on_the_profile_resource_is_not_allowed() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, TestRequest};

    use crate::testing::setup;

    let (service, db) = crate::service!();

    // Unauthenticated.
    let request = TestRequest::post().uri("/v1/user/me").to_request();
    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    // Authenticated as well: the verb is rejected either way.
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_test_user(&db, &hasher).await.unwrap();
    let bearer = setup::bearer(&db, user.id).await;

    let request = TestRequest::post()
        .uri("/v1/user/me")
        .insert_header(("Authorization", format!("Bearer {}", bearer)))
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn patch_updates_name_and_password() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, read_body_json, TestRequest};

    use crate::entities::v1::users::Model;
    use crate::requests::v1::user::UserUpdateProfileRequest;
    use crate::testing::setup;

    let (service, db) = crate::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_test_user(&db, &hasher).await.unwrap();
    let bearer = setup::bearer(&db, user.id).await;

    let payload = UserUpdateProfileRequest {
        name: Some("Jimmy Jones".to_string()),
        password: Some("newpass".to_string()),
    };

    let request = TestRequest::patch()
        .uri("/v1/user/me")
        .insert_header(("Authorization", format!("Bearer {}", bearer)))
        .set_json(&payload)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = read_body_json(response).await;
    assert_eq!(body["name"], "Jimmy Jones");
    assert_eq!(body["email"], user.email);

    let stored = Model::find_by_id(&db, user.id).await.unwrap();
    assert_eq!(stored.name, "Jimmy Jones");
    assert!(hasher.verify("newpass", &stored.password).unwrap());
    assert!(!hasher.verify("password", &stored.password).unwrap());
}

#[actix_web::test]
async fn patch_with_only_a_name_keeps_the_password() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, TestRequest};

    use crate::entities::v1::users::Model;
    use crate::requests::v1::user::UserUpdateProfileRequest;
    use crate::testing::setup;

    let (service, db) = crate::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_test_user(&db, &hasher).await.unwrap();
    let bearer = setup::bearer(&db, user.id).await;

    let payload = UserUpdateProfileRequest {
        name: Some("Renamed".to_string()),
        password: None,
    };

    let request = TestRequest::patch()
        .uri("/v1/user/me")
        .insert_header(("Authorization", format!("Bearer {}", bearer)))
        .set_json(&payload)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = Model::find_by_id(&db, user.id).await.unwrap();
    assert_eq!(stored.name, "Renamed");
    assert!(hasher.verify("password", &stored.password).unwrap());
}

#[actix_web::test]
async fn patch_rejects_a_short_password() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, TestRequest};

    use crate::entities::v1::users::Model;
    use crate::requests::v1::user::UserUpdateProfileRequest;
    use crate::testing::setup;

    let (service, db) = crate::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_test_user(&db, &hasher).await.unwrap();
    let bearer = setup::bearer(&db, user.id).await;

    let payload = UserUpdateProfileRequest {
        name: None,
        password: Some("pw".to_string()),
    };

    let request = TestRequest::patch()
        .uri("/v1/user/me")
        .insert_header(("Authorization", format!("Bearer {}", bearer)))
        .set_json(&payload)
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let stored = Model::find_by_id(&db, user.id).await.unwrap();
    assert!(hasher.verify("password", &stored.password).unwrap());
}

#[actix_web::test]
async fn expired_tokens_do_not_authenticate() {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, TestRequest};
    use uuid::Uuid;

    use crate::entities::v1::tokens;
    use crate::helpers::now;
    use crate::security::token;
    use crate::testing::setup;

    let (service, db) = crate::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_test_user(&db, &hasher).await.unwrap();

    let expired = tokens::Model {
        id: Uuid::new_v4(),
        user_id: user.id,
        expired_at: Some(now() - chrono::Duration::hours(1)),
        created_at: now(),
    };
    let expired = expired.store(&db).await.unwrap();

    let request = TestRequest::get()
        .uri("/v1/user/me")
        .insert_header(("Authorization", format!("Bearer {}", token::encode(expired.id))))
        .to_request();

    let response = call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
