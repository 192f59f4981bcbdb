use actix_web::get;
use actix_web::web::{self, Data, ServiceConfig};
use utoipa::OpenApi;
use utoipa_swagger_ui::{SwaggerUi, Url};

use crate::api::Definition;
use crate::controllers;
use crate::metrics::AppMetrics;
use crate::middlewares::v1::auth::Authenticated;

/// Wire up routes and per-worker state. The caller provides
/// `Data<DatabaseConnection>` and `Data<AuthConfig>`.
pub fn route(app: &mut ServiceConfig) {
    app.app_data(Data::new(Authenticated::new()));
    app.app_data(Data::new(AppMetrics::new()));
    app.service(index);
    // User
    app.service(controllers::v1::user::store);
    app.service(
        web::resource("/v1/user/me")
            .route(web::get().to(controllers::v1::user::me))
            .route(web::patch().to(controllers::v1::user::update))
            // Unsupported verbs on the profile resource answer 405 with a
            // structured body instead of falling through to 404.
            .default_service(web::route().to(controllers::v1::user::method_not_allowed)),
    );
    // Auth
    app.service(controllers::v1::auth::token);

    // Health check endpoints
    app.service(controllers::health::health);
    app.service(controllers::health::health_db);

    // Metrics endpoint
    app.service(controllers::metrics::metrics);

    // must at the end!
    app.service(web::redirect("/docs", "/docs/"));
    app.service(SwaggerUi::new("/docs/{_:.*}").urls(vec![(
        Url::new("Account API", "/api.json"),
        Definition::openapi(),
    )]));
}

#[get("/")]
pub async fn index() -> &'static str {
    "Account API"
}
