use actix_web::get;
use actix_web::web::Data;
use actix_web::{HttpResponse, Responder};

use crate::metrics::AppMetrics;

/// Prometheus exposition endpoint
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Metrics in Prometheus text format", body = String),
    )
)]
#[get("/metrics")]
pub async fn metrics(metrics: Data<AppMetrics>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4; charset=utf-8")
        .body(metrics.render())
}
