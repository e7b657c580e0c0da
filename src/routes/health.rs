use crate::config::AppConfig;
use crate::models::HealthResponse;
use actix_web::{HttpResponse, Responder, get, web};

/// # Health Check Endpoint
///
/// Returns the current health status of the service, the deployment
/// environment and a timestamp. Not protected by the API key.
///
/// ## Example Response
///
/// ```json
/// {
///   "status": "UP",
///   "environment": "development",
///   "timestamp": "2023-10-05T12:34:56.789Z"
/// }
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health Check"
)]
#[get("/health")]
pub async fn health(config: web::Data<AppConfig>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::up(&config.environment))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}
