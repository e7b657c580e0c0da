use crate::auth::ApiKeyGuard;
use crate::config::AppConfig;
use crate::error::json_error_handler;
use actix_web::web;

/// # Health Check Endpoint
///
/// Liveness probe, reachable without an API key.
///
/// ```text
/// GET {prefix}/v1/health
/// ```
pub mod health;

/// # Email Validation Endpoints
///
/// Single and bulk validation. Each address is checked for:
/// 1. RFC-compliant syntax
/// 2. Domain DNS/MX records
/// 3. Disposable email domains
///
/// Validation failures are reported inside a 200 response, never as HTTP
/// errors.
pub mod email;


/// # API Route Configuration
///
/// Mounts the versioned API under the configured prefix (default `/api`).
///
/// ## Mounted Services
/// - Health check (see [`health::configure_routes`])
/// - Email validation behind [`ApiKeyGuard`] (see [`email::configure_routes`])
///
/// Malformed JSON bodies are answered with 422 and a `detail` message.
///
/// ## Example Endpoints
///
/// ```text
/// GET  /api/v1/health
/// POST /api/v1/validate-emails
/// POST /api/v1/validate-emails/{email}
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, config: &AppConfig) {
    cfg.service(
        web::scope(&config.versioned_prefix())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(health::configure_routes)
            .service(
                web::scope("/validate-emails")
                    .wrap(ApiKeyGuard::new(config.api_secret_key.clone()))
                    .configure(email::configure_routes),
            ),
    );
}
