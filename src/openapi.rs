use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI Specification Documentation
///
/// Generated at compile time from the `#[utoipa::path]` annotations on the
/// handlers. Paths are documented under the default `/api` prefix.
///
/// # Endpoints
/// - Health Check: `GET /api/v1/health`
/// - Bulk Validation: `POST /api/v1/validate-emails`
/// - Single Validation: `POST /api/v1/validate-emails/{email}`
///
/// # Security
/// Validation endpoints require the `X-API-Key` header (`api_key` scheme).
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::email::validate_bulk_emails_handler,
        crate::routes::email::validate_email_handler,
    ),
    components(
        schemas(
            crate::models::health::HealthResponse,
            crate::models::email::BulkEmailRequest,
            crate::models::email::ValidationResult,
            crate::models::email::SingleValidationResponse,
            crate::models::email::BulkValidationResponse,
            crate::error::ErrorResponse
        )
    ),
    modifiers(&ApiKeySecurity),
    tags(
        (name = "Health Check", description = "Service health monitoring endpoints"),
        (name = "Email Validation", description = "Email address validation endpoints")
    ),
    info(
        description = "Validates email addresses for syntax, deliverability and disposable domains",
        title = "Email Validation API",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;

struct ApiKeySecurity;

impl Modify for ApiKeySecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
                    crate::auth::API_KEY_HEADER,
                ))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_validation_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/v1/health"));
        assert!(paths.contains_key("/api/v1/validate-emails"));
        assert!(paths.contains_key("/api/v1/validate-emails/{email}"));
    }

    #[test]
    fn test_document_declares_api_key_scheme() {
        let json = ApiDoc::openapi().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value["components"]["securitySchemes"]["api_key"]["name"],
            "X-API-Key"
        );
        assert_eq!(
            value["components"]["securitySchemes"]["api_key"]["in"],
            "header"
        );
    }
}
