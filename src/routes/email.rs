use crate::error::ErrorResponse;
use crate::models::{
    BulkEmailRequest, BulkValidationResponse, SingleValidationResponse, ValidationResult,
};
use crate::validation::EmailValidator;
use actix_web::{HttpResponse, Responder, post, web};
use futures::FutureExt;
use futures::future::join_all;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Runs the validation policy for one address. A panic inside the policy
/// (e.g. in a resolver) becomes an invalid result carrying the panic text
/// instead of a 5xx or an aborted batch.
async fn validate_one(validator: &EmailValidator, email: String) -> ValidationResult {
    let outcome = AssertUnwindSafe(validator.validate(&email))
        .catch_unwind()
        .await;

    match outcome {
        Ok(verdict) => ValidationResult::from_verdict(email, verdict),
        Err(payload) => {
            let reason = panic_reason(payload.as_ref());
            tracing::error!(error = %reason, "validation failed unexpectedly");
            ValidationResult::invalid(email, reason)
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Email validation failed unexpectedly".to_string()
    }
}

/// # Single Email Validation Endpoint
///
/// Validates the address given as the last path segment by checking:
/// 1. RFC-compliant syntax
/// 2. Domain DNS/MX records
/// 3. Disposable email domain blocklist
///
/// ## Responses
/// - **200 OK**: Always, once authorized. `result.valid` and
///   `result.message` carry the verdict.
/// - **403 Forbidden**: Missing or invalid `X-API-Key`
///
/// ## Example
/// ```text
/// POST /api/v1/validate-emails/user@gmail.com
/// X-API-Key: <secret>
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/validate-emails/{email}",
    params(
        ("email" = String, Path, description = "Email address to validate")
    ),
    responses(
        (status = 200, description = "Validation verdict", body = SingleValidationResponse),
        (status = 403, description = "Invalid API key", body = ErrorResponse)
    ),
    security(("api_key" = [])),
    tag = "Email Validation"
)]
#[post("/{email}")]
pub async fn validate_email_handler(
    path: web::Path<String>,
    validator: web::Data<EmailValidator>,
) -> impl Responder {
    let email = path.into_inner();
    let span = tracing::info_span!("validate_email", request_id = %Uuid::new_v4());

    async move {
        let start = Instant::now();
        let result = validate_one(&validator, email).await;
        let time_taken = start.elapsed().as_secs_f64();

        tracing::info!(valid = result.valid, time_taken, "single validation finished");
        HttpResponse::Ok().json(SingleValidationResponse { result, time_taken })
    }
    .instrument(span)
    .await
}

/// # Bulk Email Validation Endpoint
///
/// Validates every address of the `emails` array. Addresses are checked
/// concurrently, results come back in submission order, and one bad address
/// never aborts the batch. `time_taken` covers the whole batch.
///
/// ## Responses
/// - **200 OK**: Per-address results with valid/invalid counts
/// - **403 Forbidden**: Missing or invalid `X-API-Key`
/// - **422 Unprocessable Entity**: Body is not `{"emails": [string, ...]}`
///
/// ## Example Request
/// ```json
/// { "emails": ["user@gmail.com", "test@mailinator.com", "not-an-email"] }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/validate-emails",
    request_body = BulkEmailRequest,
    responses(
        (status = 200, description = "Bulk validation results", body = BulkValidationResponse),
        (status = 403, description = "Invalid API key", body = ErrorResponse),
        (status = 422, description = "Malformed request body", body = ErrorResponse)
    ),
    security(("api_key" = [])),
    tag = "Email Validation"
)]
pub async fn validate_bulk_emails_handler(
    req: web::Json<BulkEmailRequest>,
    validator: web::Data<EmailValidator>,
) -> impl Responder {
    let emails = req.into_inner().emails;
    let span = tracing::info_span!(
        "validate_bulk_emails",
        request_id = %Uuid::new_v4(),
        count = emails.len()
    );

    async move {
        let start = Instant::now();
        let results = join_all(
            emails
                .into_iter()
                .map(|email| validate_one(&validator, email)),
        )
        .await;
        let time_taken = start.elapsed().as_secs_f64();

        let response = BulkValidationResponse::new(results, time_taken);
        tracing::info!(
            valid_count = response.valid_count,
            invalid_count = response.invalid_count,
            time_taken,
            "bulk validation finished"
        );
        HttpResponse::Ok().json(response)
    }
    .instrument(span)
    .await
}

/// Registers the validation endpoints relative to the `/validate-emails` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["", "/"]).route(web::post().to(validate_bulk_emails_handler)))
        .service(validate_email_handler);
}
