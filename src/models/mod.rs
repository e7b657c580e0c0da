/// # Health Status Response
///
/// Operational status of the service with the deployment environment and a
/// timestamp. Used as the response format for the health check endpoint.
///
/// ## Example JSON
/// ```json
/// {
///   "status": "UP",
///   "environment": "development",
///   "timestamp": "2024-03-10T15:30:45.123456789Z"
/// }
/// ```
pub mod health;

/// Request and response payloads of the email validation endpoints.
pub mod email;

pub use email::{
    BulkEmailRequest, BulkValidationResponse, SingleValidationResponse, ValidationResult,
};
pub use health::HealthResponse;
