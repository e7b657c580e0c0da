use crate::validation::Verdict;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of the bulk validation endpoint. Order is preserved and duplicates
/// are kept.
#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct BulkEmailRequest {
    #[schema(example = json!(["user@gmail.com", "test@mailinator.com"]))]
    pub emails: Vec<String>,
}

/// Verdict for one address, echoing the address exactly as submitted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ValidationResult {
    pub email: String,
    /// `"Email is valid"` or a human-readable failure reason.
    pub message: String,
    pub valid: bool,
    /// Address with a lower-cased domain; only present when valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
}

impl ValidationResult {
    pub fn from_verdict(email: String, verdict: Verdict) -> Self {
        let message = verdict.message().to_string();
        let valid = verdict.is_valid();
        let normalized = match verdict {
            Verdict::Valid { normalized } => Some(normalized),
            Verdict::Invalid { .. } => None,
        };

        Self {
            email,
            message,
            valid,
            normalized,
        }
    }

    pub fn invalid(email: String, message: impl Into<String>) -> Self {
        Self {
            email,
            message: message.into(),
            valid: false,
            normalized: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SingleValidationResponse {
    pub result: ValidationResult,
    /// Wall-clock seconds spent validating.
    pub time_taken: f64,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct BulkValidationResponse {
    /// One entry per submitted address, in submission order.
    pub results: Vec<ValidationResult>,
    pub valid_count: usize,
    pub invalid_count: usize,
    /// Wall-clock seconds for the whole batch.
    pub time_taken: f64,
}

impl BulkValidationResponse {
    pub fn new(results: Vec<ValidationResult>, time_taken: f64) -> Self {
        let valid_count = results.iter().filter(|r| r.valid).count();
        Self {
            invalid_count: results.len() - valid_count,
            valid_count,
            results,
            time_taken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bulk_request_deserialization() {
        let json = r#"{"emails": ["a@example.com", "a@example.com", "b@example.com"]}"#;
        let request: BulkEmailRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.emails,
            vec!["a@example.com", "a@example.com", "b@example.com"]
        );
    }

    #[test]
    fn test_bulk_request_missing_field() {
        let result: Result<BulkEmailRequest, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_bulk_request_wrong_element_type() {
        let result: Result<BulkEmailRequest, _> =
            serde_json::from_str(r#"{"emails": ["ok@example.com", 42]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_bulk_request_not_a_list() {
        let result: Result<BulkEmailRequest, _> =
            serde_json::from_str(r#"{"emails": "user@example.com"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_bulk_request_extra_fields_ignored() {
        let request: BulkEmailRequest =
            serde_json::from_str(r#"{"emails": [], "extra": true}"#).unwrap();
        assert!(request.emails.is_empty());
    }

    #[test]
    fn test_valid_result_serialization() {
        let result = ValidationResult::from_verdict(
            "User@Example.com".to_string(),
            Verdict::Valid {
                normalized: "User@example.com".to_string(),
            },
        );
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "email": "User@Example.com",
                "message": "Email is valid",
                "valid": true,
                "normalized": "User@example.com"
            })
        );
    }

    #[test]
    fn test_invalid_result_omits_normalized() {
        let result = ValidationResult::from_verdict(
            "bad".to_string(),
            Verdict::Invalid {
                reason: "nope".to_string(),
            },
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["message"], "nope");
        assert!(value.get("normalized").is_none());
    }

    #[test]
    fn test_bulk_response_counts() {
        let response = BulkValidationResponse::new(
            vec![
                ValidationResult::invalid("a".to_string(), "x"),
                ValidationResult::from_verdict(
                    "b@example.com".to_string(),
                    Verdict::Valid {
                        normalized: "b@example.com".to_string(),
                    },
                ),
                ValidationResult::invalid("c".to_string(), "y"),
            ],
            0.01,
        );
        assert_eq!(response.valid_count, 1);
        assert_eq!(response.invalid_count, 2);
        assert_eq!(response.results.len(), 3);
    }

    #[test]
    fn test_empty_bulk_response() {
        let response = BulkValidationResponse::new(Vec::new(), 0.0);
        assert_eq!(response.valid_count, 0);
        assert_eq!(response.invalid_count, 0);
        assert!(response.results.is_empty());
    }
}
