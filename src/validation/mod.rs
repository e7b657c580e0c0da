/// RFC 5322 / RFC 6531 syntax checks with human-readable failure reasons.
pub mod syntax;

/// DNS deliverability checks: MX records first, A/AAAA as fallback.
pub mod dnsmx;

/// Static blocklist of disposable email providers.
pub mod disposable;

use disposable::DisposableBlocklist;
use dnsmx::DeliverabilityCheck;
use std::sync::Arc;

pub const VALID_MESSAGE: &str = "Email is valid";

/// Outcome of validating one address. Validation failures are ordinary
/// values; the HTTP layer decides how to present them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid { normalized: String },
    Invalid { reason: String },
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Verdict::Valid { .. } => VALID_MESSAGE,
            Verdict::Invalid { reason } => reason,
        }
    }
}

pub fn disposable_message(email: &str) -> String {
    format!("Disposable email addresses are not allowed: {}", email)
}

/// # Email Validation Policy
///
/// Combines three checks, in order:
/// 1. Syntax (see [`syntax::parse_email`])
/// 2. Deliverability of the domain, unless disabled or the domain is an IP literal
/// 3. Disposable-domain blocklist
///
/// Stateless after construction. The blocklist is shared between workers;
/// each worker brings its own deliverability checker.
pub struct EmailValidator {
    blocklist: Arc<DisposableBlocklist>,
    deliverability: Arc<dyn DeliverabilityCheck>,
    check_deliverability: bool,
}

impl EmailValidator {
    pub fn new(
        blocklist: impl Into<Arc<DisposableBlocklist>>,
        deliverability: Arc<dyn DeliverabilityCheck>,
        check_deliverability: bool,
    ) -> Self {
        Self {
            blocklist: blocklist.into(),
            deliverability,
            check_deliverability,
        }
    }

    pub async fn validate(&self, email: &str) -> Verdict {
        let parsed = match syntax::parse_email(email) {
            Ok(parsed) => parsed,
            Err(e) => {
                return Verdict::Invalid {
                    reason: e.to_string(),
                };
            }
        };

        if self.check_deliverability && !parsed.is_domain_literal {
            if let Err(e) = self.deliverability.check_domain(parsed.domain).await {
                tracing::debug!(domain = parsed.domain, reason = %e, "domain is undeliverable");
                return Verdict::Invalid {
                    reason: e.to_string(),
                };
            }
        }

        if self.blocklist.is_disposable(parsed.domain) {
            tracing::debug!(domain = parsed.domain, "disposable domain rejected");
            return Verdict::Invalid {
                reason: disposable_message(email),
            };
        }

        Verdict::Valid {
            normalized: parsed.normalized(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsmx::{DeliverabilityError, MockDeliverabilityCheck};
    use mockall::predicate::eq;

    fn validator_with(mock: MockDeliverabilityCheck) -> EmailValidator {
        EmailValidator::new(DisposableBlocklist::builtin(), Arc::new(mock), true)
    }

    fn always_deliverable() -> MockDeliverabilityCheck {
        let mut mock = MockDeliverabilityCheck::new();
        mock.expect_check_domain().returning(|_| Ok(()));
        mock
    }

    #[actix_web::test]
    async fn test_valid_non_disposable_address() {
        let validator = validator_with(always_deliverable());
        let verdict = validator.validate("user@gmail.com").await;

        assert!(verdict.is_valid());
        assert_eq!(verdict.message(), "Email is valid");
        assert_eq!(
            verdict,
            Verdict::Valid {
                normalized: "user@gmail.com".to_string()
            }
        );
    }

    #[actix_web::test]
    async fn test_disposable_domain_mentions_original_address() {
        let validator = validator_with(always_deliverable());
        let verdict = validator.validate("Test@Mailinator.com").await;

        assert!(!verdict.is_valid());
        assert_eq!(
            verdict.message(),
            "Disposable email addresses are not allowed: Test@Mailinator.com"
        );
    }

    #[actix_web::test]
    async fn test_syntax_failure_skips_dns() {
        let mut mock = MockDeliverabilityCheck::new();
        mock.expect_check_domain().never();
        let validator = validator_with(mock);

        let verdict = validator.validate("not-an-email").await;
        assert!(!verdict.is_valid());
        assert!(verdict.message().contains("@-sign"));
    }

    #[actix_web::test]
    async fn test_undeliverable_domain_reports_checker_reason() {
        let mut mock = MockDeliverabilityCheck::new();
        mock.expect_check_domain()
            .with(eq("nowhere.invalid"))
            .times(1)
            .returning(|d| Err(DeliverabilityError::NoSuchDomain(d.to_string())));
        let validator = validator_with(mock);

        let verdict = validator.validate("user@nowhere.invalid").await;
        assert_eq!(
            verdict,
            Verdict::Invalid {
                reason: "The domain name nowhere.invalid does not exist.".to_string()
            }
        );
    }

    #[actix_web::test]
    async fn test_deliverability_disabled() {
        let mut mock = MockDeliverabilityCheck::new();
        mock.expect_check_domain().never();
        let validator = EmailValidator::new(DisposableBlocklist::builtin(), Arc::new(mock), false);

        assert!(validator.validate("user@example.com").await.is_valid());
        assert!(!validator.validate("user@yopmail.com").await.is_valid());
    }

    #[actix_web::test]
    async fn test_domain_literal_skips_dns() {
        let mut mock = MockDeliverabilityCheck::new();
        mock.expect_check_domain().never();
        let validator = validator_with(mock);

        assert!(validator.validate("user@[192.168.0.1]").await.is_valid());
    }

    #[actix_web::test]
    async fn test_quoted_at_sign_uses_real_domain() {
        let validator = validator_with(always_deliverable());
        let verdict = validator.validate("\"a@gmail.com\"@mailinator.com").await;
        assert!(!verdict.is_valid());
    }

    #[actix_web::test]
    async fn test_normalized_lowercases_domain() {
        let validator = validator_with(always_deliverable());
        assert_eq!(
            validator.validate("Jane.Doe@Example.ORG").await,
            Verdict::Valid {
                normalized: "Jane.Doe@example.org".to_string()
            }
        );
    }
}
