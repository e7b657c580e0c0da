use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use trust_dns_resolver::{
    TokioAsyncResolver,
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
};

#[cfg(test)]
use mockall::automock;

const DNS_ATTEMPTS: usize = 2;

/// Why a domain was judged undeliverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliverabilityError {
    #[error("The domain name {0} does not exist.")]
    NoSuchDomain(String),

    #[error("The domain name {0} does not accept email.")]
    DoesNotAcceptEmail(String),

    #[error(
        "There was an error while checking if the domain name in the email address is deliverable: {0}"
    )]
    Resolver(String),
}

/// Deliverability oracle consulted by the validation policy.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeliverabilityCheck: Send + Sync {
    /// `Ok(())` when the domain can receive mail or the answer is unknown.
    async fn check_domain(&self, domain: &str) -> Result<(), DeliverabilityError>;
}

/// Validates an email domain by checking DNS records.
///
/// 1. Checks for MX (Mail Exchange) records first
/// 2. Falls back to A/AAAA records if the domain exists but has no MX records
///
/// A null MX (single record pointing at `.`) means the domain explicitly
/// refuses mail. Timeouts are reported as deliverable.
///
/// The resolver is built once and shared by every lookup made through this
/// checker. Its connections live on the runtime that first uses it, so build
/// one checker per worker.
#[derive(Clone)]
pub struct DnsDeliverabilityChecker {
    resolver: TokioAsyncResolver,
}

impl DnsDeliverabilityChecker {
    pub fn new(timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = DNS_ATTEMPTS;

        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), opts),
        }
    }
}

#[async_trait]
impl DeliverabilityCheck for DnsDeliverabilityChecker {
    async fn check_domain(&self, domain: &str) -> Result<(), DeliverabilityError> {
        check_mx_or_a_records(&self.resolver, domain).await
    }
}

async fn check_mx_or_a_records(
    resolver: &TokioAsyncResolver,
    domain: &str,
) -> Result<(), DeliverabilityError> {
    match resolver.mx_lookup(domain).await {
        Ok(records) => {
            let exchanges: Vec<_> = records.iter().map(|mx| mx.exchange().clone()).collect();
            if exchanges.is_empty() {
                return check_address_records(resolver, domain).await;
            }
            if exchanges.iter().all(|name| name.is_root()) {
                return Err(DeliverabilityError::DoesNotAcceptEmail(domain.to_string()));
            }
            Ok(())
        }
        Err(e) => match classify(&e) {
            LookupFailure::NxDomain => Err(DeliverabilityError::NoSuchDomain(domain.to_string())),
            LookupFailure::NoRecords => check_address_records(resolver, domain).await,
            LookupFailure::Timeout => {
                tracing::warn!(domain, "MX lookup timed out, treating domain as deliverable");
                Ok(())
            }
            LookupFailure::Other => Err(DeliverabilityError::Resolver(e.to_string())),
        },
    }
}

async fn check_address_records(
    resolver: &TokioAsyncResolver,
    domain: &str,
) -> Result<(), DeliverabilityError> {
    match resolver.lookup_ip(domain).await {
        Ok(ips) if ips.iter().next().is_some() => Ok(()),
        Ok(_) => Err(DeliverabilityError::DoesNotAcceptEmail(domain.to_string())),
        Err(e) => match classify(&e) {
            LookupFailure::NxDomain => Err(DeliverabilityError::NoSuchDomain(domain.to_string())),
            LookupFailure::NoRecords => {
                Err(DeliverabilityError::DoesNotAcceptEmail(domain.to_string()))
            }
            LookupFailure::Timeout => {
                tracing::warn!(domain, "A/AAAA lookup timed out, treating domain as deliverable");
                Ok(())
            }
            LookupFailure::Other => Err(DeliverabilityError::Resolver(e.to_string())),
        },
    }
}

enum LookupFailure {
    NxDomain,
    NoRecords,
    Timeout,
    Other,
}

fn classify(error: &ResolveError) -> LookupFailure {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. }
            if *response_code == ResponseCode::NXDomain =>
        {
            LookupFailure::NxDomain
        }
        ResolveErrorKind::NoRecordsFound { .. } => LookupFailure::NoRecords,
        ResolveErrorKind::Timeout => LookupFailure::Timeout,
        _ => LookupFailure::Other,
    }
}
