use std::net::{IpAddr, Ipv6Addr};
use thiserror::Error;

pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_LOCAL_PART_LENGTH: usize = 64;
const MAX_LABEL_LENGTH: usize = 63;

/// Reasons an address fails the syntax check. The `Display` text is what
/// callers see in the `message` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("The email address is malformed: it must have an @-sign.")]
    MissingAtSign,

    #[error("There must be something before the @-sign.")]
    EmptyLocalPart,

    #[error("There must be something after the @-sign.")]
    EmptyDomain,

    #[error("The email address is too long ({0} characters too many).")]
    TooLong(usize),

    #[error("The email address is too long before the @-sign ({0} characters too many).")]
    LocalPartTooLong(usize),

    #[error(
        "An email address cannot start or end with a period or have two periods in a row before the @-sign."
    )]
    MisplacedPeriod,

    #[error("The email address contains invalid characters before the @-sign.")]
    InvalidLocalPart,

    #[error("The part after the @-sign is not valid.")]
    InvalidDomain,

    #[error("The part after the @-sign is not valid. It should have a period.")]
    DomainWithoutPeriod,

    #[error("The part after the @-sign is not a valid IP address.")]
    InvalidDomainLiteral,
}

/// The two halves of a syntactically valid address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEmail<'a> {
    pub local_part: &'a str,
    pub domain: &'a str,
    pub is_domain_literal: bool,
}

impl ParsedEmail<'_> {
    /// Address with the domain lower-cased; the local part is preserved.
    pub fn normalized(&self) -> String {
        format!("{}@{}", self.local_part, self.domain.to_lowercase())
    }
}

/// Parses an email address according to RFC 5322 and RFC 6531.
///
/// Checks both local-part and domain parts with:
/// - Full quoted-string/local-part support
/// - Domain literal (IP address) validation
/// - Internationalized email (UTF-8) support
/// - Length constraints enforcement
///
/// # Examples
/// ```
/// use email_validation_api::validation::syntax::{parse_email, SyntaxError};
///
/// let parsed = parse_email("user.name+tag@Example.com").unwrap();
/// assert_eq!(parsed.domain, "Example.com");
/// assert_eq!(parse_email("not-an-email"), Err(SyntaxError::MissingAtSign));
/// ```
pub fn parse_email(email: &str) -> Result<ParsedEmail<'_>, SyntaxError> {
    // Overall length constraint (RFC 5321 + 5322)
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(SyntaxError::TooLong(email.len() - MAX_EMAIL_LENGTH));
    }

    let split_index = find_separator(email).ok_or(SyntaxError::MissingAtSign)?;
    let (local_part, domain_part) = email.split_at(split_index);
    let domain_part = &domain_part[1..];

    if local_part.is_empty() {
        return Err(SyntaxError::EmptyLocalPart);
    }
    if domain_part.is_empty() {
        return Err(SyntaxError::EmptyDomain);
    }
    if local_part.len() > MAX_LOCAL_PART_LENGTH {
        return Err(SyntaxError::LocalPartTooLong(
            local_part.len() - MAX_LOCAL_PART_LENGTH,
        ));
    }

    validate_local_part(local_part)?;
    let is_domain_literal = validate_domain_part(domain_part)?;

    Ok(ParsedEmail {
        local_part,
        domain: domain_part,
        is_domain_literal,
    })
}

/// Returns `true` if the email address meets all syntax requirements.
pub fn is_valid_email(email: &str) -> bool {
    parse_email(email).is_ok()
}

/// Byte index of the first `@` outside a quoted string.
fn find_separator(email: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut escape = false;

    for (i, c) in email.char_indices() {
        match c {
            '"' if !escape => in_quotes = !in_quotes,
            '\\' if in_quotes && !escape => escape = true,
            '@' if !in_quotes => return Some(i),
            _ => escape = false,
        }
    }
    None
}

/// Supports both dot-atom and quoted-string formats (RFC 5322 Section 3.4.1)
fn validate_local_part(local: &str) -> Result<(), SyntaxError> {
    if local.len() >= 2 && local.starts_with('"') && local.ends_with('"') {
        return if is_valid_quoted_string(local) {
            Ok(())
        } else {
            Err(SyntaxError::InvalidLocalPart)
        };
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err(SyntaxError::MisplacedPeriod);
    }

    if is_valid_dot_atom(local, false) {
        Ok(())
    } else {
        Err(SyntaxError::InvalidLocalPart)
    }
}

/// Returns whether the domain is an IP literal.
fn validate_domain_part(domain: &str) -> Result<bool, SyntaxError> {
    if let Some(literal) = domain.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return if is_valid_domain_literal(literal) {
            Ok(true)
        } else {
            Err(SyntaxError::InvalidDomainLiteral)
        };
    }

    if !is_valid_domain_name(domain) {
        return Err(SyntaxError::InvalidDomain);
    }
    if !domain.contains('.') {
        return Err(SyntaxError::DomainWithoutPeriod);
    }
    Ok(false)
}

fn is_valid_quoted_string(quoted: &str) -> bool {
    let content = &quoted[1..quoted.len() - 1];
    let mut escape = false;

    for c in content.chars() {
        if escape {
            if !matches!(c, '\\' | '"') {
                return false;
            }
            escape = false;
        } else if c == '\\' {
            escape = true;
        } else if c == '"' {
            return false;
        }
    }
    !escape
}

/// * `is_domain` - Enforces stricter rules for domain labels
fn is_valid_dot_atom(s: &str, is_domain: bool) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return false;
    }

    parts.iter().all(|part| {
        part.chars().all(|c| match c {
            '-' => !is_domain || (!part.starts_with('-') && !part.ends_with('-')),
            c if is_domain => c.is_alphanumeric(),
            _ => c.is_alphanumeric() || "!#$%&'*+/=?^_`{|}~".contains(c),
        })
    })
}

fn is_valid_domain_literal(literal: &str) -> bool {
    literal.parse::<IpAddr>().is_ok()
        || literal
            .strip_prefix("IPv6:")
            .and_then(|ip| ip.parse::<Ipv6Addr>().ok())
            .is_some()
}

/// Internationalized domain names per RFC 5890 and RFC 6531
fn is_valid_domain_name(domain: &str) -> bool {
    domain.split('.').all(|label| {
        !label.is_empty() && label.len() <= MAX_LABEL_LENGTH && is_valid_dot_atom(label, true)
    })
}
