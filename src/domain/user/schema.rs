//! User record schema
//!
//! Normalises a candidate record (trimming, email lowercasing, defaults) and
//! checks it against the field constraints before it reaches a store.

use std::sync::LazyLock;

use regex::Regex;
use validator::{Validate, ValidationErrors};

use super::{NewUser, UserType};
use crate::shared::{DomainError, DomainResult};

/// `local@domain.tld` shape; every label is word characters optionally
/// joined by single dots or dashes, and the address ends in a 2–3 letter TLD.
pub static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$",
    )
    .expect("email pattern is a valid regex")
});

/// Fields in the order they are reported when several are invalid.
const FIELD_ORDER: [&str; 2] = ["name", "email"];

/// Unvalidated input for a new user record.
#[derive(Debug, Clone, Default)]
pub struct UserCandidate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Raw user type; `None` selects the default.
    pub user_type: Option<String>,
}

#[derive(Debug, Validate)]
struct NormalizedFields {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    name: String,
    #[validate(regex(path = *EMAIL_PATTERN, message = "Please enter a valid email"))]
    email: String,
}

/// Canonical form used for storing and looking up emails.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates a candidate and returns the normalised record ready to insert.
///
/// Fails with [`DomainError::Validation`] naming the first violated field.
pub fn validate_candidate(candidate: UserCandidate) -> DomainResult<NewUser> {
    let name = candidate.name.trim().to_string();
    let email = normalize_email(&candidate.email);

    if name.is_empty() {
        return Err(DomainError::validation("name", "Name is required"));
    }
    if email.is_empty() {
        return Err(DomainError::validation("email", "Email is required"));
    }

    let fields = NormalizedFields { name, email };
    if let Err(errors) = fields.validate() {
        return Err(first_violation(&errors));
    }

    let user_type = match candidate.user_type {
        Some(raw) => raw.trim().parse::<UserType>()?,
        None => UserType::default(),
    };

    Ok(NewUser {
        name: fields.name,
        email: fields.email,
        phone: candidate.phone.map(|p| p.trim().to_string()),
        user_type,
        is_active: true,
        profile_completed: false,
    })
}

fn first_violation(errors: &ValidationErrors) -> DomainError {
    let field_errors = errors.field_errors();
    for field in FIELD_ORDER {
        if let Some(errs) = field_errors.get(field) {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            return DomainError::validation(field, message);
        }
    }
    DomainError::validation("user", errors.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, email: &str) -> UserCandidate {
        UserCandidate {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    fn failing_field(result: DomainResult<NewUser>) -> &'static str {
        match result {
            Err(DomainError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn normalises_and_applies_defaults() {
        let user = validate_candidate(candidate("  Al ", " AL@EX.com ")).unwrap();
        assert_eq!(user.name, "Al");
        assert_eq!(user.email, "al@ex.com");
        assert_eq!(user.user_type, UserType::Rider);
        assert!(user.is_active);
        assert!(!user.profile_completed);
        assert_eq!(user.phone, None);
    }

    #[test]
    fn phone_is_trimmed_and_empty_is_kept() {
        let mut c = candidate("Ana", "ana@example.com");
        c.phone = Some(" +1 555 ".into());
        assert_eq!(validate_candidate(c).unwrap().phone.as_deref(), Some("+1 555"));

        let mut c = candidate("Ana", "ana@example.com");
        c.phone = Some(String::new());
        assert_eq!(validate_candidate(c).unwrap().phone.as_deref(), Some(""));
    }

    #[test]
    fn name_length_bounds() {
        assert_eq!(failing_field(validate_candidate(candidate("A", "a@ex.com"))), "name");
        let long = "x".repeat(51);
        assert_eq!(failing_field(validate_candidate(candidate(&long, "a@ex.com"))), "name");
        let max = "x".repeat(50);
        assert!(validate_candidate(candidate(&max, "a@ex.com")).is_ok());
    }

    #[test]
    fn whitespace_only_name_is_missing() {
        let err = validate_candidate(candidate("   ", "a@ex.com")).unwrap_err();
        assert_eq!(err.to_string(), "User validation failed: name: Name is required");
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["plain", "a@b", "a@@b.com", "a@b.comcom", "a b@c.com", "@ex.com"] {
            assert_eq!(
                failing_field(validate_candidate(candidate("Ana", email))),
                "email",
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_dotted_and_dashed_emails() {
        for email in ["first.last@ex.com", "a-b@sub.domain.org", "x_1@ex.co.uk"] {
            assert!(validate_candidate(candidate("Ana", email)).is_ok(), "{email}");
        }
    }

    #[test]
    fn reports_name_before_email() {
        assert_eq!(failing_field(validate_candidate(candidate("A", "nope"))), "name");
    }

    #[test]
    fn user_type_is_parsed() {
        let mut c = candidate("Dee", "dee@ex.com");
        c.user_type = Some("driver".into());
        assert_eq!(validate_candidate(c).unwrap().user_type, UserType::Driver);

        let mut c = candidate("Dee", "dee@ex.com");
        c.user_type = Some("pilot".into());
        assert_eq!(failing_field(validate_candidate(c)), "userType");
    }
}
