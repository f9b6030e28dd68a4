//! Account input rules.
//!
//! Emails are trimmed and lowercased before the format check, so lookups and
//! the uniqueness rule are case-insensitive. Unlike order creation, account
//! emails must match [`EMAIL_PATTERN`].

use regex::Regex;
use std::sync::LazyLock;

use super::error::UserError;
use super::types::{LoginRequest, RegisterRequest, UpdateProfileRequest};

pub const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Invalid email regex pattern")
});

/// Registration input that passed every check; password still in clear.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Login input with the email normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Profile update input that passed every check; password still in clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Passwords are taken verbatim; only an empty one counts as missing.
fn present_password(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, UserError> {
    present(value)
        .ok_or_else(|| UserError::validation(format!("Missing required field: {}", field)))
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn check_email(raw: &str) -> Result<String, UserError> {
    let email = normalize_email(raw);
    if !is_valid_email(&email) {
        return Err(UserError::validation("Invalid email format"));
    }
    Ok(email)
}

fn check_password(password: &str) -> Result<(), UserError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(UserError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_CHARS
        )));
    }
    Ok(())
}

/// Presence in the order name, email, password, phone; then email format;
/// then password length.
pub fn validate_registration(req: &RegisterRequest) -> Result<Registration, UserError> {
    let name = required(&req.name, "name")?;
    let email = required(&req.email, "email")?;
    let password = present_password(&req.password)
        .ok_or_else(|| UserError::validation("Missing required field: password"))?;
    let phone = required(&req.phone, "phone")?;

    let email = check_email(email)?;
    check_password(password)?;

    Ok(Registration {
        name: name.to_string(),
        email,
        phone: phone.to_string(),
        password: password.to_string(),
    })
}

pub fn validate_login(req: &LoginRequest) -> Result<Credentials, UserError> {
    match (present(&req.email), present_password(&req.password)) {
        (Some(email), Some(password)) => Ok(Credentials {
            email: normalize_email(email),
            password: password.to_string(),
        }),
        _ => Err(UserError::validation("Email and password are required")),
    }
}

/// Blank fields are dropped; present email and password are checked like
/// at registration.
pub fn validate_profile_update(req: &UpdateProfileRequest) -> Result<ProfileUpdate, UserError> {
    let email = present(&req.email).map(check_email).transpose()?;
    let password = match present_password(&req.password) {
        Some(password) => {
            check_password(password)?;
            Some(password.to_string())
        }
        None => None,
    };

    Ok(ProfileUpdate {
        name: present(&req.name).map(str::to_string),
        email,
        phone: present(&req.phone).map(str::to_string),
        password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegisterRequest {
        RegisterRequest {
            name: Some(" Sara ".to_string()),
            email: Some(" Sara@Example.COM ".to_string()),
            password: Some("secret123".to_string()),
            phone: Some("0500000000".to_string()),
        }
    }

    fn message_of(err: UserError) -> String {
        match err {
            UserError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_registration_normalizes() {
        let reg = validate_registration(&registration()).unwrap();
        assert_eq!(reg.name, "Sara");
        assert_eq!(reg.email, "sara@example.com");
        assert_eq!(reg.password, "secret123");
    }

    #[test]
    fn test_registration_reports_first_missing_field() {
        let req = RegisterRequest {
            email: Some("a@b.co".to_string()),
            ..Default::default()
        };
        assert_eq!(
            message_of(validate_registration(&req).unwrap_err()),
            "Missing required field: name"
        );

        let mut req = registration();
        req.password = Some(String::new());
        req.phone = None;
        assert_eq!(
            message_of(validate_registration(&req).unwrap_err()),
            "Missing required field: password"
        );

        let mut req = registration();
        req.phone = Some("   ".to_string());
        assert_eq!(
            message_of(validate_registration(&req).unwrap_err()),
            "Missing required field: phone"
        );
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("sara@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.sa"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email("a b@example.com"));
    }

    #[test]
    fn test_format_checked_before_password_length() {
        let mut req = registration();
        req.email = Some("not-an-email".to_string());
        req.password = Some("123".to_string());
        assert_eq!(
            message_of(validate_registration(&req).unwrap_err()),
            "Invalid email format"
        );

        let mut req = registration();
        req.password = Some("12345".to_string());
        assert_eq!(
            message_of(validate_registration(&req).unwrap_err()),
            "Password must be at least 6 characters"
        );

        // counted in characters, not bytes
        let mut req = registration();
        req.password = Some("كلمةسر".to_string());
        assert!(validate_registration(&req).is_ok());
    }

    #[test]
    fn test_login_requires_both_fields() {
        let err = validate_login(&LoginRequest {
            email: Some("sara@example.com".to_string()),
            password: None,
        })
        .unwrap_err();
        assert_eq!(message_of(err), "Email and password are required");

        let creds = validate_login(&LoginRequest {
            email: Some("SARA@example.com ".to_string()),
            password: Some("secret123".to_string()),
        })
        .unwrap();
        assert_eq!(creds.email, "sara@example.com");
    }

    #[test]
    fn test_profile_update_skips_blank_fields() {
        let update = validate_profile_update(&UpdateProfileRequest {
            name: Some("  ".to_string()),
            email: Some("New@Example.com".to_string()),
            phone: None,
            password: Some(String::new()),
        })
        .unwrap();
        assert_eq!(
            update,
            ProfileUpdate {
                email: Some("new@example.com".to_string()),
                ..Default::default()
            }
        );

        let err = validate_profile_update(&UpdateProfileRequest {
            password: Some("short".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(message_of(err), "Password must be at least 6 characters");

        let err = validate_profile_update(&UpdateProfileRequest {
            email: Some("broken".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(message_of(err), "Invalid email format");
    }
}
