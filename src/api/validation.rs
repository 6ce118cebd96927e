use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::ApiError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug regex is valid")
});

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,32}$").expect("username regex is valid"));

pub const SETTING_TYPES: &[&str] = &["text", "number", "boolean", "json"];

/// A single invalid field, reported back in the 400 body.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Collects field errors across a request body and yields one
/// `ApiError::ValidationError` with all of them.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    pub fn require(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, format!("{field} is required"));
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !EMAIL_RE.is_match(value) {
            self.fail(field, "Must be a valid email address");
        }
        self
    }

    pub fn username(&mut self, field: &str, value: &str) -> &mut Self {
        if !USERNAME_RE.is_match(value) {
            self.fail(
                field,
                "Must be 3-32 characters: letters, numbers, hyphens, underscores",
            );
        }
        self
    }

    pub fn password(&mut self, field: &str, value: &str) -> &mut Self {
        if value.len() < 8 {
            self.fail(field, "Must be at least 8 characters");
        }
        self
    }

    pub fn slug(&mut self, field: &str, value: &str) -> &mut Self {
        if !SLUG_RE.is_match(value) {
            self.fail(field, "Must be lowercase letters, numbers, and hyphens");
        }
        self
    }

    pub fn non_empty_list(&mut self, field: &str, value: &[String]) -> &mut Self {
        if value.is_empty() || value.iter().all(|v| v.trim().is_empty()) {
            self.fail(field, format!("{field} must contain at least one entry"));
        }
        self
    }

    pub fn setting_type(&mut self, field: &str, value: &str) -> &mut Self {
        if !SETTING_TYPES.contains(&value) {
            self.fail(
                field,
                format!("Must be one of: {}", SETTING_TYPES.join(", ")),
            );
        }
        self
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::ValidationError(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        let mut v = Validator::new();
        v.email("email", "alice@example.com");
        assert!(v.finish().is_ok());

        let mut v = Validator::new();
        v.email("email", "not-an-email");
        assert!(v.finish().is_err());

        let mut v = Validator::new();
        v.email("email", "missing@tld");
        assert!(v.finish().is_err());
    }

    #[test]
    fn test_slug_validation() {
        for slug in ["acme-rebrand", "a", "v2-launch-2024"] {
            let mut v = Validator::new();
            v.slug("slug", slug);
            assert!(v.finish().is_ok(), "expected {slug} to be valid");
        }

        for slug in ["", "Has-Caps", "trailing-", "-leading", "two--dashes", "spa ce"] {
            let mut v = Validator::new();
            v.slug("slug", slug);
            assert!(v.finish().is_err(), "expected {slug} to be invalid");
        }
    }

    #[test]
    fn test_username_validation() {
        let mut v = Validator::new();
        v.username("username", "alice_01");
        assert!(v.finish().is_ok());

        let mut v = Validator::new();
        v.username("username", "ab");
        assert!(v.finish().is_err());

        let mut v = Validator::new();
        v.username("username", "has space");
        assert!(v.finish().is_err());
    }

    #[test]
    fn test_errors_accumulate() {
        let mut v = Validator::new();
        v.require("name", "").email("email", "nope").password("password", "short");

        let Err(ApiError::ValidationError(errors)) = v.finish() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_setting_type_validation() {
        let mut v = Validator::new();
        v.setting_type("type", "boolean");
        assert!(v.finish().is_ok());

        let mut v = Validator::new();
        v.setting_type("type", "yaml");
        assert!(v.finish().is_err());
    }
}
