use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ApiError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Collects a message for every failed field check, then reports them all at once.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails when the value is absent, null, or blank. Returns the trimmed value.
    pub fn required<'a>(&mut self, field: &str, value: Option<&'a str>) -> Option<&'a str> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => Some(v),
            None => {
                self.errors
                    .push(format!("Please provide a value for \"{field}\""));
                None
            }
        }
    }

    /// Fails only when the value is absent, null, or empty. Whitespace counts as a value.
    pub fn non_empty<'a>(&mut self, field: &str, value: Option<&'a str>) -> Option<&'a str> {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => Some(v),
            None => {
                self.errors
                    .push(format!("Please provide a value for \"{field}\""));
                None
            }
        }
    }

    /// Like [`Validator::required`], and additionally checks email syntax.
    pub fn email<'a>(&mut self, field: &str, value: Option<&'a str>) -> Option<&'a str> {
        let v = self.required(field, value)?;
        if is_valid_email(v) {
            Some(v)
        } else {
            self.errors.push(format!("Please provide a valid \"{field}\""));
            None
        }
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}
