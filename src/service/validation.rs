//! Field rules for student payloads. Pure: no I/O, shared by create and update.

use crate::model::{NewStudent, StudentInput};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Every field rule a payload violated, in field order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationErrors {
    pub violations: Vec<String>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.violations.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// `atom(.atom)*@label(.label)+`. Atoms and labels accept any Unicode letter or digit.
/// Dots never lead, trail or repeat on either side of the `@`.
const EMAIL_PATTERN: &str = r"^[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+(?:\.[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+)*@[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?(?:\.[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?)+$";

fn email_pattern() -> Result<&'static Regex, &'static regex::Error> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(EMAIL_PATTERN)).as_ref()
}

fn is_email(s: &str) -> bool {
    match email_pattern() {
        Ok(re) => re.is_match(s),
        Err(e) => {
            tracing::error!(error = %e, "email pattern failed to compile; rejecting all emails");
            false
        }
    }
}

fn required(field: &str) -> String {
    format!("field {} is a required field", field)
}

/// Check all rules and return the validated payload, or every violation found.
pub fn validate_student(input: StudentInput) -> Result<NewStudent, ValidationErrors> {
    let mut violations = Vec::new();

    let name = input.name.filter(|s| !s.trim().is_empty());
    if name.is_none() {
        violations.push(required("name"));
    }

    let email = input.email.filter(|s| !s.trim().is_empty());
    match &email {
        None => violations.push(required("email")),
        Some(e) if !is_email(e) => {
            violations.push("field email must be a valid email address".to_string());
        }
        Some(_) => {}
    }

    match input.age {
        None => violations.push(required("age")),
        Some(a) if a <= 0 => violations.push("field age must be greater than 0".to_string()),
        Some(_) => {}
    }

    match (name, email, input.age) {
        (Some(name), Some(email), Some(age)) if violations.is_empty() => Ok(NewStudent { name, email, age }),
        _ => Err(ValidationErrors { violations }),
    }
}
