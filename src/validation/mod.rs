//! Contact schema validation.
//!
//! Validation never fails halfway: either every required field is present and
//! well formed, or the caller gets a map of field name to messages.

use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::database::models::{ContactPatch, NewContact};

/// Field name to the list of problems found in it
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Key used when the payload as a whole is unusable
pub const SCHEMA_KEY: &str = "_schema";

pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_EMAIL_LENGTH: usize = 50;
pub const MAX_PHONE_LENGTH: usize = 11;

const MISSING: &str = "Missing data for required field.";
const NULL: &str = "Field may not be null.";
const NOT_A_STRING: &str = "Not a valid string.";
const INVALID_EMAIL: &str = "Not a valid email address.";
const INVALID_INPUT: &str = "Invalid input type.";

static EMAIL_USER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+(\.[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+)*$").unwrap()
});
static EMAIL_DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9-]{2,63}$").unwrap()
});

/// Validate a create payload: `name`, `email` and `phone` are required strings.
/// Keys other than those three are ignored.
pub fn validate_contact(input: &Value) -> Result<NewContact, FieldErrors> {
    let Some(object) = input.as_object() else {
        let mut errors = FieldErrors::new();
        errors.insert(SCHEMA_KEY.to_string(), vec![INVALID_INPUT.to_string()]);
        return Err(errors);
    };

    let mut errors = FieldErrors::new();

    let name = required_string(object, "name", &mut errors).and_then(|name| {
        let mut problems = Vec::new();
        if name.is_empty() {
            problems.push("Shorter than minimum length 1.".to_string());
        }
        check_length(&name, MAX_NAME_LENGTH, &mut problems);
        record(&mut errors, "name", problems, name)
    });

    let email = required_string(object, "email", &mut errors).and_then(|email| {
        let mut problems = Vec::new();
        if !is_valid_email(&email) {
            problems.push(INVALID_EMAIL.to_string());
        }
        check_length(&email, MAX_EMAIL_LENGTH, &mut problems);
        record(&mut errors, "email", problems, email)
    });

    let phone = required_string(object, "phone", &mut errors).and_then(|phone| {
        let mut problems = Vec::new();
        check_length(&phone, MAX_PHONE_LENGTH, &mut problems);
        record(&mut errors, "phone", problems, phone)
    });

    match (name, email, phone) {
        (Some(name), Some(email), Some(phone)) if errors.is_empty() => {
            Ok(NewContact { name, email, phone })
        }
        _ => Err(errors),
    }
}

/// Read an update payload. Only `name`, `email` and `phone` are looked at;
/// a missing or null key leaves that column unchanged. Lengths and email
/// syntax are not checked here.
pub fn validate_patch(input: &Value) -> Result<ContactPatch, FieldErrors> {
    let Some(object) = input.as_object() else {
        let mut errors = FieldErrors::new();
        errors.insert(SCHEMA_KEY.to_string(), vec![INVALID_INPUT.to_string()]);
        return Err(errors);
    };

    let mut errors = FieldErrors::new();
    let name = optional_string(object, "name", &mut errors);
    let email = optional_string(object, "email", &mut errors);
    let phone = optional_string(object, "phone", &mut errors);

    if errors.is_empty() {
        Ok(ContactPatch { name, email, phone })
    } else {
        Err(errors)
    }
}

/// Syntactic email check: `local@domain`, split on the last `@`
pub fn is_valid_email(email: &str) -> bool {
    let Some((user, domain)) = email.rsplit_once('@') else {
        return false;
    };

    if user.is_empty() || !EMAIL_USER_REGEX.is_match(user) {
        return false;
    }

    domain == "localhost" || (EMAIL_DOMAIN_REGEX.is_match(domain) && !domain.ends_with('-'))
}

fn required_string(object: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    let message = match object.get(field) {
        Some(Value::String(s)) => return Some(s.clone()),
        None => MISSING,
        Some(Value::Null) => NULL,
        Some(_) => NOT_A_STRING,
    };
    errors.insert(field.to_string(), vec![message.to_string()]);
    None
}

fn optional_string(object: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match object.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        None | Some(Value::Null) => None,
        Some(_) => {
            errors.insert(field.to_string(), vec![NOT_A_STRING.to_string()]);
            None
        }
    }
}

fn check_length(value: &str, max: usize, problems: &mut Vec<String>) {
    if value.chars().count() > max {
        problems.push(format!("Longer than maximum length {max}."));
    }
}

fn record(errors: &mut FieldErrors, field: &str, problems: Vec<String>, value: String) -> Option<String> {
    if problems.is_empty() {
        Some(value)
    } else {
        errors.insert(field.to_string(), problems);
        None
    }
}
