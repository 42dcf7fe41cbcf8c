//! Built-in validation rules.

use std::sync::LazyLock;

use regex::Regex;

use super::failure::{FailureKind, ValidationFailure};
use crate::model::Value;

static MOBILE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[56789][0-9]{9}$").expect("Invalid mobile number pattern"));

/// A validation rule.
///
/// Rules are plain tags: two `Validator`s are equal exactly when they are the
/// same rule, so a `BTreeSet<Validator>` holds each rule at most once and a
/// requirement is switched on or off by inserting or removing its tag.
///
/// Rules are pure. Running one twice on the same input gives the same
/// failures.
///
/// # Example
///
/// ```
/// use formbind::model::Value;
/// use formbind::validation::Validator;
///
/// let failures = Validator::Mobile.validate(Some(&Value::from("98765")), "phone", "Phone");
/// assert_eq!(failures.len(), 1);
/// assert_eq!(failures[0].field_name, "phone");
///
/// assert!(Validator::Required.validate(Some(&Value::from("abc")), "x", "X").is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Validator {
    /// The field must have a non-empty value; image records must all carry an image.
    Required,
    /// The field must hold a 10-digit mobile number starting with 5-9.
    Mobile,
}

impl Validator {
    /// Evaluate the rule against a field's current value.
    ///
    /// `value` is `None` when the store has no entry for the field. Returns
    /// an empty list when the value passes.
    pub fn validate(
        &self,
        value: Option<&Value>,
        field_name: &str,
        field_label: &str,
    ) -> Vec<ValidationFailure> {
        match self {
            Validator::Required => validate_required(value, field_name, field_label),
            Validator::Mobile => validate_mobile(value, field_name, field_label),
        }
    }
}

fn validate_required(
    value: Option<&Value>,
    field_name: &str,
    field_label: &str,
) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    // Each record without an image fails under its own caption
    if let Some(Value::Images(images)) = value {
        failures.extend(
            images
                .iter()
                .filter(|image| !image.has_image())
                .map(|image| {
                    ValidationFailure::new(field_name, &image.text, FailureKind::RequiredField)
                }),
        );
    }

    let missing = match value {
        None => true,
        Some(v) => v.is_empty_text(),
    };
    if missing {
        failures.push(ValidationFailure::new(
            field_name,
            field_label,
            FailureKind::RequiredField,
        ));
    }

    failures
}

fn validate_mobile(
    value: Option<&Value>,
    field_name: &str,
    field_label: &str,
) -> Vec<ValidationFailure> {
    let valid = value
        .and_then(Value::as_text)
        .is_some_and(is_valid_mobile_number);
    if valid {
        Vec::new()
    } else {
        vec![ValidationFailure::new(
            field_name,
            field_label,
            FailureKind::RequiredMobile,
        )]
    }
}

/// Returns `true` for exactly ten ASCII digits starting with 5, 6, 7, 8 or 9.
pub fn is_valid_mobile_number(phone: &str) -> bool {
    MOBILE_NUMBER.is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageRecord;

    #[test]
    fn test_required_absent() {
        let failures = Validator::Required.validate(None, "x", "X");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field_name, "x");
        assert_eq!(failures[0].field_label, "X");
        assert_eq!(failures[0].kind, FailureKind::RequiredField);
    }

    #[test]
    fn test_required_text() {
        assert!(
            Validator::Required
                .validate(Some(&Value::from("abc")), "x", "X")
                .is_empty()
        );
        assert_eq!(
            Validator::Required
                .validate(Some(&Value::from("")), "x", "X")
                .len(),
            1
        );
    }

    #[test]
    fn test_required_images() {
        let missing = Value::Images(vec![ImageRecord::new("Front", Some(""))]);
        let failures = Validator::Required.validate(Some(&missing), "x", "X");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field_label, "Front");

        let present = Value::Images(vec![ImageRecord::new("Front", Some("a.png"))]);
        assert!(
            Validator::Required
                .validate(Some(&present), "x", "X")
                .is_empty()
        );
    }

    #[test]
    fn test_required_each_missing_image_reports() {
        let images = Value::Images(vec![
            ImageRecord::new("Front", None::<String>),
            ImageRecord::new("Side", Some("side.png")),
            ImageRecord::new("Back", Some("")),
        ]);
        let labels: Vec<String> = Validator::Required
            .validate(Some(&images), "photos", "Photos")
            .into_iter()
            .map(|f| f.field_label)
            .collect();
        assert_eq!(labels, vec!["Front".to_string(), "Back".to_string()]);
    }

    #[test]
    fn test_mobile() {
        let check = |v: Option<Value>| Validator::Mobile.validate(v.as_ref(), "m", "M").is_empty();
        assert!(check(Some(Value::from("9876543210"))));
        assert!(check(Some(Value::from("5000000000"))));
        assert!(!check(Some(Value::from("1876543210"))));
        assert!(!check(Some(Value::from("98765"))));
        assert!(!check(Some(Value::from("98765432101"))));
        assert!(!check(Some(Value::from("98765abcde"))));
        assert!(!check(Some(Value::Int(9876543210))));
        assert!(!check(None));
    }

    #[test]
    fn test_idempotent() {
        let value = Value::from("");
        let first = Validator::Required.validate(Some(&value), "x", "X");
        let second = Validator::Required.validate(Some(&value), "x", "X");
        assert_eq!(first, second);
    }
}
