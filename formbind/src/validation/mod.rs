//! Validation rules, failures and their presentation.
//!
//! Every field controller owns a set of [`Validator`] tags. Validating a form
//! runs each tag against the field's current value and collects every
//! [`ValidationFailure`] (no short-circuit). Failures are then presented
//! through one of the [`ErrorDisplay`] strategies, resolving their text with a
//! [`MessageResolver`] at display time.
//!
//! # Example
//!
//! ```
//! use formbind::model::Value;
//! use formbind::validation::{DefaultMessages, Validator};
//!
//! let failures = Validator::Required.validate(Some(&Value::from("")), "name", "Name");
//! assert_eq!(failures[0].message(&DefaultMessages, "en"), "Name is required");
//! ```

mod error_display;
mod failure;
mod messages;
mod validator;

pub use error_display::ErrorDisplay;
pub use failure::{FailureKind, ValidationFailure};
pub use messages::{DefaultMessages, MessageResolver};
pub use validator::{Validator, is_valid_mobile_number};
