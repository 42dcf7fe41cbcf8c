use std::fmt;

use super::messages::MessageResolver;

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A required value is missing or empty.
    RequiredField,
    /// The value is not a valid mobile number.
    RequiredMobile,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::RequiredField => f.write_str("required field"),
            FailureKind::RequiredMobile => f.write_str("required mobile number"),
        }
    }
}

/// A single validation failure.
///
/// The user-facing message is not stored. It is resolved each time it is
/// displayed, so a locale change between validation and display is honored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Name of the field that failed (key into the value store).
    pub field_name: String,
    /// Label used in the message.
    pub field_label: String,
    /// The failed rule.
    pub kind: FailureKind,
}

impl ValidationFailure {
    /// Creates a new failure.
    pub fn new(
        field_name: impl Into<String>,
        field_label: impl Into<String>,
        kind: FailureKind,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            field_label: field_label.into(),
            kind,
        }
    }

    /// Resolve the display message for `locale`.
    pub fn message(&self, resolver: &dyn MessageResolver, locale: &str) -> String {
        resolver.resolve(self.kind, &self.field_label, locale)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_name, self.kind)
    }
}
