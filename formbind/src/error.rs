//! Error types

use crate::surface::SurfaceId;

/// Result alias used throughout the crate.
pub type FormResult<T> = Result<T, FormError>;

/// Errors raised while building or driving a form.
///
/// Validation failures are not errors: they are collected as
/// [`ValidationFailure`](crate::validation::ValidationFailure) values and
/// never travel through this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// An explicit value list does not line up with the item list.
    #[error("Field '{field}' has {items} items but {values} values")]
    ValueCountMismatch {
        field: String,
        items: usize,
        values: usize,
    },

    /// No controller is registered under the given field name.
    #[error("Field '{0}' not found in form")]
    UnknownField(String),

    /// No controller owns the surface an event was reported for.
    #[error("No field owns surface {0}")]
    UnknownSurface(SurfaceId),

    /// The controller exists but is not of the requested concrete type.
    #[error("Field '{field}' is not a {expected}")]
    ControllerType {
        field: String,
        expected: &'static str,
    },

    /// Two controllers were registered under the same name.
    #[error("Field '{0}' is already registered")]
    DuplicateField(String),
}

impl FormError {
    /// Creates a value count mismatch error.
    pub fn value_count_mismatch(field: impl Into<String>, items: usize, values: usize) -> Self {
        Self::ValueCountMismatch {
            field: field.into(),
            items,
            values,
        }
    }

    /// Creates an unknown field error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField(field.into())
    }
}
