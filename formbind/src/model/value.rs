//! Value enum for dynamic field values

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::ImageRecord;

/// A dynamic value that can be held by any field in a [`ValueStore`](super::ValueStore).
///
/// There is deliberately no null variant: a field without a value simply has
/// no entry in the store, which is distinct from an entry holding an empty
/// string or an empty selection.
///
/// # Type Mapping
///
/// | Field kind | Rust Variant |
/// |------------|--------------|
/// | text entry, date/time picker | `Text` |
/// | choice group selection | `Set` |
/// | image group | `Images` |
/// | positional selection entry | `Int` |
///
/// Deserialization is untagged and tries variants in declaration order, so an
/// empty JSON array always becomes an empty `Set`, never an empty `Images`.
///
/// # Example
///
/// ```
/// use formbind::model::Value;
///
/// let name = Value::from("Asha");
/// let position = Value::from(2usize);
/// let flag = Value::from(true);
/// assert_eq!(name.to_string(), "Asha");
/// assert_eq!(position, Value::Int(2));
/// assert_eq!(flag.type_name(), "bool");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// Integer value; also used for 0-based item positions.
    Int(i64),
    /// String value.
    Text(String),
    /// Set of selected values.
    Set(BTreeSet<Value>),
    /// Ordered collection of image records.
    Images(Vec<ImageRecord>),
}

impl Value {
    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Text(_) => "text",
            Value::Set(_) => "set",
            Value::Images(_) => "images",
        }
    }

    /// Returns the string slice if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the selection if this is a set value.
    pub fn as_set(&self) -> Option<&BTreeSet<Value>> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Returns the image records if this is an image collection.
    pub fn as_images(&self) -> Option<&[ImageRecord]> {
        match self {
            Value::Images(images) => Some(images),
            _ => None,
        }
    }

    /// Returns `true` for a text value holding the empty string.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Text(s) => f.write_str(s),
            Value::Set(set) => {
                for (i, value) in set.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
            Value::Images(images) => {
                for (i, image) in images.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&image.text)?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<BTreeSet<Value>> for Value {
    fn from(v: BTreeSet<Value>) -> Self {
        Value::Set(v)
    }
}

impl From<Vec<ImageRecord>> for Value {
    fn from(v: Vec<ImageRecord>) -> Self {
        Value::Images(v)
    }
}
