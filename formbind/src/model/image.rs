//! Image record type

use serde::Deserialize;
use serde::Serialize;

/// One entry of an image group.
///
/// The image itself is never loaded here; `image_ref` is an opaque reference
/// handed to the renderer's image loader.
///
/// # Example
///
/// ```
/// use formbind::model::ImageRecord;
///
/// let front = ImageRecord::new("Front side", Some("front.png")).with_color("#f68c1e");
/// assert!(front.has_image());
///
/// let back = ImageRecord::new("Back side", None::<String>);
/// assert!(!back.has_image());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Caption, also used as the label of a failure for this record.
    pub text: String,
    /// Reference to the image, if one was picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Accent color for the tile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ImageRecord {
    /// Creates a record with an optional image reference.
    pub fn new(text: impl Into<String>, image_ref: Option<impl Into<String>>) -> Self {
        Self {
            text: text.into(),
            image_ref: image_ref.map(Into::into),
            color: None,
        }
    }

    /// Sets the accent color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Returns `true` if the record has a non-empty image reference.
    pub fn has_image(&self) -> bool {
        self.image_ref.as_deref().is_some_and(|r| !r.is_empty())
    }
}
