//! Renderable surfaces and the renderer interface.
//!
//! The engine never draws anything itself. Every field controller describes
//! the surfaces it needs with a [`SurfaceSpec`], hands it to a
//! [`SurfaceRenderer`], and afterwards talks to the surface only through the
//! narrow set of calls the trait exposes (text, checked state, enabled state,
//! error indicator, image). User interaction comes back as [`SurfaceEvent`]s
//! that the application feeds to
//! [`FormController::dispatch`](crate::form::FormController::dispatch).

mod input_type;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use chrono::NaiveDateTime;

use crate::model::ImageRecord;
use crate::presenter::ChooserKind;

pub use input_type::{InputType, PHONE_MAX_LENGTH};

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of one renderable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Returns the raw identifier.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the identifier `n` places after this one.
    ///
    /// Only meaningful inside a block obtained from
    /// [`SurfaceIdAllocator::reserve`].
    pub fn offset(self, n: usize) -> SurfaceId {
        SurfaceId(self.0 + n as u64)
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__surface_{}", self.0)
    }
}

static GLOBAL_ALLOCATOR: LazyLock<SurfaceIdAllocator> = LazyLock::new(SurfaceIdAllocator::new);

/// Monotonic source of [`SurfaceId`]s.
///
/// Identifiers are never reused and the counter is never reset. Clones share
/// the counter. [`SurfaceIdAllocator::global`] returns the process-wide
/// allocator; [`SurfaceIdAllocator::new`] creates an independent one.
#[derive(Debug, Clone)]
pub struct SurfaceIdAllocator {
    next: Arc<AtomicU64>,
}

impl SurfaceIdAllocator {
    /// Create an independent allocator starting at 1.
    pub fn new() -> Self {
        Self {
            next: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Returns a handle to the process-wide allocator.
    pub fn global() -> Self {
        GLOBAL_ALLOCATOR.clone()
    }

    /// Returns a fresh identifier.
    pub fn generate(&self) -> SurfaceId {
        SurfaceId(self.next.fetch_add(1, Ordering::SeqCst))
    }

    /// Reserves `count` consecutive identifiers and returns the first.
    ///
    /// Member `n` of the block is `base.offset(n)`. No later call to
    /// [`generate`](Self::generate) or `reserve` returns an identifier inside
    /// the block.
    pub fn reserve(&self, count: usize) -> SurfaceId {
        SurfaceId(self.next.fetch_add(count as u64, Ordering::SeqCst))
    }
}

impl Default for SurfaceIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Surface description
// =============================================================================

/// What kind of native element a surface is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Editable text box.
    TextEntry,
    /// Editable text box with a suggestion dropdown.
    AutoComplete,
    /// Read-only text.
    TextLabel,
    /// Horizontal rule.
    Separator,
    /// Clickable button showing text.
    Button,
    /// Container of checkboxes.
    CheckboxGroup,
    /// One checkbox inside a [`SurfaceKind::CheckboxGroup`].
    Checkbox,
    /// Container of radio buttons.
    RadioGroup,
    /// One radio button inside a [`SurfaceKind::RadioGroup`].
    Radio,
    /// Read-only text box that opens a chooser on focus or tap.
    Picker(ChooserKind),
    /// Grid of image tiles.
    ImageGrid,
    /// One tile inside a [`SurfaceKind::ImageGrid`].
    ImageTile,
}

/// Construction parameters for one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSpec {
    /// Identifier the renderer must report events under.
    pub id: SurfaceId,
    /// Kind of native element.
    pub kind: SurfaceKind,
    /// Containing surface, for members of a group.
    pub parent: Option<SurfaceId>,
    /// Fixed caption (checkbox label, static text, tile caption).
    pub caption: Option<String>,
    /// Hint shown while the surface is empty.
    pub placeholder: Option<String>,
    /// Content type mask for text surfaces.
    pub input_type: InputType,
    /// Maximum accepted text length.
    pub max_length: Option<usize>,
    /// Whether the user can type into the surface.
    pub read_only: bool,
    /// Dropdown options for auto-complete surfaces.
    pub options: Vec<String>,
}

impl SurfaceSpec {
    /// Create a spec with defaults for everything but id and kind.
    pub fn new(id: SurfaceId, kind: SurfaceKind) -> Self {
        Self {
            id,
            kind,
            parent: None,
            caption: None,
            placeholder: None,
            input_type: InputType::default(),
            max_length: None,
            read_only: false,
            options: Vec::new(),
        }
    }

    /// Set the containing surface.
    pub fn parent(mut self, parent: SurfaceId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the fixed caption.
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the placeholder, if any.
    pub fn placeholder(mut self, placeholder: Option<&str>) -> Self {
        self.placeholder = placeholder.map(str::to_string);
        self
    }

    /// Set the input type mask.
    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    /// Set the maximum text length.
    pub fn max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    /// Mark the surface as read-only.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Set dropdown options.
    pub fn options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }
}

/// Image to load into a surface region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// A concrete image reference.
    Ref(&'a str),
    /// The renderer's fallback placeholder.
    Placeholder,
}

impl<'a> ImageSource<'a> {
    /// Picks the record's image, or the placeholder when it has none.
    pub fn for_record(record: &'a ImageRecord) -> Self {
        match record.image_ref.as_deref() {
            Some(r) if !r.is_empty() => ImageSource::Ref(r),
            _ => ImageSource::Placeholder,
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// User interaction reported by the renderer.
///
/// Events carry only the surface they happened on. The owning controller
/// pulls whatever it needs (text, checked state) back from the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// The user changed the text of a text surface.
    Edited(SurfaceId),
    /// The user flipped a checkbox or radio button.
    Toggled(SurfaceId),
    /// The surface gained focus.
    Focused(SurfaceId),
    /// The surface was tapped or clicked.
    Clicked(SurfaceId),
    /// A chooser opened for this surface was confirmed.
    ChooserConfirmed {
        /// Surface the chooser was opened for.
        surface: SurfaceId,
        /// Chosen moment; only the date or time part is used.
        value: NaiveDateTime,
    },
    /// A chooser opened for this surface was closed.
    ChooserDismissed(SurfaceId),
}

impl SurfaceEvent {
    /// Returns the surface the event belongs to.
    pub fn surface(&self) -> SurfaceId {
        match self {
            SurfaceEvent::Edited(id)
            | SurfaceEvent::Toggled(id)
            | SurfaceEvent::Focused(id)
            | SurfaceEvent::Clicked(id)
            | SurfaceEvent::ChooserDismissed(id) => *id,
            SurfaceEvent::ChooserConfirmed { surface, .. } => *surface,
        }
    }
}

// =============================================================================
// Renderer interface
// =============================================================================

/// The rendering surface the engine drives.
///
/// Implementations own the native elements and map [`SurfaceId`]s to them.
/// All calls happen on the event-loop thread; implementations use interior
/// mutability.
pub trait SurfaceRenderer: Send + Sync {
    /// Construct the native element described by `spec`.
    fn create_surface(&self, spec: &SurfaceSpec);

    /// Replace the displayed text.
    fn set_text(&self, id: SurfaceId, text: &str);

    /// Get the displayed text.
    fn text(&self, id: SurfaceId) -> String;

    /// Set the checked state of a checkbox or radio button.
    fn set_checked(&self, id: SurfaceId, checked: bool);

    /// Get the checked state of a checkbox or radio button.
    fn is_checked(&self, id: SurfaceId) -> bool;

    /// Enable or disable the surface, swapping its visual affordance.
    fn set_enabled(&self, id: SurfaceId, enabled: bool);

    /// Re-apply the input type mask of a text surface.
    fn set_input_type(&self, id: SurfaceId, input_type: InputType);

    /// Limit how many characters a text surface accepts; `None` lifts the limit.
    fn set_max_length(&self, id: SurfaceId, max_length: Option<usize>);

    /// Show or clear the error indicator.
    fn set_error(&self, id: SurfaceId, message: Option<&str>);

    /// Load an image into the surface.
    fn load_image(&self, id: SurfaceId, source: ImageSource<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_monotonic() {
        let ids = SurfaceIdAllocator::new();
        let a = ids.generate();
        let b = ids.generate();
        assert!(b > a);
    }

    #[test]
    fn test_reserve_blocks_range() {
        let ids = SurfaceIdAllocator::new();
        let before = ids.generate();
        let base = ids.reserve(3);
        let after = ids.generate();
        assert!(base > before);
        assert_eq!(after, base.offset(3));
    }

    #[test]
    fn test_clones_share_counter() {
        let ids = SurfaceIdAllocator::new();
        let other = ids.clone();
        let a = ids.generate();
        let b = other.generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_independent_allocators() {
        let a = SurfaceIdAllocator::new().generate();
        let b = SurfaceIdAllocator::new().generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_image_source_fallback() {
        let with = ImageRecord::new("a", Some("a.png"));
        let empty = ImageRecord::new("b", Some(""));
        let none = ImageRecord::new("c", None::<String>);
        assert_eq!(ImageSource::for_record(&with), ImageSource::Ref("a.png"));
        assert_eq!(ImageSource::for_record(&empty), ImageSource::Placeholder);
        assert_eq!(ImageSource::for_record(&none), ImageSource::Placeholder);
    }
}
