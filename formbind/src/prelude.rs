//! Prelude module for convenient imports.
//!
//! ```
//! use formbind::prelude::*;
//! ```

// Form
pub use crate::form::{FormController, FormOptions, FormSection};

// Controllers
pub use crate::controller::{
    ButtonController, ChoiceGroupController, ChoiceKind, DateTimePickerController, FieldAction,
    FieldController, ImageGroupController, ItemValues, SeparatorController, StaticTextController,
    Suggestion, TextFieldController, ValueTextController,
};

// Model and validation
pub use crate::error::{FormError, FormResult};
pub use crate::model::{ImageRecord, Value, ValueStore};
pub use crate::validation::{ErrorDisplay, ValidationFailure, Validator};

// Collaborators
pub use crate::presenter::{ChooserKind, ModalPresenter};
pub use crate::surface::{SurfaceEvent, SurfaceId, SurfaceIdAllocator, SurfaceRenderer};
