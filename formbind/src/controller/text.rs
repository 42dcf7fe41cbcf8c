//! Text entry field.

use std::any::Any;

use serde::{Deserialize, Serialize};

use super::filter::fuzzy_rank;
use super::{FieldAction, FieldContext, FieldController, FieldCore, display_text, sync_text};
use crate::surface::{
    InputType, PHONE_MAX_LENGTH, SurfaceEvent, SurfaceIdAllocator, SurfaceKind, SurfaceSpec,
};

/// One auto-complete option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Text shown in the dropdown.
    pub name: String,
    /// Application identifier of the option.
    pub id: String,
}

impl Suggestion {
    /// Creates a suggestion.
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// Editable text bound to a text value.
///
/// Covers single and multi-line entry, secure entry, numeric and phone masks,
/// and auto-complete. Every edit is written to the store as text; all
/// variants except auto-complete then raise a validation notification.
///
/// # Example
///
/// ```
/// use formbind::controller::{FieldController, TextFieldController};
/// use formbind::surface::SurfaceIdAllocator;
///
/// let ids = SurfaceIdAllocator::new();
/// let phone = TextFieldController::new(&ids, "phone")
///     .label("Phone")
///     .mobile(true)
///     .required(true);
///
/// assert!(phone.current_input_type().is_phone());
/// assert!(phone.core().is_mobile_required());
/// assert_eq!(phone.core().label(), "Phone");
/// ```
#[derive(Debug)]
pub struct TextFieldController {
    core: FieldCore,
    placeholder: Option<String>,
    submitted: Option<String>,
    input_type: InputType,
    suggestions: Option<Vec<Suggestion>>,
}

impl TextFieldController {
    /// Create a single-line text entry for field `name`.
    pub fn new(ids: &SurfaceIdAllocator, name: impl Into<String>) -> Self {
        Self {
            core: FieldCore::new(name, ids.generate()),
            placeholder: None,
            submitted: None,
            input_type: InputType::default(),
            suggestions: None,
        }
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.core.set_label(label);
        self
    }

    /// Set the hint shown while empty.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the value written to the store when the surface is created.
    pub fn submitted_value(mut self, value: impl Into<String>) -> Self {
        self.submitted = Some(value.into());
        self
    }

    /// Make the field required.
    pub fn required(mut self, required: bool) -> Self {
        self.core.set_required(required);
        self
    }

    /// Require a mobile number (switches to the phone mask).
    pub fn mobile(mut self, mobile: bool) -> Self {
        self.set_mobile(mobile);
        self
    }

    /// Set the full input type mask.
    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    /// Allow several lines.
    pub fn multi_line(mut self, multi_line: bool) -> Self {
        self.set_multi_line(multi_line);
        self
    }

    /// Hide the entered text.
    pub fn secure(mut self, secure: bool) -> Self {
        self.set_secure_entry(secure);
        self
    }

    /// Turn the entry into an auto-complete with the given options.
    pub fn autocomplete(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The current input type mask.
    pub fn current_input_type(&self) -> InputType {
        self.input_type
    }

    /// Returns `true` if the entry offers suggestions.
    pub fn is_auto_complete(&self) -> bool {
        self.suggestions.is_some()
    }

    /// All suggestions in declaration order.
    pub fn suggestions(&self) -> &[Suggestion] {
        self.suggestions.as_deref().unwrap_or_default()
    }

    /// Suggestions matching `query`, best match first.
    pub fn suggestions_for(&self, query: &str) -> Vec<&Suggestion> {
        let suggestions = self.suggestions();
        fuzzy_rank(query, suggestions.iter().map(|s| s.name.as_str()))
            .into_iter()
            .map(|index| &suggestions[index])
            .collect()
    }

    /// Returns `true` if the multi-line flag is set.
    pub fn is_multi_line(&self) -> bool {
        self.input_type.is_multi_line()
    }

    /// Set or clear the multi-line flag, re-applying it to a live surface.
    pub fn set_multi_line(&mut self, multi_line: bool) {
        self.update_input_type(
            self.input_type
                .with_flag(InputType::FLAG_MULTI_LINE, multi_line),
        );
    }

    /// Returns `true` if the password variation is set.
    pub fn is_secure_entry(&self) -> bool {
        self.input_type.is_secure()
    }

    /// Set or clear the password variation, re-applying it to a live surface.
    pub fn set_secure_entry(&mut self, secure: bool) {
        self.update_input_type(
            self.input_type
                .with_flag(InputType::VARIATION_PASSWORD, secure),
        );
    }

    /// Returns `true` if the mobile number rule is active.
    pub fn is_mobile(&self) -> bool {
        self.core.is_mobile_required()
    }

    /// Toggle the mobile number rule together with the phone mask.
    pub fn set_mobile(&mut self, mobile: bool) {
        self.core.set_mobile(mobile);
        let class = if mobile {
            InputType::CLASS_PHONE
        } else {
            InputType::CLASS_TEXT
        };
        self.update_input_type(self.input_type.with_class(class));
    }

    fn update_input_type(&mut self, input_type: InputType) {
        if self.input_type == input_type {
            return;
        }
        let was_phone = self.input_type.is_phone();
        self.input_type = input_type;
        if let Some(renderer) = self.core.renderer() {
            let id = self.core.surface_id();
            renderer.set_input_type(id, input_type);
            // The length cap travels with the phone class
            if was_phone != input_type.is_phone() {
                renderer.set_max_length(id, self.max_length());
            }
        }
    }

    fn max_length(&self) -> Option<usize> {
        self.input_type.is_phone().then_some(PHONE_MAX_LENGTH)
    }
}

impl FieldController for TextFieldController {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn create_surface(&mut self, cx: &mut FieldContext<'_>) {
        if let Some(value) = &self.submitted {
            cx.store().set(self.core.name(), value.as_str());
        }

        let kind = if self.is_auto_complete() {
            SurfaceKind::AutoComplete
        } else {
            SurfaceKind::TextEntry
        };
        let spec = SurfaceSpec::new(self.core.surface_id(), kind)
            .caption(self.core.label())
            .placeholder(self.placeholder.as_deref())
            .input_type(self.input_type)
            .max_length(self.max_length())
            .options(self.suggestions().iter().map(|s| s.name.clone()).collect());
        cx.renderer().create_surface(&spec);
    }

    fn refresh(&mut self, cx: &mut FieldContext<'_>) {
        let text = display_text(cx.store(), self.core.name());
        sync_text(cx.renderer(), self.core.surface_id(), &text);
    }

    fn handle_event(
        &mut self,
        event: &SurfaceEvent,
        cx: &mut FieldContext<'_>,
    ) -> Option<FieldAction> {
        if let SurfaceEvent::Edited(id) = event {
            let mut text = cx.renderer().text(*id);
            if let Some(max) = self.max_length()
                && let Some((cut, _)) = text.char_indices().nth(max)
            {
                text.truncate(cut);
                cx.renderer().set_text(*id, &text);
            }
            cx.store().set(self.core.name(), text);
            if !self.is_auto_complete() {
                cx.notify_validation();
            }
        }
        None
    }
}
