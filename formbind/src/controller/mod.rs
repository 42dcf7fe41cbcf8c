//! Field controllers.
//!
//! A controller binds one field name in the [`ValueStore`] to one renderable
//! surface. Every concrete controller implements [`FieldController`] and
//! embeds a [`FieldCore`] holding the state all fields share: name, label,
//! surface identifier, validator set and current error.
//!
//! Sync runs in two explicit directions:
//!
//! - [`FieldController::refresh`] pushes the store value into the surface.
//!   It only touches the renderer when the surface shows something else.
//! - [`FieldController::handle_event`] pulls the new value out of the
//!   renderer after a user edit and writes it to the store.
//!
//! Controllers never hold on to the store or presenter. Both are lent to
//! them for the duration of a call through a [`FieldContext`].

mod choice;
mod display;
mod filter;
mod image;
mod picker;
mod text;

use std::any::Any;
use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use log::debug;

use crate::model::{ImageRecord, Value, ValueStore};
use crate::presenter::ModalPresenter;
use crate::surface::{SurfaceEvent, SurfaceId, SurfaceRenderer};
use crate::validation::{ValidationFailure, Validator};

pub use choice::{ChoiceGroupController, ChoiceKind, ItemValues};
pub use display::{ButtonController, SeparatorController, StaticTextController, ValueTextController};
pub use image::ImageGroupController;
pub use picker::{DATE_FORMAT, DateTimePickerController, TIME_FORMAT_12H, TIME_FORMAT_24H};
pub use text::{Suggestion, TextFieldController};

// =============================================================================
// Context
// =============================================================================

/// Collaborators lent to a controller for one call.
///
/// Also counts the validation notifications raised during the call, so the
/// owner can decide afterwards whether the form must be re-validated.
pub struct FieldContext<'a> {
    store: &'a ValueStore,
    renderer: &'a Arc<dyn SurfaceRenderer>,
    presenter: &'a Arc<dyn ModalPresenter>,
    notifications: usize,
}

impl<'a> FieldContext<'a> {
    /// Create a context over the given collaborators.
    pub fn new(
        store: &'a ValueStore,
        renderer: &'a Arc<dyn SurfaceRenderer>,
        presenter: &'a Arc<dyn ModalPresenter>,
    ) -> Self {
        Self {
            store,
            renderer,
            presenter,
            notifications: 0,
        }
    }

    /// The form's value store.
    pub fn store(&self) -> &ValueStore {
        self.store
    }

    /// The renderer owning every surface.
    pub fn renderer(&self) -> &dyn SurfaceRenderer {
        self.renderer.as_ref()
    }

    /// Shared handle to the renderer, kept by controllers once bound.
    pub fn renderer_handle(&self) -> Arc<dyn SurfaceRenderer> {
        Arc::clone(self.renderer)
    }

    /// The modal presenter.
    pub fn presenter(&self) -> &dyn ModalPresenter {
        self.presenter.as_ref()
    }

    /// Signal that a user-driven change should trigger live validation.
    pub fn notify_validation(&mut self) {
        self.notifications += 1;
    }

    /// Number of validation notifications raised so far.
    pub fn notifications(&self) -> usize {
        self.notifications
    }

    /// The current local moment, used to seed choosers without a value.
    pub fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

impl fmt::Debug for FieldContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldContext")
            .field("store", &self.store)
            .field("notifications", &self.notifications)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Shared state
// =============================================================================

/// State shared by every field controller.
pub struct FieldCore {
    name: String,
    label: Option<String>,
    surface_id: SurfaceId,
    renderer: OnceCell<Arc<dyn SurfaceRenderer>>,
    validators: BTreeSet<Validator>,
    error: Option<String>,
}

impl FieldCore {
    /// Create the core for field `name` whose root surface is `surface_id`.
    pub fn new(name: impl Into<String>, surface_id: SurfaceId) -> Self {
        Self {
            name: name.into(),
            label: None,
            surface_id,
            renderer: OnceCell::new(),
            validators: BTreeSet::new(),
            error: None,
        }
    }

    /// Field name; the key into the value store.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label, falling back to the name.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Set the display label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Identifier of the root surface.
    pub fn surface_id(&self) -> SurfaceId {
        self.surface_id
    }

    /// Returns `true` once the surface has been created.
    pub fn is_created(&self) -> bool {
        self.renderer.get().is_some()
    }

    /// The renderer the surface was created on, once created.
    pub fn renderer(&self) -> Option<&dyn SurfaceRenderer> {
        self.renderer.get().map(|r| r.as_ref())
    }

    /// Record that the surface now exists on `renderer`.
    ///
    /// Later calls are ignored. An error set before creation is shown now.
    pub fn bind(&mut self, renderer: Arc<dyn SurfaceRenderer>) {
        if self.renderer.set(renderer).is_ok()
            && let (Some(renderer), Some(message)) = (self.renderer.get(), self.error.as_deref())
        {
            renderer.set_error(self.surface_id, Some(message));
        }
    }

    // -------------------------------------------------------------------------
    // Validators
    // -------------------------------------------------------------------------

    /// The validator set.
    pub fn validators(&self) -> &BTreeSet<Validator> {
        &self.validators
    }

    /// Add or remove a rule. Adding a rule already present changes nothing.
    pub fn set_validator(&mut self, validator: Validator, enabled: bool) {
        if enabled {
            self.validators.insert(validator);
        } else {
            self.validators.remove(&validator);
        }
    }

    /// Returns `true` if the required rule is in the set.
    pub fn is_required(&self) -> bool {
        self.validators.contains(&Validator::Required)
    }

    /// Add or remove the required rule.
    pub fn set_required(&mut self, required: bool) {
        self.set_validator(Validator::Required, required);
    }

    /// Returns `true` if the mobile number rule is in the set.
    pub fn is_mobile_required(&self) -> bool {
        self.validators.contains(&Validator::Mobile)
    }

    /// Add or remove the mobile number rule.
    pub fn set_mobile(&mut self, mobile: bool) {
        self.set_validator(Validator::Mobile, mobile);
    }

    /// Run every rule against the field's current value.
    ///
    /// All failures are collected in rule order; nothing is cached between
    /// calls.
    pub fn validate(&self, store: &ValueStore) -> Vec<ValidationFailure> {
        let value = store.get(&self.name);
        self.validators
            .iter()
            .flat_map(|v| v.validate(value.as_ref(), &self.name, self.label()))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Error indicator
    // -------------------------------------------------------------------------

    /// The message currently shown by the error indicator.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show or clear the error indicator.
    ///
    /// Before the surface exists the message is only remembered.
    pub fn set_error(&mut self, message: Option<String>) {
        if self.error == message {
            return;
        }
        self.error = message;
        if let Some(renderer) = self.renderer.get() {
            renderer.set_error(self.surface_id, self.error.as_deref());
        }
    }
}

impl fmt::Debug for FieldCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCore")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("surface_id", &self.surface_id)
            .field("created", &self.is_created())
            .field("validators", &self.validators)
            .field("error", &self.error)
            .finish()
    }
}

// =============================================================================
// Actions
// =============================================================================

/// Something the application has to act on after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldAction {
    /// An image tile was tapped; the app may pick a new image for it.
    ImageSelected {
        field: String,
        index: usize,
        image: ImageRecord,
        value: Value,
    },
    /// An enabled button was clicked.
    ButtonPressed { field: String },
}

// =============================================================================
// Controller trait
// =============================================================================

/// Behavior of one field kind.
///
/// Implementors provide surface construction, store-to-surface refresh and,
/// where the field is interactive, event handling. Everything else has a
/// default built on [`FieldCore`].
pub trait FieldController: fmt::Debug {
    /// Shared state.
    fn core(&self) -> &FieldCore;

    /// Shared state, mutably.
    fn core_mut(&mut self) -> &mut FieldCore;

    /// As Any for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// As Any for mutable downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Construct the native surfaces.
    ///
    /// Prefilled values must be written to the store here; the first
    /// [`refresh`](Self::refresh) runs right after.
    fn create_surface(&mut self, cx: &mut FieldContext<'_>);

    /// Push the store value into the surface.
    ///
    /// Only called once the surface exists. Must not touch the renderer when
    /// the surface already shows the current value.
    fn refresh(&mut self, cx: &mut FieldContext<'_>);

    /// Called once when the controller joins a form.
    fn attach(&mut self, _cx: &mut FieldContext<'_>) {}

    /// Returns `true` if `id` is the root surface or one of its members.
    fn owns_surface(&self, id: SurfaceId) -> bool {
        self.core().surface_id() == id
    }

    /// React to a user event on one of the owned surfaces.
    fn handle_event(
        &mut self,
        _event: &SurfaceEvent,
        _cx: &mut FieldContext<'_>,
    ) -> Option<FieldAction> {
        None
    }

    /// Run the validator set against the store.
    fn validate_input(&self, store: &ValueStore) -> Vec<ValidationFailure> {
        self.core().validate(store)
    }

    /// Returns the root surface, creating it on first access.
    fn surface(&mut self, cx: &mut FieldContext<'_>) -> SurfaceId {
        if !self.core().is_created() {
            debug!(
                "Creating surface {} for field '{}'",
                self.core().surface_id(),
                self.core().name()
            );
            self.create_surface(cx);
            self.core_mut().bind(cx.renderer_handle());
            self.refresh(cx);
        }
        self.core().surface_id()
    }

    /// Field name.
    fn name(&self) -> &str {
        self.core().name()
    }

    /// Display label.
    fn label(&self) -> &str {
        self.core().label()
    }

    /// Show or clear the error indicator.
    fn set_error(&mut self, message: Option<String>) {
        self.core_mut().set_error(message);
    }

    /// The message currently shown by the error indicator.
    fn error(&self) -> Option<&str> {
        self.core().error()
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Text a surface should show for the field: the value's display form, or
/// nothing when absent.
pub(crate) fn display_text(store: &ValueStore, name: &str) -> String {
    store.get(name).map(|v| v.to_string()).unwrap_or_default()
}

/// Replace the surface text unless it already reads `text`.
pub(crate) fn sync_text(renderer: &dyn SurfaceRenderer, id: SurfaceId, text: &str) {
    if renderer.text(id) != text {
        renderer.set_text(id, text);
    }
}

/// Resolve the value an item stands for under `policy`.
pub(crate) fn resolve_item_value(policy: &ItemValues, label: &str, index: usize) -> Value {
    match policy {
        ItemValues::Labels => Value::from(label),
        ItemValues::Indices => Value::from(index),
        ItemValues::Explicit(values) => values
            .get(index)
            .cloned()
            .unwrap_or_else(|| Value::from(index)),
    }
}
