//! The top-level form.
//!
//! [`FormController`] owns the sections, the value store and the
//! collaborators every controller is driven through. It routes surface
//! events to the owning controller, runs validation across all sections and
//! presents failures with the configured [`ErrorDisplay`].

mod options;
mod section;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::{debug, error, trace};

use crate::controller::{FieldAction, FieldContext, FieldController};
use crate::error::{FormError, FormResult};
use crate::model::ValueStore;
use crate::presenter::ModalPresenter;
use crate::surface::{SurfaceEvent, SurfaceId, SurfaceIdAllocator, SurfaceRenderer};
use crate::validation::{DefaultMessages, ErrorDisplay, MessageResolver, ValidationFailure};

pub use options::FormOptions;
pub use section::FormSection;

/// A runtime-assembled form.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use formbind::controller::TextFieldController;
/// use formbind::form::{FormController, FormSection};
/// use formbind::headless::{HeadlessPresenter, HeadlessRenderer};
/// use formbind::surface::SurfaceIdAllocator;
///
/// let renderer = Arc::new(HeadlessRenderer::new());
/// let mut form = FormController::new(renderer.clone(), Arc::new(HeadlessPresenter::new()))
///     .with_ids(SurfaceIdAllocator::new());
///
/// let name = TextFieldController::new(form.ids(), "name")
///     .label("Name")
///     .required(true);
/// form.add_section(FormSection::new().with(name)).unwrap();
/// form.render().unwrap();
///
/// let failures = form.validate_and_display().unwrap();
/// assert_eq!(failures.len(), 1);
/// assert_eq!(form.element("name").unwrap().error(), Some("Name is required"));
/// ```
pub struct FormController {
    sections: Vec<FormSection>,
    store: ValueStore,
    ids: SurfaceIdAllocator,
    renderer: Arc<dyn SurfaceRenderer>,
    presenter: Arc<dyn ModalPresenter>,
    resolver: Arc<dyn MessageResolver>,
    options: FormOptions,
    validation_notifications: usize,
}

impl FormController {
    /// Create an empty form drawing on `renderer`.
    ///
    /// Uses the process-wide id allocator, a fresh store, the built-in
    /// messages and default options.
    pub fn new(renderer: Arc<dyn SurfaceRenderer>, presenter: Arc<dyn ModalPresenter>) -> Self {
        Self {
            sections: Vec::new(),
            store: ValueStore::new(),
            ids: SurfaceIdAllocator::global(),
            renderer,
            presenter,
            resolver: Arc::new(DefaultMessages),
            options: FormOptions::default(),
            validation_notifications: 0,
        }
    }

    /// Use a specific id allocator.
    pub fn with_ids(mut self, ids: SurfaceIdAllocator) -> Self {
        self.ids = ids;
        self
    }

    /// Use an existing (possibly prefilled) store.
    pub fn with_store(mut self, store: ValueStore) -> Self {
        self.store = store;
        self
    }

    /// Use a custom message resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn MessageResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Set the options.
    pub fn with_options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns a fresh surface identifier.
    pub fn generate_surface_id(&self) -> SurfaceId {
        self.ids.generate()
    }

    /// The allocator controllers of this form must be built with.
    pub fn ids(&self) -> &SurfaceIdAllocator {
        &self.ids
    }

    /// The value store shared by every field.
    pub fn store(&self) -> &ValueStore {
        &self.store
    }

    /// Current options.
    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Locale used to resolve failure messages.
    pub fn locale(&self) -> &str {
        &self.options.locale
    }

    /// Change the locale. Applies to failures shown from now on.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.options.locale = locale.into();
    }

    /// Switch between per-field and aggregated error display.
    pub fn set_error_display(&mut self, display: ErrorDisplay) {
        self.options.error_display = display;
    }

    /// Number of validation notifications raised by controllers so far.
    pub fn validation_notifications(&self) -> usize {
        self.validation_notifications
    }

    /// Sections in the order they were added.
    pub fn sections(&self) -> &[FormSection] {
        &self.sections
    }

    // =========================================================================
    // Sections and lookup
    // =========================================================================

    /// Add a section and attach its controllers.
    ///
    /// Fails without adding anything if a name is used twice.
    pub fn add_section(&mut self, mut section: FormSection) -> FormResult<()> {
        let mut names = HashSet::new();
        for controller in section.elements() {
            let name = controller.name();
            if !names.insert(name) || self.find(name).is_some() {
                error!("Field '{}' registered twice", name);
                return Err(FormError::DuplicateField(name.to_string()));
            }
        }

        let mut cx = FieldContext::new(&self.store, &self.renderer, &self.presenter);
        for controller in section.elements_mut() {
            controller.attach(&mut cx);
        }
        let notifications = cx.notifications();

        debug!(
            "Added section {:?} with {} fields",
            section.title(),
            section.len()
        );
        self.sections.push(section);
        self.after_operation(notifications)
    }

    fn find(&self, name: &str) -> Option<&dyn FieldController> {
        self.sections.iter().find_map(|s| s.element(name))
    }

    fn controllers_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn FieldController>> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.elements_mut().iter_mut())
    }

    /// The controller named `name`.
    pub fn element(&self, name: &str) -> FormResult<&dyn FieldController> {
        self.find(name).ok_or_else(|| {
            error!("Field '{}' not found in form", name);
            FormError::unknown_field(name)
        })
    }

    /// The controller named `name`, mutably.
    pub fn element_mut(&mut self, name: &str) -> FormResult<&mut dyn FieldController> {
        match self.controllers_mut().find(|c| c.name() == name) {
            Some(controller) => Ok(controller.as_mut()),
            None => {
                error!("Field '{}' not found in form", name);
                Err(FormError::unknown_field(name))
            }
        }
    }

    /// The controller named `name` as its concrete type.
    pub fn element_as<T: FieldController + 'static>(&self, name: &str) -> FormResult<&T> {
        self.element(name)?
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| controller_type_error::<T>(name))
    }

    /// The controller named `name` as its concrete type, mutably.
    pub fn element_as_mut<T: FieldController + 'static>(
        &mut self,
        name: &str,
    ) -> FormResult<&mut T> {
        self.element_mut(name)?
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| controller_type_error::<T>(name))
    }

    // =========================================================================
    // Surfaces
    // =========================================================================

    /// Create every surface that does not exist yet, in section order.
    pub fn render(&mut self) -> FormResult<Vec<SurfaceId>> {
        let mut cx = FieldContext::new(&self.store, &self.renderer, &self.presenter);
        let ids: Vec<SurfaceId> = self
            .sections
            .iter_mut()
            .flat_map(|s| s.elements_mut().iter_mut())
            .map(|c| c.surface(&mut cx))
            .collect();
        let notifications = cx.notifications();
        self.after_operation(notifications)?;
        Ok(ids)
    }

    /// The root surface of field `name`, created on first access.
    pub fn surface(&mut self, name: &str) -> FormResult<SurfaceId> {
        let mut cx = FieldContext::new(&self.store, &self.renderer, &self.presenter);
        let Some(controller) = self
            .sections
            .iter_mut()
            .flat_map(|s| s.elements_mut().iter_mut())
            .find(|c| c.name() == name)
        else {
            error!("Field '{}' not found in form", name);
            return Err(FormError::unknown_field(name));
        };
        let id = controller.surface(&mut cx);
        let notifications = cx.notifications();
        self.after_operation(notifications)?;
        Ok(id)
    }

    /// Push the store into every created surface.
    pub fn refresh(&mut self) {
        let mut cx = FieldContext::new(&self.store, &self.renderer, &self.presenter);
        for controller in self
            .sections
            .iter_mut()
            .flat_map(|s| s.elements_mut().iter_mut())
            .filter(|c| c.core().is_created())
        {
            controller.refresh(&mut cx);
        }
    }

    /// Push the store into the surface of field `name`, if created.
    pub fn refresh_field(&mut self, name: &str) -> FormResult<()> {
        let mut cx = FieldContext::new(&self.store, &self.renderer, &self.presenter);
        let Some(controller) = self
            .sections
            .iter_mut()
            .flat_map(|s| s.elements_mut().iter_mut())
            .find(|c| c.name() == name)
        else {
            error!("Field '{}' not found in form", name);
            return Err(FormError::unknown_field(name));
        };
        if controller.core().is_created() {
            controller.refresh(&mut cx);
        }
        Ok(())
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Route a user event to the controller owning its surface.
    ///
    /// Validation notifications raised while handling the event are counted;
    /// with live validation on, the form is then validated once and the
    /// result shown.
    pub fn dispatch(&mut self, event: SurfaceEvent) -> FormResult<Option<FieldAction>> {
        let surface = event.surface();
        let mut cx = FieldContext::new(&self.store, &self.renderer, &self.presenter);
        let Some(controller) = self
            .sections
            .iter_mut()
            .flat_map(|s| s.elements_mut().iter_mut())
            .find(|c| c.owns_surface(surface))
        else {
            error!("No field owns surface {}", surface);
            return Err(FormError::UnknownSurface(surface));
        };

        trace!("Dispatching {:?} to '{}'", event, controller.name());
        let action = controller.handle_event(&event, &mut cx);
        let notifications = cx.notifications();
        self.after_operation(notifications)?;
        Ok(action)
    }

    fn after_operation(&mut self, notifications: usize) -> FormResult<()> {
        if notifications == 0 {
            return Ok(());
        }
        self.validation_notifications += notifications;
        if self.options.live_validation {
            self.validate_and_display()?;
        }
        Ok(())
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate every field of every section, in order.
    pub fn validate(&self) -> Vec<ValidationFailure> {
        self.sections
            .iter()
            .flat_map(|s| s.elements().iter())
            .flat_map(|c| c.validate_input(&self.store))
            .collect()
    }

    /// Clear previously shown failures.
    pub fn reset_errors(&mut self) {
        match self.options.error_display {
            ErrorDisplay::PerField => {
                for controller in self.controllers_mut() {
                    controller.set_error(None);
                }
            }
            ErrorDisplay::Aggregated => {}
        }
    }

    /// Present `failures` with the configured display.
    ///
    /// With the per-field display, a failure naming a field this form does
    /// not have is an error.
    pub fn show_errors(&mut self, failures: &[ValidationFailure]) -> FormResult<()> {
        debug!(
            "Showing {} validation failures ({:?})",
            failures.len(),
            self.options.error_display
        );
        match self.options.error_display {
            ErrorDisplay::PerField => {
                for failure in failures {
                    let message = failure.message(self.resolver.as_ref(), &self.options.locale);
                    self.element_mut(&failure.field_name)?
                        .set_error(Some(message));
                }
            }
            ErrorDisplay::Aggregated => {
                if failures.is_empty() {
                    return Ok(());
                }
                let body = failures
                    .iter()
                    .map(|f| f.message(self.resolver.as_ref(), &self.options.locale))
                    .collect::<Vec<_>>()
                    .join("\n");
                self.presenter
                    .show_aggregated_message(&self.options.validation_title, &body);
            }
        }
        Ok(())
    }

    /// Reset errors, validate the whole form and show the result.
    pub fn validate_and_display(&mut self) -> FormResult<Vec<ValidationFailure>> {
        self.reset_errors();
        let failures = self.validate();
        self.show_errors(&failures)?;
        Ok(failures)
    }
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("sections", &self.sections)
            .field("store", &self.store)
            .field("ids", &self.ids)
            .field("options", &self.options)
            .field("validation_notifications", &self.validation_notifications)
            .finish_non_exhaustive()
    }
}

fn controller_type_error<T>(name: &str) -> FormError {
    FormError::ControllerType {
        field: name.to_string(),
        expected: std::any::type_name::<T>(),
    }
}
