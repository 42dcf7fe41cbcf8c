//! In-memory renderer and presenter.
//!
//! [`HeadlessRenderer`] keeps every surface as plain state and counts how
//! often the engine creates and mutates each one, which makes it the
//! renderer of choice for tests and scripted runs. Methods on it that mimic
//! the user (typing, toggling) change state without counting as mutations
//! and return the [`SurfaceEvent`] a real renderer would report.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, RwLock};

use log::warn;

use crate::presenter::{ChooserRequest, ModalPresenter};
use crate::surface::{ImageSource, InputType, SurfaceEvent, SurfaceId, SurfaceRenderer, SurfaceSpec};

/// Image loaded into a headless surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedImage {
    Ref(String),
    Placeholder,
}

/// State of one headless surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceState {
    pub spec: SurfaceSpec,
    pub text: String,
    pub checked: bool,
    pub enabled: bool,
    pub input_type: InputType,
    pub max_length: Option<usize>,
    pub error: Option<String>,
    pub image: Option<LoadedImage>,
    /// Calls the engine made to change this surface after creating it.
    pub mutations: usize,
    /// Times the engine asked for this surface to be created.
    pub creations: usize,
}

impl SurfaceState {
    fn new(spec: &SurfaceSpec) -> Self {
        Self {
            spec: spec.clone(),
            text: String::new(),
            checked: false,
            enabled: true,
            input_type: spec.input_type,
            max_length: spec.max_length,
            error: None,
            image: None,
            mutations: 0,
            creations: 1,
        }
    }
}

#[derive(Debug, Default)]
struct RendererInner {
    surfaces: HashMap<SurfaceId, SurfaceState>,
    order: Vec<SurfaceId>,
}

/// A renderer that draws nothing.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    inner: Arc<RwLock<RendererInner>>,
}

impl HeadlessRenderer {
    /// Create a renderer with no surfaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the state of surface `id`.
    pub fn state(&self, id: SurfaceId) -> Option<SurfaceState> {
        self.inner
            .read()
            .ok()
            .and_then(|inner| inner.surfaces.get(&id).cloned())
    }

    /// Surfaces in creation order.
    pub fn surfaces(&self) -> Vec<SurfaceId> {
        self.inner
            .read()
            .map(|inner| inner.order.clone())
            .unwrap_or_default()
    }

    /// Members of container `parent`, in creation order.
    pub fn children(&self, parent: SurfaceId) -> Vec<SurfaceId> {
        self.inner
            .read()
            .map(|inner| {
                inner
                    .order
                    .iter()
                    .filter(|id| {
                        inner
                            .surfaces
                            .get(*id)
                            .is_some_and(|s| s.spec.parent == Some(parent))
                    })
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Times surface `id` was created (0 if never).
    pub fn creations(&self, id: SurfaceId) -> usize {
        self.state(id).map(|s| s.creations).unwrap_or(0)
    }

    /// Total create calls across all surfaces.
    pub fn total_creations(&self) -> usize {
        self.inner
            .read()
            .map(|inner| inner.surfaces.values().map(|s| s.creations).sum())
            .unwrap_or(0)
    }

    /// Engine mutations of surface `id`.
    pub fn mutations(&self, id: SurfaceId) -> usize {
        self.state(id).map(|s| s.mutations).unwrap_or(0)
    }

    /// Engine mutations across all surfaces.
    pub fn total_mutations(&self) -> usize {
        self.inner
            .read()
            .map(|inner| inner.surfaces.values().map(|s| s.mutations).sum())
            .unwrap_or(0)
    }

    /// Message shown by the error indicator of `id`.
    pub fn error(&self, id: SurfaceId) -> Option<String> {
        self.state(id).and_then(|s| s.error)
    }

    /// Returns `true` if `id` exists and is enabled.
    pub fn is_enabled(&self, id: SurfaceId) -> bool {
        self.state(id).is_some_and(|s| s.enabled)
    }

    /// Image last loaded into `id`.
    pub fn image(&self, id: SurfaceId) -> Option<LoadedImage> {
        self.state(id).and_then(|s| s.image)
    }

    /// Input type mask currently applied to `id`.
    pub fn input_type(&self, id: SurfaceId) -> Option<InputType> {
        self.state(id).map(|s| s.input_type)
    }

    /// Length limit currently applied to `id`.
    pub fn max_length(&self, id: SurfaceId) -> Option<usize> {
        self.state(id).and_then(|s| s.max_length)
    }

    // -------------------------------------------------------------------------
    // User simulation
    // -------------------------------------------------------------------------

    /// The user replaces the text of `id`.
    ///
    /// Text beyond the surface's length limit is cut off, as a native text
    /// box would refuse it.
    pub fn type_text(&self, id: SurfaceId, text: &str) -> SurfaceEvent {
        self.with_surface(id, |s| {
            s.text = match s.max_length {
                Some(max) => text.chars().take(max).collect(),
                None => text.to_string(),
            }
        });
        SurfaceEvent::Edited(id)
    }

    /// The user checks or unchecks `id`.
    pub fn toggle(&self, id: SurfaceId, checked: bool) -> SurfaceEvent {
        self.with_surface(id, |s| s.checked = checked);
        SurfaceEvent::Toggled(id)
    }

    /// The user taps `id`.
    pub fn click(&self, id: SurfaceId) -> SurfaceEvent {
        SurfaceEvent::Clicked(id)
    }

    /// `id` gains focus.
    pub fn focus(&self, id: SurfaceId) -> SurfaceEvent {
        SurfaceEvent::Focused(id)
    }

    fn with_surface(&self, id: SurfaceId, f: impl FnOnce(&mut SurfaceState)) {
        if let Ok(mut inner) = self.inner.write() {
            match inner.surfaces.get_mut(&id) {
                Some(state) => f(state),
                None => warn!("Headless surface {} does not exist", id),
            }
        }
    }

    fn mutate(&self, id: SurfaceId, f: impl FnOnce(&mut SurfaceState)) {
        self.with_surface(id, |state| {
            f(state);
            state.mutations += 1;
        });
    }
}

impl SurfaceRenderer for HeadlessRenderer {
    fn create_surface(&self, spec: &SurfaceSpec) {
        if let Ok(mut guard) = self.inner.write() {
            let inner = &mut *guard;
            match inner.surfaces.entry(spec.id) {
                Entry::Occupied(mut entry) => entry.get_mut().creations += 1,
                Entry::Vacant(entry) => {
                    entry.insert(SurfaceState::new(spec));
                    inner.order.push(spec.id);
                }
            }
        }
    }

    fn set_text(&self, id: SurfaceId, text: &str) {
        self.mutate(id, |s| s.text = text.to_string());
    }

    fn text(&self, id: SurfaceId) -> String {
        self.state(id).map(|s| s.text).unwrap_or_default()
    }

    fn set_checked(&self, id: SurfaceId, checked: bool) {
        self.mutate(id, |s| s.checked = checked);
    }

    fn is_checked(&self, id: SurfaceId) -> bool {
        self.state(id).is_some_and(|s| s.checked)
    }

    fn set_enabled(&self, id: SurfaceId, enabled: bool) {
        self.mutate(id, |s| s.enabled = enabled);
    }

    fn set_input_type(&self, id: SurfaceId, input_type: InputType) {
        self.mutate(id, |s| s.input_type = input_type);
    }

    fn set_max_length(&self, id: SurfaceId, max_length: Option<usize>) {
        self.mutate(id, |s| s.max_length = max_length);
    }

    fn set_error(&self, id: SurfaceId, message: Option<&str>) {
        self.mutate(id, |s| s.error = message.map(str::to_string));
    }

    fn load_image(&self, id: SurfaceId, source: ImageSource<'_>) {
        let image = match source {
            ImageSource::Ref(r) => LoadedImage::Ref(r.to_string()),
            ImageSource::Placeholder => LoadedImage::Placeholder,
        };
        self.mutate(id, |s| s.image = Some(image));
    }
}

#[derive(Debug, Default)]
struct PresenterInner {
    choosers: Vec<ChooserRequest>,
    messages: Vec<(String, String)>,
}

/// A presenter that records what it was asked to show.
#[derive(Debug, Clone, Default)]
pub struct HeadlessPresenter {
    inner: Arc<RwLock<PresenterInner>>,
}

impl HeadlessPresenter {
    /// Create a presenter that has shown nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every chooser request, oldest first.
    pub fn chooser_requests(&self) -> Vec<ChooserRequest> {
        self.inner
            .read()
            .map(|inner| inner.choosers.clone())
            .unwrap_or_default()
    }

    /// Every aggregated message as `(title, body)`, oldest first.
    pub fn messages(&self) -> Vec<(String, String)> {
        self.inner
            .read()
            .map(|inner| inner.messages.clone())
            .unwrap_or_default()
    }

    /// The most recent aggregated message.
    pub fn last_message(&self) -> Option<(String, String)> {
        self.messages().pop()
    }
}

impl ModalPresenter for HeadlessPresenter {
    fn show_chooser(&self, request: ChooserRequest) {
        if let Ok(mut inner) = self.inner.write() {
            inner.choosers.push(request);
        }
    }

    fn show_aggregated_message(&self, title: &str, body: &str) {
        if let Ok(mut inner) = self.inner.write() {
            inner.messages.push((title.to_string(), body.to_string()));
        }
    }
}
