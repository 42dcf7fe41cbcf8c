//! Ordered groups of field controllers.

use crate::controller::FieldController;

/// An ordered group of controllers, optionally titled.
///
/// A controller belongs to exactly one section; adding it moves it in.
#[derive(Debug, Default)]
pub struct FormSection {
    title: Option<String>,
    elements: Vec<Box<dyn FieldController>>,
}

impl FormSection {
    /// Create an untitled section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a titled section.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            elements: Vec::new(),
        }
    }

    /// Append a controller.
    pub fn with(mut self, controller: impl FieldController + 'static) -> Self {
        self.push(Box::new(controller));
        self
    }

    /// Append a boxed controller.
    pub fn push(&mut self, controller: Box<dyn FieldController>) {
        self.elements.push(controller);
    }

    /// Title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Number of controllers.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the section has no controllers.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Controllers in order.
    pub fn elements(&self) -> &[Box<dyn FieldController>] {
        &self.elements
    }

    /// Controllers in order, mutably.
    pub(crate) fn elements_mut(&mut self) -> &mut [Box<dyn FieldController>] {
        &mut self.elements
    }

    /// First controller named `name`.
    pub fn element(&self, name: &str) -> Option<&dyn FieldController> {
        self.elements
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }
}
