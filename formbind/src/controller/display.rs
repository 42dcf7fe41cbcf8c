//! Display-only fields: static text, value text, separator and button.
//!
//! None of these take part in validation unless a rule is added to their
//! core explicitly.

use std::any::Any;

use super::{FieldAction, FieldContext, FieldController, FieldCore, display_text, sync_text};
use crate::surface::{InputType, SurfaceEvent, SurfaceIdAllocator, SurfaceKind, SurfaceSpec};

macro_rules! impl_core_access {
    () => {
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
    };
}

/// Fixed text showing the field's own label.
#[derive(Debug)]
pub struct StaticTextController {
    core: FieldCore,
}

impl StaticTextController {
    /// Create a static text field.
    pub fn new(ids: &SurfaceIdAllocator, name: impl Into<String>) -> Self {
        Self {
            core: FieldCore::new(name, ids.generate()),
        }
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.core.set_label(label);
        self
    }
}

impl FieldController for StaticTextController {
    impl_core_access!();

    fn create_surface(&mut self, cx: &mut FieldContext<'_>) {
        let spec = SurfaceSpec::new(self.core.surface_id(), SurfaceKind::TextLabel)
            .caption(self.core.label())
            .read_only();
        cx.renderer().create_surface(&spec);
    }

    fn refresh(&mut self, cx: &mut FieldContext<'_>) {
        sync_text(cx.renderer(), self.core.surface_id(), self.core.label());
    }
}

/// Read-only text showing the field's store value.
#[derive(Debug)]
pub struct ValueTextController {
    core: FieldCore,
    submitted: Option<String>,
    input_type: InputType,
}

impl ValueTextController {
    /// Create a value text field.
    pub fn new(ids: &SurfaceIdAllocator, name: impl Into<String>) -> Self {
        Self {
            core: FieldCore::new(name, ids.generate()),
            submitted: None,
            input_type: InputType::default(),
        }
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.core.set_label(label);
        self
    }

    /// Set the value written to the store when the surface is created.
    pub fn submitted_value(mut self, value: impl Into<String>) -> Self {
        self.submitted = Some(value.into());
        self
    }

    /// Start as multi-line text.
    pub fn multi_line(mut self, multi_line: bool) -> Self {
        self.set_multi_line(multi_line);
        self
    }

    /// Returns `true` if the text wraps over several lines.
    pub fn is_multi_line(&self) -> bool {
        self.input_type.is_multi_line()
    }

    /// Set or clear the multi-line flag, re-applying it to a live surface.
    pub fn set_multi_line(&mut self, multi_line: bool) {
        let input_type = self
            .input_type
            .with_flag(InputType::FLAG_MULTI_LINE, multi_line);
        if input_type == self.input_type {
            return;
        }
        self.input_type = input_type;
        if let Some(renderer) = self.core.renderer() {
            renderer.set_input_type(self.core.surface_id(), input_type);
        }
    }
}

impl FieldController for ValueTextController {
    impl_core_access!();

    fn create_surface(&mut self, cx: &mut FieldContext<'_>) {
        if let Some(value) = &self.submitted {
            cx.store().set(self.core.name(), value.as_str());
        }
        let spec = SurfaceSpec::new(self.core.surface_id(), SurfaceKind::TextLabel)
            .caption(self.core.label())
            .input_type(self.input_type)
            .read_only();
        cx.renderer().create_surface(&spec);
    }

    fn refresh(&mut self, cx: &mut FieldContext<'_>) {
        let text = display_text(cx.store(), self.core.name());
        sync_text(cx.renderer(), self.core.surface_id(), &text);
    }
}

/// A horizontal rule.
///
/// Draws nothing from the store but still records its submitted value, so a
/// separator can carry hidden data through the form.
#[derive(Debug)]
pub struct SeparatorController {
    core: FieldCore,
    submitted: Option<String>,
}

impl SeparatorController {
    /// Create a separator.
    pub fn new(ids: &SurfaceIdAllocator, name: impl Into<String>) -> Self {
        Self {
            core: FieldCore::new(name, ids.generate()),
            submitted: None,
        }
    }

    /// Set the value written to the store when the surface is created.
    pub fn submitted_value(mut self, value: impl Into<String>) -> Self {
        self.submitted = Some(value.into());
        self
    }
}

impl FieldController for SeparatorController {
    impl_core_access!();

    fn create_surface(&mut self, cx: &mut FieldContext<'_>) {
        if let Some(value) = &self.submitted {
            cx.store().set(self.core.name(), value.as_str());
        }
        cx.renderer().create_surface(&SurfaceSpec::new(
            self.core.surface_id(),
            SurfaceKind::Separator,
        ));
    }

    fn refresh(&mut self, _cx: &mut FieldContext<'_>) {}
}

/// A button showing the field's store value, or its label when empty.
///
/// Clicks only produce [`FieldAction::ButtonPressed`] while enabled.
#[derive(Debug)]
pub struct ButtonController {
    core: FieldCore,
    submitted: Option<String>,
    enabled: bool,
}

impl ButtonController {
    /// Create an enabled button.
    pub fn new(ids: &SurfaceIdAllocator, name: impl Into<String>) -> Self {
        Self {
            core: FieldCore::new(name, ids.generate()),
            submitted: None,
            enabled: true,
        }
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.core.set_label(label);
        self
    }

    /// Set the value written to the store when the surface is created.
    pub fn submitted_value(mut self, value: impl Into<String>) -> Self {
        self.submitted = Some(value.into());
        self
    }

    /// Start enabled or disabled.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns `true` if clicks produce an action.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the button, updating a live surface.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if let Some(renderer) = self.core.renderer() {
            renderer.set_enabled(self.core.surface_id(), enabled);
        }
    }
}

impl FieldController for ButtonController {
    impl_core_access!();

    fn create_surface(&mut self, cx: &mut FieldContext<'_>) {
        if let Some(value) = &self.submitted {
            cx.store().set(self.core.name(), value.as_str());
        }
        let id = self.core.surface_id();
        cx.renderer().create_surface(
            &SurfaceSpec::new(id, SurfaceKind::Button).caption(self.core.label()),
        );
        if !self.enabled {
            cx.renderer().set_enabled(id, false);
        }
    }

    fn refresh(&mut self, cx: &mut FieldContext<'_>) {
        let text = display_text(cx.store(), self.core.name());
        let text = if text.is_empty() {
            self.core.label()
        } else {
            text.as_str()
        };
        sync_text(cx.renderer(), self.core.surface_id(), text);
    }

    fn handle_event(
        &mut self,
        event: &SurfaceEvent,
        _cx: &mut FieldContext<'_>,
    ) -> Option<FieldAction> {
        match event {
            SurfaceEvent::Clicked(_) if self.enabled => Some(FieldAction::ButtonPressed {
                field: self.core.name().to_string(),
            }),
            _ => None,
        }
    }
}
