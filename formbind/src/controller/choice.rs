//! Checkbox and radio groups.

use std::any::Any;
use std::collections::BTreeSet;

use log::trace;

use super::{FieldAction, FieldContext, FieldController, FieldCore, resolve_item_value};
use crate::error::{FormError, FormResult};
use crate::model::Value;
use crate::surface::{SurfaceEvent, SurfaceId, SurfaceIdAllocator, SurfaceKind, SurfaceSpec};

/// Selection behavior of a choice group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceKind {
    /// Any number of items can be selected.
    Checkbox,
    /// At most one item is selected; checking an item replaces the selection.
    Radio,
}

/// What a selected item stands for in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValues {
    /// The item's label text.
    Labels,
    /// The item's 0-based position.
    Indices,
    /// One explicit value per item, in item order.
    Explicit(Vec<Value>),
}

impl ItemValues {
    /// Check an explicit list against the number of items.
    pub(crate) fn check_len(&self, field: &str, items: usize) -> FormResult<()> {
        match self {
            ItemValues::Explicit(values) if values.len() != items => Err(
                FormError::value_count_mismatch(field, items, values.len()),
            ),
            _ => Ok(()),
        }
    }
}

/// A group of checkboxes or radio buttons bound to a set value.
///
/// The store holds the set of the selected items' values. Member `n` of the
/// group is rendered on surface `base + n`, where `base` is a block reserved
/// from the allocator at construction; the group container has its own id.
#[derive(Debug)]
pub struct ChoiceGroupController {
    core: FieldCore,
    kind: ChoiceKind,
    items: Vec<String>,
    values: ItemValues,
    submitted: Vec<String>,
    base: SurfaceId,
    prefill_complete: bool,
}

impl ChoiceGroupController {
    /// Create a group over `items`.
    ///
    /// Fails when `values` is an explicit list whose length differs from the
    /// number of items.
    pub fn new<I, S>(
        ids: &SurfaceIdAllocator,
        name: impl Into<String>,
        kind: ChoiceKind,
        items: I,
        values: ItemValues,
    ) -> FormResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        values.check_len(&name, items.len())?;

        let core = FieldCore::new(name, ids.generate());
        let base = ids.reserve(items.len());
        Ok(Self {
            core,
            kind,
            items,
            values,
            submitted: Vec::new(),
            base,
            prefill_complete: false,
        })
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.core.set_label(label);
        self
    }

    /// Make a selection required.
    pub fn required(mut self, required: bool) -> Self {
        self.core.set_required(required);
        self
    }

    /// Labels of the items to select when the surface is created.
    ///
    /// Matching ignores case and surrounding whitespace.
    pub fn submitted_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.submitted = items.into_iter().map(Into::into).collect();
        self
    }

    /// Selection behavior.
    pub fn kind(&self) -> ChoiceKind {
        self.kind
    }

    /// Item labels.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Surface of member `index`.
    pub fn member_id(&self, index: usize) -> Option<SurfaceId> {
        (index < self.items.len()).then(|| self.base.offset(index))
    }

    /// Value stored for item `index`.
    pub fn item_value(&self, index: usize) -> Option<Value> {
        self.items
            .get(index)
            .map(|label| resolve_item_value(&self.values, label, index))
    }

    /// Returns `true` once the initial selection has been applied.
    pub fn is_prefill_complete(&self) -> bool {
        self.prefill_complete
    }

    fn member_index(&self, id: SurfaceId) -> Option<usize> {
        let offset = id.value().checked_sub(self.base.value())?;
        let index = usize::try_from(offset).ok()?;
        (index < self.items.len()).then_some(index)
    }

    fn selection(&self, cx: &FieldContext<'_>) -> BTreeSet<Value> {
        cx.store()
            .get(self.core.name())
            .and_then(|v| v.as_set().cloned())
            .unwrap_or_default()
    }

    fn matches_submitted(&self, label: &str) -> bool {
        let label = label.trim().to_lowercase();
        self.submitted
            .iter()
            .any(|s| s.trim().to_lowercase() == label)
    }

    fn apply_prefill(&mut self, cx: &mut FieldContext<'_>) {
        if self.submitted.is_empty() {
            return;
        }
        let mut selection = self.selection(cx);
        for (index, label) in self.items.iter().enumerate() {
            if !self.matches_submitted(label) {
                continue;
            }
            let value = resolve_item_value(&self.values, label, index);
            if self.kind == ChoiceKind::Radio {
                selection.clear();
                selection.insert(value);
                break;
            }
            selection.insert(value);
        }
        cx.store().set(self.core.name(), selection);
    }
}

impl FieldController for ChoiceGroupController {
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
        let (group_kind, member_kind) = match self.kind {
            ChoiceKind::Checkbox => (SurfaceKind::CheckboxGroup, SurfaceKind::Checkbox),
            ChoiceKind::Radio => (SurfaceKind::RadioGroup, SurfaceKind::Radio),
        };
        let group = self.core.surface_id();
        cx.renderer()
            .create_surface(&SurfaceSpec::new(group, group_kind).caption(self.core.label()));

        for (index, label) in self.items.iter().enumerate() {
            let spec = SurfaceSpec::new(self.base.offset(index), member_kind)
                .parent(group)
                .caption(label.as_str());
            cx.renderer().create_surface(&spec);
        }

        // The initial selection never raises a notification
        self.apply_prefill(cx);
        self.prefill_complete = true;
    }

    fn refresh(&mut self, cx: &mut FieldContext<'_>) {
        let selection = self.selection(cx);
        for (index, label) in self.items.iter().enumerate() {
            let id = self.base.offset(index);
            let checked = selection.contains(&resolve_item_value(&self.values, label, index));
            if cx.renderer().is_checked(id) != checked {
                cx.renderer().set_checked(id, checked);
            }
        }
    }

    fn owns_surface(&self, id: SurfaceId) -> bool {
        id == self.core.surface_id() || self.member_index(id).is_some()
    }

    fn handle_event(
        &mut self,
        event: &SurfaceEvent,
        cx: &mut FieldContext<'_>,
    ) -> Option<FieldAction> {
        let SurfaceEvent::Toggled(id) = event else {
            return None;
        };
        let index = self.member_index(*id)?;
        let value = resolve_item_value(&self.values, &self.items[index], index);
        let checked = cx.renderer().is_checked(*id);

        let mut selection = self.selection(cx);
        match (self.kind, checked) {
            (ChoiceKind::Radio, true) => {
                selection.clear();
                selection.insert(value);
            }
            (_, true) => {
                selection.insert(value);
            }
            (_, false) => {
                selection.remove(&value);
            }
        }
        trace!(
            "'{}' item {} toggled to {}",
            self.core.name(),
            index,
            checked
        );
        cx.store().set(self.core.name(), selection);

        if self.prefill_complete {
            cx.notify_validation();
        }
        // Radio members other than the toggled one may need unchecking
        self.refresh(cx);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_length_checked() {
        let ids = SurfaceIdAllocator::new();
        let result = ChoiceGroupController::new(
            &ids,
            "size",
            ChoiceKind::Radio,
            ["S", "M", "L"],
            ItemValues::Explicit(vec![Value::from("small"), Value::from("medium")]),
        );
        assert_eq!(
            result.unwrap_err(),
            FormError::ValueCountMismatch {
                field: "size".into(),
                items: 3,
                values: 2,
            }
        );
    }

    #[test]
    fn test_item_values() {
        let ids = SurfaceIdAllocator::new();
        let by_label =
            ChoiceGroupController::new(&ids, "c", ChoiceKind::Checkbox, ["Red"], ItemValues::Labels)
                .unwrap();
        assert_eq!(by_label.item_value(0), Some(Value::from("Red")));

        let by_index = ChoiceGroupController::new(
            &ids,
            "c",
            ChoiceKind::Checkbox,
            ["Red", "Green"],
            ItemValues::Indices,
        )
        .unwrap();
        assert_eq!(by_index.item_value(1), Some(Value::Int(1)));
        assert_eq!(by_index.item_value(2), None);
    }

    #[test]
    fn test_member_ids_are_contiguous() {
        let ids = SurfaceIdAllocator::new();
        let group = ChoiceGroupController::new(
            &ids,
            "c",
            ChoiceKind::Checkbox,
            ["a", "b", "c"],
            ItemValues::Labels,
        )
        .unwrap();
        let base = group.member_id(0).unwrap();
        assert_eq!(group.member_id(2), Some(base.offset(2)));
        assert_eq!(group.member_id(3), None);
        assert!(group.owns_surface(base.offset(1)));
        assert!(!group.owns_surface(base.offset(3)));
        assert!(group.owns_surface(group.core().surface_id()));
    }
}
