//! Image group field.

use std::any::Any;

use log::debug;

use super::{
    FieldAction, FieldContext, FieldController, FieldCore, ItemValues, resolve_item_value,
    sync_text,
};
use crate::error::FormResult;
use crate::model::{ImageRecord, Value};
use crate::surface::{
    ImageSource, SurfaceEvent, SurfaceId, SurfaceIdAllocator, SurfaceKind, SurfaceSpec,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum TileImage {
    Placeholder,
    Ref(String),
}

impl From<ImageSource<'_>> for TileImage {
    fn from(source: ImageSource<'_>) -> Self {
        match source {
            ImageSource::Ref(r) => TileImage::Ref(r.to_string()),
            ImageSource::Placeholder => TileImage::Placeholder,
        }
    }
}

/// A grid of image tiles bound to a list of [`ImageRecord`]s.
///
/// When it joins a form, the group seeds the store with its records one at a
/// time, raising a validation notification for each, unless the store
/// already holds records (or an empty list) for the field. Tapping a tile yields
/// [`FieldAction::ImageSelected`]; the application picks an image, writes the
/// updated records to the store and refreshes the field.
#[derive(Debug)]
pub struct ImageGroupController {
    core: FieldCore,
    items: Vec<ImageRecord>,
    values: ItemValues,
    base: SurfaceId,
    shown: Vec<Option<TileImage>>,
}

impl ImageGroupController {
    /// Create a group over `items`.
    ///
    /// Fails when `values` is an explicit list whose length differs from the
    /// number of items.
    pub fn new(
        ids: &SurfaceIdAllocator,
        name: impl Into<String>,
        items: Vec<ImageRecord>,
        values: ItemValues,
    ) -> FormResult<Self> {
        let name = name.into();
        values.check_len(&name, items.len())?;

        let core = FieldCore::new(name, ids.generate());
        let base = ids.reserve(items.len());
        let shown = vec![None; items.len()];
        Ok(Self {
            core,
            items,
            values,
            base,
            shown,
        })
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.core.set_label(label);
        self
    }

    /// Require every record to carry an image.
    pub fn required(mut self, required: bool) -> Self {
        self.core.set_required(required);
        self
    }

    /// Records the group was declared with.
    pub fn items(&self) -> &[ImageRecord] {
        &self.items
    }

    /// Surface of tile `index`.
    pub fn tile_id(&self, index: usize) -> Option<SurfaceId> {
        (index < self.items.len()).then(|| self.base.offset(index))
    }

    fn tile_index(&self, id: SurfaceId) -> Option<usize> {
        let offset = id.value().checked_sub(self.base.value())?;
        let index = usize::try_from(offset).ok()?;
        (index < self.items.len()).then_some(index)
    }

    /// Records as currently stored, or the declared ones when the store has
    /// none.
    fn current(&self, cx: &FieldContext<'_>) -> Vec<ImageRecord> {
        match cx.store().get(self.core.name()) {
            Some(Value::Images(images)) => images,
            _ => self.items.clone(),
        }
    }
}

impl FieldController for ImageGroupController {
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

    fn attach(&mut self, cx: &mut FieldContext<'_>) {
        // A prefilled `[]` deserializes as an empty set and counts as records.
        match cx.store().get(self.core.name()) {
            Some(Value::Images(_)) => return,
            Some(Value::Set(set)) if set.is_empty() => return,
            _ => {}
        }
        let mut seeded = Vec::with_capacity(self.items.len());
        for item in &self.items {
            seeded.push(item.clone());
            cx.store().set(self.core.name(), seeded.clone());
            cx.notify_validation();
        }
        debug!(
            "Seeded '{}' with {} image records",
            self.core.name(),
            seeded.len()
        );
    }

    fn create_surface(&mut self, cx: &mut FieldContext<'_>) {
        let grid = self.core.surface_id();
        cx.renderer().create_surface(
            &SurfaceSpec::new(grid, SurfaceKind::ImageGrid).caption(self.core.label()),
        );
        for (index, item) in self.items.iter().enumerate() {
            let spec = SurfaceSpec::new(self.base.offset(index), SurfaceKind::ImageTile)
                .parent(grid)
                .caption(item.text.as_str());
            cx.renderer().create_surface(&spec);
        }
    }

    fn refresh(&mut self, cx: &mut FieldContext<'_>) {
        let images = self.current(cx);
        for index in 0..self.items.len() {
            let record = images.get(index).unwrap_or(&self.items[index]);
            let tile = self.base.offset(index);
            sync_text(cx.renderer(), tile, &record.text);

            let source = ImageSource::for_record(record);
            let wanted = TileImage::from(source);
            if self.shown[index].as_ref() != Some(&wanted) {
                cx.renderer().load_image(tile, source);
                self.shown[index] = Some(wanted);
            }
        }
    }

    fn owns_surface(&self, id: SurfaceId) -> bool {
        id == self.core.surface_id() || self.tile_index(id).is_some()
    }

    fn handle_event(
        &mut self,
        event: &SurfaceEvent,
        cx: &mut FieldContext<'_>,
    ) -> Option<FieldAction> {
        let SurfaceEvent::Clicked(id) = event else {
            return None;
        };
        let index = self.tile_index(*id)?;
        let image = self
            .current(cx)
            .get(index)
            .cloned()
            .unwrap_or_else(|| self.items[index].clone());
        let value = resolve_item_value(&self.values, &self.items[index].text, index);
        Some(FieldAction::ImageSelected {
            field: self.core.name().to_string(),
            index,
            image,
            value,
        })
    }
}
