//! Tests for text, display and image fields and form-level lookup.

use std::sync::Arc;

use formbind::FormError;
use formbind::controller::{
    ButtonController, FieldAction, FieldController, ImageGroupController, ItemValues,
    SeparatorController, StaticTextController, Suggestion, TextFieldController,
    ValueTextController,
};
use formbind::form::{FormController, FormOptions, FormSection};
use formbind::headless::{HeadlessPresenter, HeadlessRenderer, LoadedImage};
use formbind::model::{ImageRecord, Value};
use formbind::surface::{
    PHONE_MAX_LENGTH, SurfaceEvent, SurfaceIdAllocator, SurfaceKind, SurfaceRenderer,
};

fn headless_form(options: FormOptions) -> (FormController, HeadlessRenderer) {
    let renderer = HeadlessRenderer::new();
    let form = FormController::new(Arc::new(renderer.clone()), Arc::new(HeadlessPresenter::new()))
        .with_ids(SurfaceIdAllocator::new())
        .with_options(options);
    (form, renderer)
}

// =============================================================================
// Text entry
// =============================================================================

#[test]
fn test_edit_writes_store_and_notifies() {
    let (mut form, renderer) = headless_form(FormOptions::new());
    let name = TextFieldController::new(form.ids(), "name");
    form.add_section(FormSection::new().with(name)).unwrap();
    let id = form.surface("name").unwrap();

    let action = form.dispatch(renderer.type_text(id, "Asha")).unwrap();
    assert_eq!(action, None);
    assert_eq!(form.store().get("name"), Some(Value::from("Asha")));
    assert_eq!(form.validation_notifications(), 1);
}

#[test]
fn test_autocomplete_edit_does_not_notify() {
    let (mut form, renderer) = headless_form(FormOptions::new());
    let city = TextFieldController::new(form.ids(), "city").autocomplete(vec![
        Suggestion::new("Pune", "PNQ"),
        Suggestion::new("Mumbai", "BOM"),
    ]);
    form.add_section(FormSection::new().with(city)).unwrap();
    let id = form.surface("city").unwrap();

    let spec = renderer.state(id).unwrap().spec;
    assert_eq!(spec.kind, SurfaceKind::AutoComplete);
    assert_eq!(spec.options, vec!["Pune".to_string(), "Mumbai".to_string()]);

    form.dispatch(renderer.type_text(id, "Pu")).unwrap();
    assert_eq!(form.store().get_text("city").as_deref(), Some("Pu"));
    assert_eq!(form.validation_notifications(), 0);

    let city = form.element_as::<TextFieldController>("city").unwrap();
    let hits: Vec<&str> = city
        .suggestions_for("pu")
        .into_iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(hits, vec!["PNQ"]);
}

#[test]
fn test_phone_entry_is_capped() {
    let (mut form, renderer) = headless_form(FormOptions::new());
    let phone = TextFieldController::new(form.ids(), "phone").mobile(true);
    form.add_section(FormSection::new().with(phone)).unwrap();
    let id = form.surface("phone").unwrap();

    let spec = renderer.state(id).unwrap().spec;
    assert!(spec.input_type.is_phone());
    assert_eq!(spec.max_length, Some(PHONE_MAX_LENGTH));
}

#[test]
fn test_phone_entry_stores_at_most_ten_digits() {
    let (mut form, renderer) = headless_form(FormOptions::new().live_validation(false));
    let phone = TextFieldController::new(form.ids(), "phone").mobile(true);
    form.add_section(FormSection::new().with(phone)).unwrap();
    let id = form.surface("phone").unwrap();

    form.dispatch(renderer.type_text(id, "98765432101234")).unwrap();
    assert_eq!(form.store().get_text("phone").as_deref(), Some("9876543210"));

    // A renderer that lets extra text through is clamped by the field
    renderer.set_max_length(id, None);
    form.dispatch(renderer.type_text(id, "98765432101234")).unwrap();
    assert_eq!(form.store().get_text("phone").as_deref(), Some("9876543210"));
    assert_eq!(renderer.text(id), "9876543210");
}

#[test]
fn test_phone_cap_follows_live_mobile_toggle() {
    let (mut form, renderer) = headless_form(FormOptions::new().live_validation(false));
    let phone = TextFieldController::new(form.ids(), "phone");
    form.add_section(FormSection::new().with(phone)).unwrap();
    let id = form.surface("phone").unwrap();
    assert_eq!(renderer.max_length(id), None);

    form.element_as_mut::<TextFieldController>("phone")
        .unwrap()
        .set_mobile(true);
    assert!(renderer.input_type(id).unwrap().is_phone());
    assert_eq!(renderer.max_length(id), Some(PHONE_MAX_LENGTH));

    form.dispatch(renderer.type_text(id, "98765432101234")).unwrap();
    assert_eq!(form.store().get_text("phone").as_deref(), Some("9876543210"));

    form.element_as_mut::<TextFieldController>("phone")
        .unwrap()
        .set_mobile(false);
    assert_eq!(renderer.max_length(id), None);
    form.dispatch(renderer.type_text(id, "98765432101234")).unwrap();
    assert_eq!(form.store().get_text("phone").as_deref(), Some("98765432101234"));
}

#[test]
fn test_multi_line_reapplied_live() {
    let (mut form, renderer) = headless_form(FormOptions::new());
    let notes = TextFieldController::new(form.ids(), "notes");
    form.add_section(FormSection::new().with(notes)).unwrap();
    let id = form.surface("notes").unwrap();
    assert!(!renderer.input_type(id).unwrap().is_multi_line());

    let notes = form.element_as_mut::<TextFieldController>("notes").unwrap();
    notes.set_multi_line(true);
    notes.set_multi_line(true);
    assert!(notes.is_multi_line());
    assert!(renderer.input_type(id).unwrap().is_multi_line());
    assert_eq!(renderer.mutations(id), 1);

    let notes = form.element_as_mut::<TextFieldController>("notes").unwrap();
    notes.set_secure_entry(true);
    let applied = renderer.input_type(id).unwrap();
    assert!(applied.is_secure());
    assert!(applied.is_multi_line());
}

#[test]
fn test_label_falls_back_to_name() {
    let ids = SurfaceIdAllocator::new();
    let field = TextFieldController::new(&ids, "email");
    assert_eq!(FieldController::label(&field), "email");
    let field = field.label("Email");
    assert_eq!(FieldController::label(&field), "Email");
}

// =============================================================================
// Display-only fields
// =============================================================================

#[test]
fn test_display_fields() {
    let (mut form, renderer) = headless_form(FormOptions::new());
    form.store().set("total", "42");
    let ids = form.ids().clone();
    let section = FormSection::new()
        .with(StaticTextController::new(&ids, "intro").label("Fill in your details"))
        .with(ValueTextController::new(&ids, "total").label("Total"))
        .with(SeparatorController::new(&ids, "divider").submitted_value("section-2"));
    form.add_section(section).unwrap();
    let surfaces = form.render().unwrap();

    assert_eq!(renderer.text(surfaces[0]), "Fill in your details");
    assert_eq!(renderer.text(surfaces[1]), "42");
    assert_eq!(
        renderer.state(surfaces[2]).unwrap().spec.kind,
        SurfaceKind::Separator
    );
    assert_eq!(form.store().get_text("divider").as_deref(), Some("section-2"));
    assert!(form.validate().is_empty());
}

#[test]
fn test_button_only_acts_while_enabled() {
    let (mut form, renderer) = headless_form(FormOptions::new());
    let submit = ButtonController::new(form.ids(), "submit")
        .label("Submit")
        .enabled(false);
    form.add_section(FormSection::new().with(submit)).unwrap();
    let id = form.surface("submit").unwrap();

    assert_eq!(renderer.text(id), "Submit");
    assert!(!renderer.is_enabled(id));
    assert_eq!(form.dispatch(renderer.click(id)).unwrap(), None);

    form.element_as_mut::<ButtonController>("submit")
        .unwrap()
        .set_enabled(true);
    assert!(renderer.is_enabled(id));
    assert_eq!(
        form.dispatch(renderer.click(id)).unwrap(),
        Some(FieldAction::ButtonPressed {
            field: "submit".into()
        })
    );
}

// =============================================================================
// Image group
// =============================================================================

fn photo_items() -> Vec<ImageRecord> {
    vec![
        ImageRecord::new("Front", None::<String>).with_color("#f68c1e"),
        ImageRecord::new("Back", Some("back.png")),
    ]
}

#[test]
fn test_image_group_seeds_store_and_notifies_per_item() {
    let (mut form, renderer) = headless_form(FormOptions::new());
    let photos = ImageGroupController::new(form.ids(), "photos", photo_items(), ItemValues::Labels)
        .unwrap()
        .label("Photos")
        .required(true);
    form.add_section(FormSection::new().with(photos)).unwrap();

    assert_eq!(form.store().get("photos"), Some(Value::Images(photo_items())));
    assert_eq!(form.validation_notifications(), 2);
    assert_eq!(
        form.element("photos").unwrap().error(),
        Some("Front is required")
    );

    let grid = form.surface("photos").unwrap();
    assert_eq!(renderer.error(grid).as_deref(), Some("Front is required"));
}

#[test]
fn test_image_group_keeps_existing_records() {
    let (mut form, _) = headless_form(FormOptions::new());
    let existing = vec![ImageRecord::new("Front", Some("mine.png"))];
    form.store().set("photos", existing.clone());

    let photos =
        ImageGroupController::new(form.ids(), "photos", photo_items(), ItemValues::Labels).unwrap();
    form.add_section(FormSection::new().with(photos)).unwrap();

    assert_eq!(form.store().get("photos"), Some(Value::Images(existing)));
    assert_eq!(form.validation_notifications(), 0);
}

#[test]
fn test_image_group_keeps_prefilled_empty_list() {
    let (mut form, renderer) = headless_form(FormOptions::new());
    let prefill: Value = serde_json::from_str("[]").unwrap();
    form.store().set("photos", prefill.clone());

    let photos =
        ImageGroupController::new(form.ids(), "photos", photo_items(), ItemValues::Labels).unwrap();
    let tile = photos.tile_id(1).unwrap();
    form.add_section(FormSection::new().with(photos)).unwrap();
    form.render().unwrap();

    assert_eq!(form.store().get("photos"), Some(prefill));
    assert_eq!(form.validation_notifications(), 0);
    assert_eq!(renderer.image(tile), Some(LoadedImage::Ref("back.png".into())));
}

#[test]
fn test_image_tap_and_replace() {
    let (mut form, renderer) = headless_form(FormOptions::new().live_validation(false));
    let photos = ImageGroupController::new(
        form.ids(),
        "photos",
        photo_items(),
        ItemValues::Explicit(vec![Value::from("front-side"), Value::from("back-side")]),
    )
    .unwrap();
    form.add_section(FormSection::new().with(photos)).unwrap();
    form.render().unwrap();

    let group = form.element_as::<ImageGroupController>("photos").unwrap();
    let front = group.tile_id(0).unwrap();
    let back = group.tile_id(1).unwrap();

    let action = form.dispatch(renderer.click(front)).unwrap();
    assert_eq!(
        action,
        Some(FieldAction::ImageSelected {
            field: "photos".into(),
            index: 0,
            image: photo_items()[0].clone(),
            value: Value::from("front-side"),
        })
    );

    let mut images = photo_items();
    images[0].image_ref = Some("front.png".into());
    form.store().set("photos", images);
    let back_mutations = renderer.mutations(back);
    form.refresh_field("photos").unwrap();

    assert_eq!(renderer.image(front), Some(LoadedImage::Ref("front.png".into())));
    assert_eq!(renderer.mutations(back), back_mutations);
    assert!(form.validate().is_empty());
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn test_duplicate_field_rejected() {
    let (mut form, _) = headless_form(FormOptions::new());
    let ids = form.ids().clone();
    form.add_section(FormSection::new().with(TextFieldController::new(&ids, "name")))
        .unwrap();

    let err = form
        .add_section(FormSection::new().with(TextFieldController::new(&ids, "name")))
        .unwrap_err();
    assert_eq!(err, FormError::DuplicateField("name".into()));
    assert_eq!(form.sections().len(), 1);

    let err = form
        .add_section(
            FormSection::new()
                .with(TextFieldController::new(&ids, "a"))
                .with(TextFieldController::new(&ids, "a")),
        )
        .unwrap_err();
    assert_eq!(err, FormError::DuplicateField("a".into()));
}

#[test]
fn test_element_lookup_errors() {
    let (mut form, _) = headless_form(FormOptions::new());
    let name = TextFieldController::new(form.ids(), "name");
    form.add_section(FormSection::new().with(name)).unwrap();

    assert_eq!(
        form.element("missing").unwrap_err(),
        FormError::UnknownField("missing".into())
    );
    assert!(matches!(
        form.element_as::<ButtonController>("name"),
        Err(FormError::ControllerType { .. })
    ));
    assert!(form.element_as::<TextFieldController>("name").is_ok());
}

#[test]
fn test_event_for_unknown_surface() {
    let (mut form, _) = headless_form(FormOptions::new());
    let stray = form.generate_surface_id();
    let err = form.dispatch(SurfaceEvent::Clicked(stray)).unwrap_err();
    assert_eq!(err, FormError::UnknownSurface(stray));
}
