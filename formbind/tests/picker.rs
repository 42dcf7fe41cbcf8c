//! Tests for date and time pickers.

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveTime};
use formbind::controller::{DateTimePickerController, FieldController};
use formbind::form::{FormController, FormSection};
use formbind::headless::{HeadlessPresenter, HeadlessRenderer};
use formbind::model::Value;
use formbind::presenter::ChooserKind;
use formbind::surface::{InputType, SurfaceEvent, SurfaceId, SurfaceIdAllocator, SurfaceRenderer};

fn headless_form() -> (FormController, HeadlessRenderer, HeadlessPresenter) {
    let renderer = HeadlessRenderer::new();
    let presenter = HeadlessPresenter::new();
    let form = FormController::new(Arc::new(renderer.clone()), Arc::new(presenter.clone()))
        .with_ids(SurfaceIdAllocator::new());
    (form, renderer, presenter)
}

fn add_picker(form: &mut FormController, picker: DateTimePickerController) -> SurfaceId {
    let name = picker.name().to_string();
    form.add_section(FormSection::new().with(picker)).unwrap();
    form.surface(&name).unwrap()
}

fn is_open(form: &FormController, name: &str) -> bool {
    form.element_as::<DateTimePickerController>(name)
        .unwrap()
        .is_chooser_open()
}

#[test]
fn test_surface_is_read_only() {
    let (mut form, renderer, _) = headless_form();
    let picker = DateTimePickerController::date(form.ids(), "dob").placeholder("Pick a date");
    let id = add_picker(&mut form, picker);

    let spec = renderer.state(id).unwrap().spec;
    assert!(spec.read_only);
    assert_eq!(spec.input_type, InputType::CLASS_DATETIME);
    assert_eq!(spec.placeholder.as_deref(), Some("Pick a date"));
}

#[test]
fn test_focus_opens_single_chooser_seeded_from_store() {
    let (mut form, renderer, presenter) = headless_form();
    let picker = DateTimePickerController::date(form.ids(), "dob").submitted_value("25-12-2023");
    let id = add_picker(&mut form, picker);
    assert_eq!(renderer.text(id), "25-12-2023");

    form.dispatch(renderer.focus(id)).unwrap();
    form.dispatch(renderer.click(id)).unwrap();

    let requests = presenter.chooser_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].surface, id);
    assert_eq!(requests[0].kind, ChooserKind::Date);
    assert_eq!(
        requests[0].initial.date(),
        NaiveDate::from_ymd_opt(2023, 12, 25).unwrap()
    );
    assert!(is_open(&form, "dob"));
}

#[test]
fn test_confirm_writes_store_and_surface() {
    let (mut form, renderer, _) = headless_form();
    let picker = DateTimePickerController::date(form.ids(), "dob");
    let id = add_picker(&mut form, picker);

    form.dispatch(renderer.click(id)).unwrap();
    let value = NaiveDate::from_ymd_opt(2024, 1, 5)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    form.dispatch(SurfaceEvent::ChooserConfirmed { surface: id, value })
        .unwrap();

    assert_eq!(form.store().get("dob"), Some(Value::from("05-01-2024")));
    assert_eq!(renderer.text(id), "05-01-2024");
    assert_eq!(form.validation_notifications(), 1);
    assert!(!is_open(&form, "dob"));
}

#[test]
fn test_dismiss_leaves_store_and_allows_reopen() {
    let (mut form, renderer, presenter) = headless_form();
    let picker = DateTimePickerController::date(form.ids(), "dob").submitted_value("01-02-2020");
    let id = add_picker(&mut form, picker);

    form.dispatch(renderer.focus(id)).unwrap();
    form.dispatch(SurfaceEvent::ChooserDismissed(id)).unwrap();

    assert_eq!(form.store().get("dob"), Some(Value::from("01-02-2020")));
    assert_eq!(form.validation_notifications(), 0);
    assert!(!is_open(&form, "dob"));

    form.dispatch(renderer.focus(id)).unwrap();
    assert_eq!(presenter.chooser_requests().len(), 2);
}

#[test]
fn test_empty_field_seeds_from_now() {
    let (mut form, renderer, presenter) = headless_form();
    let picker = DateTimePickerController::time(form.ids(), "alarm");
    let id = add_picker(&mut form, picker);

    let before = Local::now().naive_local();
    form.dispatch(renderer.focus(id)).unwrap();
    let after = Local::now().naive_local();

    let initial = presenter.chooser_requests()[0].initial;
    assert!(initial >= before && initial <= after);
}

#[test]
fn test_unparseable_submitted_date_kept() {
    let (mut form, renderer, presenter) = headless_form();
    let picker = DateTimePickerController::date(form.ids(), "dob").submitted_value("2023/12/25");
    let id = add_picker(&mut form, picker);

    assert_eq!(form.store().get_text("dob").as_deref(), Some("2023/12/25"));
    assert_eq!(renderer.text(id), "2023/12/25");

    let before = Local::now().naive_local();
    form.dispatch(renderer.focus(id)).unwrap();
    let after = Local::now().naive_local();

    let initial = presenter.chooser_requests()[0].initial;
    assert!(initial >= before && initial <= after);
}

#[test]
fn test_unparseable_submitted_time_dropped() {
    let (mut form, renderer, _) = headless_form();
    let picker = DateTimePickerController::time(form.ids(), "alarm").submitted_value("quarter past");
    let id = add_picker(&mut form, picker);

    assert!(!form.store().contains("alarm"));
    assert_eq!(renderer.text(id), "");
}

#[test]
fn test_time_picker_24_hour() {
    let (mut form, renderer, presenter) = headless_form();
    let picker = DateTimePickerController::time(form.ids(), "start")
        .twenty_four_hour(true)
        .submitted_value("14:30");
    let id = add_picker(&mut form, picker);

    form.dispatch(renderer.focus(id)).unwrap();
    let request = presenter.chooser_requests()[0].clone();
    assert!(request.is_24_hour);
    assert_eq!(request.kind, ChooserKind::Time);
    assert_eq!(request.initial.time(), NaiveTime::from_hms_opt(14, 30, 0).unwrap());

    let value = request.initial.date().and_hms_opt(9, 5, 0).unwrap();
    form.dispatch(SurfaceEvent::ChooserConfirmed { surface: id, value })
        .unwrap();
    assert_eq!(form.store().get_text("start").as_deref(), Some("09:05"));
}

#[test]
fn test_time_picker_12_hour() {
    let (mut form, renderer, _) = headless_form();
    let picker = DateTimePickerController::time(form.ids(), "start");
    let id = add_picker(&mut form, picker);

    form.dispatch(renderer.click(id)).unwrap();
    let value = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(18, 45, 0)
        .unwrap();
    form.dispatch(SurfaceEvent::ChooserConfirmed { surface: id, value })
        .unwrap();
    assert_eq!(renderer.text(id), "06:45 PM");
}
