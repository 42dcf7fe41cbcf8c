//! Scripted walk through a registration form using the headless surfaces.
//!
//! Usage: `formbind-demo [prefill.json]`, where the optional file holds a
//! JSON object of field names to values.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use formbind::headless::{HeadlessPresenter, HeadlessRenderer};
use formbind::prelude::*;
use log::{debug, info};
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Failed to read prefill file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid prefill JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Logger setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),
}

fn load_prefill(path: &Path) -> Result<ValueStore, DemoError> {
    let file = File::open(path)?;
    let values: HashMap<String, Value> = serde_json::from_reader(file)?;
    info!("Loaded {} prefilled values from {}", values.len(), path.display());
    Ok(values.into_iter().collect())
}

fn build_form(form: &mut FormController) -> Result<(), DemoError> {
    let ids = form.ids().clone();

    let contact = FormSection::titled("Contact")
        .with(StaticTextController::new(&ids, "intro").label("Tell us about yourself"))
        .with(
            TextFieldController::new(&ids, "name")
                .label("Name")
                .placeholder("Full name")
                .required(true),
        )
        .with(
            TextFieldController::new(&ids, "phone")
                .label("Phone")
                .mobile(true),
        )
        .with(
            TextFieldController::new(&ids, "city")
                .label("City")
                .autocomplete(vec![
                    Suggestion::new("Pune", "PNQ"),
                    Suggestion::new("Mumbai", "BOM"),
                    Suggestion::new("Nagpur", "NAG"),
                ]),
        )
        .with(DateTimePickerController::date(&ids, "dob").label("Date of birth"));

    let preferences = FormSection::titled("Preferences")
        .with(SeparatorController::new(&ids, "divider").submitted_value("v1"))
        .with(
            ChoiceGroupController::new(
                &ids,
                "plan",
                ChoiceKind::Radio,
                ["Basic", "Premium"],
                ItemValues::Explicit(vec![Value::from("basic"), Value::from("premium")]),
            )?
            .label("Plan")
            .required(true),
        )
        .with(
            ChoiceGroupController::new(
                &ids,
                "topics",
                ChoiceKind::Checkbox,
                ["News", "Offers", "Updates"],
                ItemValues::Labels,
            )?
            .label("Topics")
            .submitted_items(["news"]),
        )
        .with(
            ImageGroupController::new(
                &ids,
                "documents",
                vec![
                    ImageRecord::new("ID card", None::<String>),
                    ImageRecord::new("Address proof", Some("address.png")),
                ],
                ItemValues::Labels,
            )?
            .label("Documents")
            .required(true),
        )
        .with(ValueTextController::new(&ids, "summary").label("Summary"))
        .with(ButtonController::new(&ids, "submit").label("Submit"));

    form.add_section(contact)?;
    form.add_section(preferences)?;
    Ok(())
}

fn report(form: &FormController, failures: &[ValidationFailure]) {
    if failures.is_empty() {
        println!("  form is valid");
    }
    for failure in failures {
        let shown = form
            .element(&failure.field_name)
            .ok()
            .and_then(|element| element.error().map(str::to_string))
            .unwrap_or_default();
        println!("  {}: {}", failure.field_name, shown);
    }
}

fn run(prefill: Option<&Path>) -> Result<(), DemoError> {
    let store = match prefill {
        Some(path) => load_prefill(path)?,
        None => ValueStore::new(),
    };

    let renderer = HeadlessRenderer::new();
    let presenter = HeadlessPresenter::new();
    let mut form = FormController::new(Arc::new(renderer.clone()), Arc::new(presenter.clone()))
        .with_store(store);
    build_form(&mut form)?;

    let surfaces = form.render()?;
    println!("Rendered {} fields", surfaces.len());

    println!("Initial validation:");
    let failures = form.validate_and_display()?;
    report(&form, &failures);

    let name = form.surface("name")?;
    let phone = form.surface("phone")?;
    let dob = form.surface("dob")?;
    form.dispatch(renderer.type_text(name, "Asha Kulkarni"))?;
    form.dispatch(renderer.type_text(phone, "98765"))?;
    println!("After typing a short phone number:");
    report(&form, &form.validate());

    form.dispatch(renderer.type_text(phone, "9876543210"))?;
    form.dispatch(renderer.focus(dob))?;
    if let Some(request) = presenter.chooser_requests().last() {
        debug!("Chooser opened for {:?} at {}", request.surface, request.initial);
    }
    if let Some(value) = NaiveDate::from_ymd_opt(1994, 3, 18).and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        form.dispatch(SurfaceEvent::ChooserConfirmed { surface: dob, value })?;
    }

    let plan = form
        .element_as::<ChoiceGroupController>("plan")?
        .member_id(1);
    if let Some(premium) = plan {
        form.dispatch(renderer.toggle(premium, true))?;
    }

    let tile = form
        .element_as::<ImageGroupController>("documents")?
        .tile_id(0);
    if let Some(tile) = tile
        && let Some(FieldAction::ImageSelected { index, mut image, .. }) =
            form.dispatch(renderer.click(tile))?
    {
        println!("Capturing image for '{}'", image.text);
        image.image_ref = Some("id-card.png".to_string());
        let mut images = form
            .store()
            .get("documents")
            .and_then(|v| v.as_images().map(<[ImageRecord]>::to_vec))
            .unwrap_or_default();
        if let Some(slot) = images.get_mut(index) {
            *slot = image;
        }
        form.store().set("documents", images);
        form.refresh_field("documents")?;
    }

    form.store().set("summary", "Ready to submit");
    form.refresh_field("summary")?;

    println!("Final validation:");
    let failures = form.validate_and_display()?;
    report(&form, &failures);

    let submit = form.surface("submit")?;
    if let Some(FieldAction::ButtonPressed { field }) = form.dispatch(renderer.click(submit))? {
        println!("'{}' pressed", field);
    }

    let mut values: Vec<_> = form.store().snapshot().into_iter().collect();
    values.sort_by(|a, b| a.0.cmp(&b.0));
    println!("Store:");
    for (name, value) in values {
        println!("  {} = {}", name, value);
    }
    println!(
        "Notifications: {}, surface mutations: {}",
        form.validation_notifications(),
        renderer.total_mutations()
    );

    Ok(())
}

fn main() {
    let logger = File::create("formbind-demo.log")
        .map_err(DemoError::from)
        .and_then(|file| {
            WriteLogger::init(LevelFilter::Debug, Config::default(), file).map_err(DemoError::from)
        });
    if let Err(e) = logger {
        eprintln!("Error: {}", e);
        return;
    }

    let prefill = std::env::args().nth(1);
    if let Err(e) = run(prefill.as_deref().map(Path::new)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
