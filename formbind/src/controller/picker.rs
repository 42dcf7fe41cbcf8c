//! Date and time picker field.

use std::any::Any;
use std::fmt::Write as _;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, warn};

use super::{FieldAction, FieldContext, FieldController, FieldCore, display_text, sync_text};
use crate::presenter::{ChooserKind, ChooserRequest};
use crate::surface::{InputType, SurfaceEvent, SurfaceIdAllocator, SurfaceKind, SurfaceSpec};

/// Default date format.
pub const DATE_FORMAT: &str = "%d-%m-%Y";
/// Default 12-hour time format.
pub const TIME_FORMAT_12H: &str = "%I:%M %p";
/// Default 24-hour time format.
pub const TIME_FORMAT_24H: &str = "%H:%M";

/// Read-only text that opens a date or time chooser.
///
/// The store holds the formatted text. Focusing or tapping the surface opens
/// a chooser seeded from that text, or from the current moment when the
/// field is empty or unparseable. At most one chooser is open at a time.
#[derive(Debug)]
pub struct DateTimePickerController {
    core: FieldCore,
    kind: ChooserKind,
    format: Option<String>,
    is_24_hour: bool,
    placeholder: Option<String>,
    submitted: Option<String>,
    chooser_open: bool,
}

impl DateTimePickerController {
    /// Create a date picker.
    pub fn date(ids: &SurfaceIdAllocator, name: impl Into<String>) -> Self {
        Self::new(ids, name, ChooserKind::Date)
    }

    /// Create a time picker.
    pub fn time(ids: &SurfaceIdAllocator, name: impl Into<String>) -> Self {
        Self::new(ids, name, ChooserKind::Time)
    }

    fn new(ids: &SurfaceIdAllocator, name: impl Into<String>, kind: ChooserKind) -> Self {
        Self {
            core: FieldCore::new(name, ids.generate()),
            kind,
            format: None,
            is_24_hour: false,
            placeholder: None,
            submitted: None,
            chooser_open: false,
        }
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.core.set_label(label);
        self
    }

    /// Set the hint shown while empty.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Make the field required.
    pub fn required(mut self, required: bool) -> Self {
        self.core.set_required(required);
        self
    }

    /// Set the text written to the store when the surface is created.
    ///
    /// Date text is written as given. Time text that does not parse with the
    /// picker's format is dropped.
    pub fn submitted_value(mut self, value: impl Into<String>) -> Self {
        self.submitted = Some(value.into());
        self
    }

    /// Use a custom `chrono` format string.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Use a 24-hour clock (time pickers only).
    pub fn twenty_four_hour(mut self, is_24_hour: bool) -> Self {
        self.is_24_hour = is_24_hour;
        self
    }

    /// Date or time.
    pub fn kind(&self) -> ChooserKind {
        self.kind
    }

    /// The effective format string.
    pub fn format_str(&self) -> &str {
        match (&self.format, self.kind, self.is_24_hour) {
            (Some(format), _, _) => format.as_str(),
            (None, ChooserKind::Date, _) => DATE_FORMAT,
            (None, ChooserKind::Time, false) => TIME_FORMAT_12H,
            (None, ChooserKind::Time, true) => TIME_FORMAT_24H,
        }
    }

    /// Returns `true` while a chooser opened by this field is showing.
    pub fn is_chooser_open(&self) -> bool {
        self.chooser_open
    }

    /// Parse `text` into a moment on `today` (for times) or at midnight
    /// (for dates).
    fn parse(&self, text: &str, today: NaiveDate) -> Option<NaiveDateTime> {
        match self.kind {
            ChooserKind::Date => NaiveDate::parse_from_str(text, self.format_str())
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN)),
            ChooserKind::Time => NaiveTime::parse_from_str(text, self.format_str())
                .ok()
                .map(|time| today.and_time(time)),
        }
    }

    fn render(&self, value: NaiveDateTime) -> Option<String> {
        let mut text = String::new();
        let written = match self.kind {
            ChooserKind::Date => write!(text, "{}", value.date().format(self.format_str())),
            ChooserKind::Time => write!(text, "{}", value.time().format(self.format_str())),
        };
        written.ok().map(|_| text)
    }

    fn open_chooser(&mut self, cx: &mut FieldContext<'_>) {
        if self.chooser_open {
            return;
        }
        let now = cx.now();
        let initial = cx
            .store()
            .get_text(self.core.name())
            .and_then(|text| self.parse(&text, now.date()))
            .unwrap_or(now);

        debug!(
            "Opening {:?} chooser for '{}' at {}",
            self.kind,
            self.core.name(),
            initial
        );
        self.chooser_open = true;
        cx.presenter().show_chooser(ChooserRequest {
            surface: self.core.surface_id(),
            kind: self.kind,
            initial,
            is_24_hour: self.is_24_hour,
        });
    }

    fn confirm(&mut self, value: NaiveDateTime, cx: &mut FieldContext<'_>) {
        self.chooser_open = false;
        let Some(text) = self.render(value) else {
            warn!(
                "Cannot format {} for '{}' with '{}'",
                value,
                self.core.name(),
                self.format_str()
            );
            return;
        };
        debug!("Chooser for '{}' confirmed: {}", self.core.name(), text);
        cx.store().set(self.core.name(), text.as_str());
        sync_text(cx.renderer(), self.core.surface_id(), &text);
        cx.notify_validation();
    }
}

impl FieldController for DateTimePickerController {
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
        // Dates are kept verbatim; an unreadable one only falls back to now
        // when the chooser opens. Times must parse to be kept.
        if let Some(text) = &self.submitted {
            let keep = match self.kind {
                ChooserKind::Date => true,
                ChooserKind::Time => self.parse(text, cx.now().date()).is_some(),
            };
            if keep {
                cx.store().set(self.core.name(), text.as_str());
            } else {
                warn!(
                    "Ignoring submitted value '{}' for '{}': expected format '{}'",
                    text,
                    self.core.name(),
                    self.format_str()
                );
            }
        }

        let spec = SurfaceSpec::new(self.core.surface_id(), SurfaceKind::Picker(self.kind))
            .caption(self.core.label())
            .placeholder(self.placeholder.as_deref())
            .input_type(InputType::CLASS_DATETIME)
            .read_only();
        cx.renderer().create_surface(&spec);
    }

    fn refresh(&mut self, cx: &mut FieldContext<'_>) {
        let text = display_text(cx.store(), self.core.name());
        sync_text(cx.renderer(), self.core.surface_id(), &text);
    }

    fn handle_event(
        &mut self,
        event: &SurfaceEvent,
        cx: &mut FieldContext<'_>,
    ) -> Option<FieldAction> {
        match event {
            SurfaceEvent::Focused(_) | SurfaceEvent::Clicked(_) => self.open_chooser(cx),
            SurfaceEvent::ChooserConfirmed { value, .. } => self.confirm(*value, cx),
            SurfaceEvent::ChooserDismissed(_) => {
                debug!("Chooser for '{}' dismissed", self.core.name());
                self.chooser_open = false;
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formats() {
        let ids = SurfaceIdAllocator::new();
        assert_eq!(DateTimePickerController::date(&ids, "d").format_str(), "%d-%m-%Y");
        assert_eq!(DateTimePickerController::time(&ids, "t").format_str(), "%I:%M %p");
        assert_eq!(
            DateTimePickerController::time(&ids, "t")
                .twenty_four_hour(true)
                .format_str(),
            "%H:%M"
        );
        assert_eq!(
            DateTimePickerController::date(&ids, "d")
                .format("%Y/%m/%d")
                .format_str(),
            "%Y/%m/%d"
        );
    }

    #[test]
    fn test_parse_and_render() {
        let ids = SurfaceIdAllocator::new();
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let date = DateTimePickerController::date(&ids, "d");
        let parsed = date.parse("25-12-2023", today).unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2023, 12, 25).unwrap());
        assert_eq!(date.render(parsed).as_deref(), Some("25-12-2023"));
        assert!(date.parse("2023-12-25", today).is_none());

        let time = DateTimePickerController::time(&ids, "t");
        let parsed = time.parse("02:30 PM", today).unwrap();
        assert_eq!(parsed.date(), today);
        assert_eq!(parsed.time(), NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert_eq!(time.render(parsed).as_deref(), Some("02:30 PM"));
    }
}
