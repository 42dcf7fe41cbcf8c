//! Modal presentation for choosers and aggregated messages.
//!
//! Modals are owned by the application. The engine only asks for one to be
//! shown; the outcome of a chooser comes back later as a
//! [`SurfaceEvent::ChooserConfirmed`](crate::surface::SurfaceEvent::ChooserConfirmed)
//! or [`SurfaceEvent::ChooserDismissed`](crate::surface::SurfaceEvent::ChooserDismissed).

use chrono::NaiveDateTime;

use crate::surface::SurfaceId;

/// Which chooser to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChooserKind {
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
}

/// Request to open a chooser modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ChooserRequest {
    /// Surface the result must be reported for.
    pub surface: SurfaceId,
    /// Date or time chooser.
    pub kind: ChooserKind,
    /// Moment the chooser starts on.
    pub initial: NaiveDateTime,
    /// Show a 24-hour clock (time choosers only).
    pub is_24_hour: bool,
}

/// Shows modal UI on behalf of the engine.
pub trait ModalPresenter: Send + Sync {
    /// Open a chooser. The result is reported through a surface event.
    fn show_chooser(&self, request: ChooserRequest);

    /// Show a single alert with a title and a (possibly multi-line) body.
    fn show_aggregated_message(&self, title: &str, body: &str);
}
