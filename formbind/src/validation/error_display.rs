/// How validation failures are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorDisplay {
    /// Set the error indicator of each failing field's own surface (default).
    #[default]
    PerField,
    /// Collect every message into one alert, one message per line.
    /// Nothing to reset: the alert dismisses itself.
    Aggregated,
}
