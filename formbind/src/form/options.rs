//! Form configuration.

use crate::validation::ErrorDisplay;

/// Form-wide configuration.
#[derive(Debug, Clone)]
pub struct FormOptions {
    /// Locale handed to the message resolver.
    pub locale: String,

    /// How validation failures are presented.
    pub error_display: ErrorDisplay,

    /// If true, validation notifications raised by user edits validate the
    /// whole form and present the result right away.
    pub live_validation: bool,

    /// Title of the aggregated alert.
    pub validation_title: String,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            error_display: ErrorDisplay::default(),
            live_validation: true,
            validation_title: "Validation Error".to_string(),
        }
    }
}

impl FormOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the locale.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the error display strategy.
    pub fn error_display(mut self, display: ErrorDisplay) -> Self {
        self.error_display = display;
        self
    }

    /// Show every failure in one alert.
    pub fn aggregated(mut self) -> Self {
        self.error_display = ErrorDisplay::Aggregated;
        self
    }

    /// Enable or disable live validation.
    pub fn live_validation(mut self, enabled: bool) -> Self {
        self.live_validation = enabled;
        self
    }

    /// Set the title of the aggregated alert.
    pub fn validation_title(mut self, title: impl Into<String>) -> Self {
        self.validation_title = title.into();
        self
    }
}
