//! Turning failures into user-facing text.

use super::failure::FailureKind;

/// Resolves a failure into display text.
///
/// Applications with their own string tables implement this; the engine
/// ships [`DefaultMessages`].
pub trait MessageResolver: Send + Sync {
    /// Returns the message for `kind` about the field labelled `field_label`.
    fn resolve(&self, kind: FailureKind, field_label: &str, locale: &str) -> String;
}

/// Built-in English and French messages.
///
/// Any locale whose primary language is not French falls back to English.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl MessageResolver for DefaultMessages {
    fn resolve(&self, kind: FailureKind, field_label: &str, locale: &str) -> String {
        let language = locale.split(['-', '_']).next().unwrap_or_default();
        match (language, kind) {
            ("fr", FailureKind::RequiredField) => format!("{} est obligatoire", field_label),
            ("fr", FailureKind::RequiredMobile) => format!(
                "{} doit être un numéro de mobile valide à 10 chiffres",
                field_label
            ),
            (_, FailureKind::RequiredField) => format!("{} is required", field_label),
            (_, FailureKind::RequiredMobile) => {
                format!("{} must be a valid 10-digit mobile number", field_label)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_to_english() {
        let msg = DefaultMessages.resolve(FailureKind::RequiredField, "Name", "de-DE");
        assert_eq!(msg, "Name is required");
    }

    #[test]
    fn test_region_tags() {
        let msg = DefaultMessages.resolve(FailureKind::RequiredField, "Nom", "fr_CA");
        assert_eq!(msg, "Nom est obligatoire");
    }
}
