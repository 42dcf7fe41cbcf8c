//! Text input type mask.

use bitflags::bitflags;

/// Longest input accepted by a phone-typed text entry.
pub const PHONE_MAX_LENGTH: usize = 10;

bitflags! {
    /// Content type of a text surface, as a bit mask.
    ///
    /// The low nibble is the input class (text, number, phone, date/time);
    /// the remaining bits are variations and flags that can be toggled on
    /// top of any class.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InputType: u32 {
        /// Free-form text.
        const CLASS_TEXT = 0x0000_0001;
        /// Numeric entry.
        const CLASS_NUMBER = 0x0000_0002;
        /// Phone number entry.
        const CLASS_PHONE = 0x0000_0003;
        /// Date or time entry.
        const CLASS_DATETIME = 0x0000_0004;
        /// Hide the entered text.
        const VARIATION_PASSWORD = 0x0000_0080;
        /// Allow more than one line.
        const FLAG_MULTI_LINE = 0x0002_0000;
    }
}

impl InputType {
    const CLASS_MASK: u32 = 0x0000_000f;

    /// Returns only the class bits.
    pub fn class(self) -> InputType {
        InputType::from_bits_retain(self.bits() & Self::CLASS_MASK)
    }

    /// Returns `true` if the class is exactly the phone class.
    pub fn is_phone(self) -> bool {
        self.class() == InputType::CLASS_PHONE
    }

    /// Returns `true` if the multi-line flag is set.
    pub fn is_multi_line(self) -> bool {
        self.contains(InputType::FLAG_MULTI_LINE)
    }

    /// Returns `true` if the password variation is set.
    pub fn is_secure(self) -> bool {
        self.contains(InputType::VARIATION_PASSWORD)
    }

    /// Returns the mask with its class replaced, keeping every flag.
    pub fn with_class(self, class: InputType) -> InputType {
        InputType::from_bits_retain(
            (self.bits() & !Self::CLASS_MASK) | (class.bits() & Self::CLASS_MASK),
        )
    }

    /// Returns the mask with `flag` set or cleared.
    pub fn with_flag(self, flag: InputType, enabled: bool) -> InputType {
        if enabled { self | flag } else { self & !flag }
    }
}

impl Default for InputType {
    fn default() -> Self {
        InputType::CLASS_TEXT
    }
}
