//! Keyboard names and the numeric editor's key policy.

pub const KEY_BACKSPACE: &str = "Backspace";
pub const KEY_F2: &str = "F2";
pub const KEY_ENTER: &str = "Enter";
pub const KEY_TAB: &str = "Tab";
pub const KEY_ARROW_LEFT: &str = "ArrowLeft";
pub const KEY_ARROW_RIGHT: &str = "ArrowRight";

/// What the host should do with a keystroke delivered to an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Let the input handle it natively, but keep it away from the grid's
    /// own navigation.
    Native,
    /// Finish editing. The keystroke is consumed.
    StopEditing,
    /// Swallow the keystroke; nothing is inserted.
    Suppress,
    /// Normal input.
    PassThrough,
}

impl KeyDisposition {
    /// Whether the host must call `preventDefault` on the event.
    #[must_use]
    pub fn prevents_default(self) -> bool {
        matches!(self, KeyDisposition::StopEditing | KeyDisposition::Suppress)
    }

    /// Whether the host must call `stopPropagation` on the event.
    #[must_use]
    pub fn stops_propagation(self) -> bool {
        matches!(self, KeyDisposition::Native)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            KeyDisposition::Native => "native",
            KeyDisposition::StopEditing => "stopEditing",
            KeyDisposition::Suppress => "suppress",
            KeyDisposition::PassThrough => "passThrough",
        }
    }
}

/// A key name that produces exactly one character.
#[must_use]
pub fn is_printable(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_control())
}

#[must_use]
pub fn is_digit(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_digit())
}

#[must_use]
pub fn is_left_or_right(key: &str) -> bool {
    key == KEY_ARROW_LEFT || key == KEY_ARROW_RIGHT
}

#[must_use]
pub fn finishes_editing(key: &str) -> bool {
    key == KEY_ENTER || key == KEY_TAB
}

/// Key policy for numeric cells, evaluated in priority order.
#[must_use]
pub fn numeric_disposition(key: &str) -> KeyDisposition {
    if is_left_or_right(key) || key == KEY_BACKSPACE {
        KeyDisposition::Native
    } else if finishes_editing(key) {
        KeyDisposition::StopEditing
    } else if is_digit(key) {
        KeyDisposition::PassThrough
    } else {
        KeyDisposition::Suppress
    }
}

/// Key policy for text cells: only Enter and Tab are special.
#[must_use]
pub fn text_disposition(key: &str) -> KeyDisposition {
    if finishes_editing(key) {
        KeyDisposition::StopEditing
    } else {
        KeyDisposition::Native
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_keys() {
        assert!(is_printable("5"));
        assert!(is_printable("a"));
        assert!(is_printable("é"));
        assert!(!is_printable("F2"));
        assert!(!is_printable("Enter"));
        assert!(!is_printable(""));
    }

    #[test]
    fn test_function_keys_are_not_digits() {
        assert!(!is_digit("F5"));
        assert!(is_digit("7"));
    }

    #[test]
    fn test_disposition_flags() {
        assert!(KeyDisposition::Native.stops_propagation());
        assert!(!KeyDisposition::Native.prevents_default());
        assert!(KeyDisposition::Suppress.prevents_default());
        assert!(KeyDisposition::StopEditing.prevents_default());
        assert!(!KeyDisposition::PassThrough.prevents_default());
    }
}
