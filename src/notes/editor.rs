use crate::util::{byte_idx_to_utf16, utf16_len, utf16_to_byte_idx};

pub(crate) const NOTES_MAX_CHARS: usize = 500;
pub(crate) const BULLET: &str = "• ";

const NEW_BULLET_LINE: &str = "\n• ";

/// Review-notes buffer that keeps every line bulleted.
///
/// Lengths and caret positions are in UTF-16 code units, matching what the
/// browser textarea reports for `value.length` and `selectionStart`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct BulletNotes {
    text: String,
}

impl BulletNotes {
    pub fn new(initial: &str) -> Self {
        Self {
            text: initial.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        utf16_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn remaining(&self) -> usize {
        NOTES_MAX_CHARS.saturating_sub(self.len())
    }

    /// Replace the buffer with `incoming` (the control's new value).
    ///
    /// The first keystroke into an empty buffer gets the bullet prefix. Values over
    /// the cap are rejected and leave the buffer untouched. Returns the accepted
    /// value.
    pub fn on_change(&mut self, incoming: &str) -> Option<&str> {
        let next = if self.text.is_empty() && !incoming.is_empty() {
            format!("{BULLET}{incoming}")
        } else {
            incoming.to_string()
        };

        if utf16_len(&next) > NOTES_MAX_CHARS {
            return None;
        }

        self.text = next;
        Some(&self.text)
    }

    /// Split at the caret and start a new bullet line.
    ///
    /// Returns the caret position after the inserted prefix, or `None` when the
    /// insertion would exceed the cap (the keypress is swallowed either way).
    pub fn on_enter(&mut self, caret_utf16: u32) -> Option<u32> {
        if self.len() + utf16_len(NEW_BULLET_LINE) > NOTES_MAX_CHARS {
            return None;
        }

        let at = utf16_to_byte_idx(&self.text, caret_utf16);
        self.text.insert_str(at, NEW_BULLET_LINE);
        Some(byte_idx_to_utf16(&self.text, at + NEW_BULLET_LINE.len()))
    }

    /// Remove an empty trailing bullet line in one keystroke.
    ///
    /// Applies only when the caret ends a line that is exactly `"• "` and that line
    /// is not the first one. Returns the new caret position; `None` means the
    /// default single-character deletion should run.
    pub fn on_backspace(&mut self, caret_utf16: u32) -> Option<u32> {
        let at = utf16_to_byte_idx(&self.text, caret_utf16);
        let (before, after) = self.text.split_at(at);

        if !before.ends_with(NEW_BULLET_LINE) {
            return None;
        }
        if !(after.is_empty() || after.starts_with('\n')) {
            return None;
        }

        let start = at - NEW_BULLET_LINE.len();
        self.text.replace_range(start..at, "");
        Some(byte_idx_to_utf16(&self.text, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end(n: &BulletNotes) -> u32 {
        n.len() as u32
    }

    #[test]
    fn first_character_gets_bullet() {
        let mut n = BulletNotes::default();
        assert_eq!(n.on_change("x"), Some("• x"));
        assert_eq!(n.text(), "• x");
    }

    #[test]
    fn later_changes_are_taken_verbatim() {
        let mut n = BulletNotes::new("• a");
        assert_eq!(n.on_change("• ab"), Some("• ab"));
        assert_eq!(n.on_change(""), Some(""));
        // Empty again: the next keystroke is prefixed.
        assert_eq!(n.on_change("z"), Some("• z"));
    }

    #[test]
    fn clearing_does_not_add_a_bullet() {
        let mut n = BulletNotes::default();
        assert_eq!(n.on_change(""), Some(""));
        assert!(n.is_empty());
    }

    #[test]
    fn cap_accepts_500_and_rejects_501() {
        let mut n = BulletNotes::default();
        assert_eq!(n.on_change("x"), Some("• x"));

        let full = format!("{BULLET}{}", "x".repeat(NOTES_MAX_CHARS - 2));
        assert_eq!(n.on_change(&full).map(str::len), Some(full.len()));
        assert_eq!(n.len(), NOTES_MAX_CHARS);
        assert_eq!(n.remaining(), 0);

        let over = format!("{full}y");
        assert_eq!(n.on_change(&over), None);
        assert_eq!(n.text(), full);
    }

    #[test]
    fn prefix_counts_toward_cap() {
        let mut n = BulletNotes::default();
        let pasted = "x".repeat(NOTES_MAX_CHARS - 1);
        assert_eq!(n.on_change(&pasted), None);
        assert!(n.is_empty());
    }

    #[test]
    fn enter_at_end_starts_new_bullet() {
        let mut n = BulletNotes::new("• a");
        let caret = n.on_enter(end(&n));
        assert_eq!(n.text(), "• a\n• ");
        assert_eq!(caret, Some(end(&n)));
    }

    #[test]
    fn enter_mid_line_splits() {
        let mut n = BulletNotes::new("• ab");
        let caret = n.on_enter(3);
        assert_eq!(n.text(), "• a\n• b");
        assert_eq!(caret, Some(6));
    }

    #[test]
    fn enter_is_swallowed_at_cap() {
        let full = format!("{BULLET}{}", "x".repeat(NOTES_MAX_CHARS - 3));
        let mut n = BulletNotes::new(&full);
        assert_eq!(n.on_enter(end(&n)), None);
        assert_eq!(n.text(), full);
    }

    #[test]
    fn backspace_removes_empty_bullet_line() {
        let mut n = BulletNotes::new("• a\n• ");
        let caret = n.on_backspace(end(&n));
        assert_eq!(n.text(), "• a");
        assert_eq!(caret, Some(3));
    }

    #[test]
    fn backspace_on_only_line_falls_through() {
        let mut n = BulletNotes::new("• ");
        assert_eq!(n.on_backspace(2), None);
        assert_eq!(n.text(), "• ");
    }

    #[test]
    fn backspace_on_non_empty_line_falls_through() {
        let mut n = BulletNotes::new("• a\n• b");
        assert_eq!(n.on_backspace(end(&n)), None);
        assert_eq!(n.text(), "• a\n• b");
    }

    #[test]
    fn backspace_respects_caret_position() {
        // Empty bullet in the middle, caret right after it.
        let mut n = BulletNotes::new("• a\n• \n• b");
        assert_eq!(n.on_backspace(6), Some(3));
        assert_eq!(n.text(), "• a\n• b");

        // Caret before text on the same line: not an empty line.
        let mut n = BulletNotes::new("• a\n• b");
        assert_eq!(n.on_backspace(6), None);
    }

    #[test]
    fn caret_math_uses_utf16_units() {
        let mut n = BulletNotes::new("• 😀");
        // "• " is 2 units, the emoji is 2 more.
        assert_eq!(n.len(), 4);
        assert_eq!(n.on_enter(4), Some(7));
        assert_eq!(n.text(), "• 😀\n• ");
        assert_eq!(n.on_backspace(7), Some(4));
        assert_eq!(n.text(), "• 😀");
    }
}
