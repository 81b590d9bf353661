//! Per-field input state
//!
//! [`ImeiField`] wires the masking functions the way an input widget does:
//! keydown is filtered before it touches the value, change events are
//! sanitized, and pastes replace the value wholesale. The value can only
//! ever hold 0 to 15 ASCII digits.

use crate::core::imei::{filter_keystroke, handle_paste, is_digit_key, is_valid, sanitize, IMEI_LENGTH};
use crate::domain::model::{FieldState, Imei};

/// What happened to a keydown event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was let through and applied.
    Accepted,
    /// A digit arrived while the field was full.
    Dropped,
    /// Rejected by the keystroke filter; the default action must be cancelled.
    Suppressed,
}

impl KeyOutcome {
    /// Whether the input layer should call `preventDefault` (or equivalent).
    pub fn prevents_default(&self) -> bool {
        !matches!(self, Self::Accepted)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Dropped => "dropped",
            Self::Suppressed => "suppressed",
        }
    }
}

/// One replayed keydown and the value it left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStep {
    pub key: String,
    pub outcome: KeyOutcome,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImeiField {
    value: String,
    caret: usize,
}

impl ImeiField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn state(&self) -> FieldState {
        FieldState::for_length(self.value.len())
    }

    pub fn is_valid(&self) -> bool {
        is_valid(&self.value)
    }

    pub fn key_down(&mut self, key: &str) -> KeyOutcome {
        if !filter_keystroke(key) {
            tracing::debug!("Suppressed keystroke {:?}", key);
            return KeyOutcome::Suppressed;
        }

        if is_digit_key(key) {
            if self.value.len() >= IMEI_LENGTH {
                return KeyOutcome::Dropped;
            }
            self.value.insert_str(self.caret, key);
            self.caret += 1;
            return KeyOutcome::Accepted;
        }

        match key {
            "Backspace" => {
                if self.caret > 0 {
                    self.caret -= 1;
                    self.value.remove(self.caret);
                }
            }
            "Delete" => {
                if self.caret < self.value.len() {
                    self.value.remove(self.caret);
                }
            }
            "ArrowLeft" => self.caret = self.caret.saturating_sub(1),
            "ArrowRight" => self.caret = (self.caret + 1).min(self.value.len()),
            "Home" => self.caret = 0,
            "End" => self.caret = self.value.len(),
            // Tab moves focus away and leaves the value alone
            _ => {}
        }
        KeyOutcome::Accepted
    }

    pub fn replay<I, S>(&mut self, keys: I) -> Vec<KeyStep>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .map(|key| {
                let key = key.as_ref();
                let outcome = self.key_down(key);
                KeyStep {
                    key: key.to_string(),
                    outcome,
                    value: self.value.clone(),
                }
            })
            .collect()
    }

    /// Change event: whatever the input layer ended up with is re-sanitized.
    pub fn input(&mut self, raw: &str) {
        self.value = sanitize(raw);
        self.caret = self.value.len();
    }

    /// Paste event. Replaces the current value, it never merges.
    pub fn paste(&mut self, clipboard: &str) {
        self.value = handle_paste(clipboard);
        self.caret = self.value.len();
        tracing::debug!(
            "Paste produced {} digits ({:?})",
            self.value.len(),
            self.state()
        );
    }

    pub fn reset(&mut self) {
        self.value.clear();
        self.caret = 0;
    }

    /// The canonical IMEI, once the field holds exactly 15 digits.
    pub fn submit(&self) -> Option<Imei> {
        Imei::parse(&self.value).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(field: &mut ImeiField, keys: &str) {
        for c in keys.chars() {
            field.key_down(&c.to_string());
        }
    }

    #[test]
    fn test_new_field_is_empty() {
        let field = ImeiField::new();
        assert_eq!(field.state(), FieldState::Empty);
        assert_eq!(field.caret(), 0);
        assert!(!field.is_valid());
        assert!(field.submit().is_none());
    }

    #[test]
    fn test_typing_digits_moves_through_states() {
        let mut field = ImeiField::new();
        assert_eq!(field.key_down("3"), KeyOutcome::Accepted);
        assert_eq!(field.state(), FieldState::Partial);

        type_keys(&mut field, "52099001761481");
        assert_eq!(field.value(), "352099001761481");
        assert_eq!(field.state(), FieldState::Complete);
        assert!(field.is_valid());
    }

    #[test]
    fn test_sixteenth_digit_is_dropped() {
        let mut field = ImeiField::new();
        type_keys(&mut field, "352099001761481");
        let outcome = field.key_down("9");
        assert_eq!(outcome, KeyOutcome::Dropped);
        assert!(outcome.prevents_default());
        assert_eq!(field.value(), "352099001761481");
    }

    #[test]
    fn test_letters_are_suppressed() {
        let mut field = ImeiField::new();
        type_keys(&mut field, "35209900176148");
        let outcome = field.key_down("a");
        assert_eq!(outcome, KeyOutcome::Suppressed);
        assert!(outcome.prevents_default());
        assert_eq!(field.value(), "35209900176148");
        assert!(!field.is_valid());
    }

    #[test]
    fn test_backspace_and_delete_leave_complete() {
        let mut field = ImeiField::new();
        field.paste("352099001761481");

        assert_eq!(field.key_down("Backspace"), KeyOutcome::Accepted);
        assert_eq!(field.value(), "35209900176148");
        assert_eq!(field.state(), FieldState::Partial);

        field.key_down("Home");
        field.key_down("Delete");
        assert_eq!(field.value(), "5209900176148");
        assert_eq!(field.caret(), 0);
    }

    #[test]
    fn test_backspace_at_start_and_delete_at_end_are_noops() {
        let mut field = ImeiField::new();
        field.paste("12");
        field.key_down("Delete");
        assert_eq!(field.value(), "12");

        field.key_down("Home");
        field.key_down("Backspace");
        assert_eq!(field.value(), "12");
    }

    #[test]
    fn test_caret_navigation_inserts_in_place() {
        let mut field = ImeiField::new();
        type_keys(&mut field, "1245");
        field.key_down("ArrowLeft");
        field.key_down("ArrowLeft");
        field.key_down("3");
        assert_eq!(field.value(), "12345");
        assert_eq!(field.caret(), 3);

        field.key_down("End");
        field.key_down("ArrowRight");
        assert_eq!(field.caret(), 5);

        field.key_down("Home");
        field.key_down("ArrowLeft");
        assert_eq!(field.caret(), 0);
    }

    #[test]
    fn test_tab_keeps_value() {
        let mut field = ImeiField::new();
        type_keys(&mut field, "35");
        assert_eq!(field.key_down("Tab"), KeyOutcome::Accepted);
        assert_eq!(field.value(), "35");
    }

    #[test]
    fn test_paste_replaces_existing_value() {
        let mut field = ImeiField::new();
        type_keys(&mut field, "999");
        field.paste("12a3-45b");
        assert_eq!(field.value(), "12345");
        assert_eq!(field.caret(), 5);
    }

    #[test]
    fn test_paste_with_trailing_text() {
        let mut field = ImeiField::new();
        field.paste("352099001761481extra");
        assert_eq!(field.value(), "352099001761481");
        assert!(field.is_valid());
        assert_eq!(field.submit().unwrap().as_str(), "352099001761481");
    }

    #[test]
    fn test_input_event_sanitizes() {
        let mut field = ImeiField::new();
        field.input("35 2099 0017 6148 1 00");
        assert_eq!(field.value(), "352099001761481");
    }

    #[test]
    fn test_replay_records_each_step() {
        let mut field = ImeiField::new();
        let steps = field.replay(["3", "5", "a", "Backspace"]);

        let summary: Vec<(&str, &str, &str)> = steps
            .iter()
            .map(|s| (s.key.as_str(), s.outcome.label(), s.value.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("3", "accepted", "3"),
                ("5", "accepted", "35"),
                ("a", "suppressed", "35"),
                ("Backspace", "accepted", "3"),
            ]
        );
        assert_eq!(field.value(), "3");
    }

    #[test]
    fn test_reset_returns_to_empty() {
        let mut field = ImeiField::new();
        field.paste("352099001761481");
        field.reset();
        assert_eq!(field.state(), FieldState::Empty);
        assert_eq!(field.caret(), 0);
    }
}
