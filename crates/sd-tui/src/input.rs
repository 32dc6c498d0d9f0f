//! Single-line text inputs and the multi-field forms built from them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct TextInput {
    pub(crate) content: String,
    /// Cursor position in characters.
    pub(crate) cursor: usize,
}

impl TextInput {
    pub(crate) fn from(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self { content, cursor }
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.content
            .char_indices()
            .nth(cursor)
            .map_or(self.content.len(), |(index, _)| index)
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub(crate) fn insert(&mut self, c: char) {
        let index = self.byte_index(self.cursor);
        self.content.insert(index, c);
        self.cursor += 1;
    }

    pub(crate) fn delete_back(&mut self) {
        if self.cursor > 0 {
            let index = self.byte_index(self.cursor - 1);
            self.content.remove(index);
            self.cursor -= 1;
        }
    }

    pub(crate) fn delete_forward(&mut self) {
        if self.cursor < self.len() {
            let index = self.byte_index(self.cursor);
            self.content.remove(index);
        }
    }

    pub(crate) fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(crate) fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub(crate) fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub(crate) fn set(&mut self, content: impl Into<String>) {
        *self = Self::from(content);
    }

    /// Apply an editing key. Returns false when the key is not an editing key.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('a') => self.move_home(),
                KeyCode::Char('e') => self.move_end(),
                KeyCode::Char('u') => self.set(String::new()),
                _ => return false,
            }
            return true;
        }
        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.delete_back(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }
}

/// How a form field accepts input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldKind {
    Text,
    /// `YYYY-MM-DD`.
    Date,
    /// A date, optionally followed by `HH:MM`.
    DateTime,
    Number,
    /// Closed set of values cycled with left/right.
    Choice(Vec<&'static str>),
    /// Free text with completions offered from existing values.
    Suggest(Vec<String>),
    ReadOnly,
}

#[derive(Debug, Clone)]
pub(crate) struct FormField {
    pub(crate) label: &'static str,
    pub(crate) kind: FieldKind,
    pub(crate) input: TextInput,
}

impl FormField {
    pub(crate) fn new(label: &'static str, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            label,
            kind,
            input: TextInput::from(value),
        }
    }

    pub(crate) fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self::new(label, FieldKind::Text, value)
    }

    /// A choice field showing `value`, or the first option when `value` is blank.
    pub(crate) fn choice(label: &'static str, options: Vec<&'static str>, value: &str) -> Self {
        let value = if value.trim().is_empty() {
            options.first().copied().unwrap_or_default()
        } else {
            value
        };
        let value = value.to_string();
        Self::new(label, FieldKind::Choice(options), value)
    }

    pub(crate) fn is_editable(&self) -> bool {
        self.kind != FieldKind::ReadOnly
    }

    /// Input hint shown next to the label.
    pub(crate) fn hint(&self) -> Option<&'static str> {
        match self.kind {
            FieldKind::Date => Some("YYYY-MM-DD"),
            FieldKind::DateTime => Some("YYYY-MM-DD [HH:MM]"),
            FieldKind::Choice(_) => Some("←/→ to change"),
            FieldKind::Suggest(_) => Some("→ at end to complete"),
            FieldKind::Text | FieldKind::Number | FieldKind::ReadOnly => None,
        }
    }

    /// First suggestion extending the current text, for suggest fields.
    pub(crate) fn completion(&self) -> Option<&str> {
        let FieldKind::Suggest(options) = &self.kind else {
            return None;
        };
        let typed = self.input.content.trim().to_lowercase();
        if typed.is_empty() {
            return None;
        }
        options
            .iter()
            .find(|option| option.to_lowercase().starts_with(&typed) && option.len() > typed.len())
            .map(String::as_str)
    }

    fn cycle(&mut self, forward: bool) {
        let FieldKind::Choice(options) = &self.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = options
            .iter()
            .position(|option| option.eq_ignore_ascii_case(self.input.content.trim()));
        let next = match (current, forward) {
            (Some(index), true) => (index + 1) % options.len(),
            (Some(index), false) => (index + options.len() - 1) % options.len(),
            (None, _) => 0,
        };
        let value = options[next];
        self.input.set(value);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.kind {
            FieldKind::ReadOnly => {}
            FieldKind::Choice(_) => match key.code {
                KeyCode::Left => self.cycle(false),
                KeyCode::Right | KeyCode::Char(' ') => self.cycle(true),
                _ => {}
            },
            FieldKind::Suggest(_) => {
                let at_end = self.input.cursor == self.input.len();
                if key.code == KeyCode::Right && at_end {
                    if let Some(completion) = self.completion().map(str::to_string) {
                        self.input.set(completion);
                        return;
                    }
                }
                self.input.handle_key(key);
            }
            FieldKind::Number => match key.code {
                KeyCode::Char(c) if !(c.is_ascii_digit() || c == '.' || c == '-') => {}
                _ => {
                    self.input.handle_key(key);
                }
            },
            FieldKind::Text | FieldKind::Date | FieldKind::DateTime => {
                self.input.handle_key(key);
            }
        }
    }
}

/// A vertical list of labelled fields with one focused field.
#[derive(Debug, Clone, Default)]
pub(crate) struct Form {
    pub(crate) fields: Vec<FormField>,
    pub(crate) focus: usize,
}

impl Form {
    pub(crate) fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self { fields, focus: 0 };
        if !form.fields.first().is_some_and(FormField::is_editable) {
            form.focus_next();
        }
        form
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Current text of a field by label.
    pub(crate) fn value(&self, label: &str) -> String {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.input.content.clone())
            .unwrap_or_default()
    }

    pub(crate) fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub(crate) fn focus_next(&mut self) {
        let len = self.fields.len();
        for step in 1..=len {
            let index = (self.focus + step) % len;
            if self.fields[index].is_editable() {
                self.focus = index;
                return;
            }
        }
    }

    pub(crate) fn focus_prev(&mut self) {
        let len = self.fields.len();
        for step in 1..=len {
            let index = (self.focus + len - step) % len;
            if self.fields[index].is_editable() {
                self.focus = index;
                return;
            }
        }
    }

    pub(crate) fn set_value(&mut self, label: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.label == label) {
            field.input.set(value);
        }
    }

    /// Route a key to focus movement or to the focused field.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            _ => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.handle_key(key);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn text_input_edits_at_cursor() {
        let mut input = TextInput::from("Acme");
        input.move_home();
        input.insert('>');
        input.move_end();
        input.delete_back();
        assert_eq!(input.content, ">Acm");
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn text_input_handles_multibyte_characters() {
        let mut input = TextInput::from("Zoë");
        input.delete_back();
        input.insert('e');
        input.move_left();
        input.move_left();
        input.delete_forward();
        assert_eq!(input.content, "Ze");
    }

    #[test]
    fn form_skips_read_only_fields() {
        let mut form = Form::new(vec![
            FormField::new("Latitude", FieldKind::ReadOnly, "51.5"),
            FormField::text("Name", ""),
            FormField::text("Description", ""),
        ]);
        assert_eq!(form.focus, 1);
        form.handle_key(press(KeyCode::Tab));
        form.handle_key(press(KeyCode::Tab));
        assert_eq!(form.focus, 1);
        form.handle_key(press(KeyCode::Char('x')));
        assert_eq!(form.value("Name"), "x");
        assert_eq!(form.value("Latitude"), "51.5");
    }

    #[test]
    fn choice_field_cycles_both_ways() {
        let mut form = Form::new(vec![FormField::choice(
            "Status",
            vec!["Active", "Pending", "Inactive"],
            "",
        )]);
        assert_eq!(form.value("Status"), "Active");
        form.handle_key(press(KeyCode::Left));
        assert_eq!(form.value("Status"), "Inactive");
        form.handle_key(press(KeyCode::Right));
        form.handle_key(press(KeyCode::Right));
        assert_eq!(form.value("Status"), "Pending");
        form.handle_key(press(KeyCode::Char('z')));
        assert_eq!(form.value("Status"), "Pending");
    }

    #[test]
    fn suggest_field_completes_known_value() {
        let mut form = Form::new(vec![FormField::new(
            "Client",
            FieldKind::Suggest(vec!["Acme Corp".into(), "Globex Inc.".into()]),
            "",
        )]);
        form.handle_key(press(KeyCode::Char('g')));
        form.handle_key(press(KeyCode::Right));
        assert_eq!(form.value("Client"), "Globex Inc.");
        form.handle_key(press(KeyCode::Char('!')));
        assert_eq!(form.value("Client"), "Globex Inc.!");
    }

    #[test]
    fn number_field_ignores_letters() {
        let mut form = Form::new(vec![FormField::new("Amount", FieldKind::Number, "")]);
        for c in ['1', 'a', '5', '.', '5'] {
            form.handle_key(press(KeyCode::Char(c)));
        }
        assert_eq!(form.value("Amount"), "15.5");
    }
}
