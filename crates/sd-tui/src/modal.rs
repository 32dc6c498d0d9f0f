//! Form and confirmation dialogs. Each open dialog owns exactly one intent,
//! which is dropped when the dialog closes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use sd_core::{EntityKind, RecordId};

use crate::input::Form;

/// What saving a form dialog does.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FormIntent {
    Add(EntityKind),
    Edit(EntityKind, RecordId),
    AddEvent,
    EventDetails(RecordId),
    AddLocation { latitude: f64, longitude: f64 },
    Settings,
    UploadPicture,
}

/// What answering a confirmation dialog does.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ConfirmIntent {
    Delete(EntityKind, RecordId),
    DeleteEvent(RecordId),
    AddLocationHere { latitude: f64, longitude: f64 },
    ClearLocations,
    /// Informational message; the answer is ignored.
    Notice,
}

#[derive(Debug, Clone)]
pub(crate) struct FormDialog {
    pub(crate) title: String,
    /// Read-only text shown above the fields.
    pub(crate) body: Option<String>,
    pub(crate) form: Form,
    pub(crate) intent: FormIntent,
    pub(crate) allows_delete: bool,
}

impl FormDialog {
    pub(crate) fn new(title: impl Into<String>, form: Form, intent: FormIntent) -> Self {
        Self {
            title: title.into(),
            body: None,
            form,
            intent,
            allows_delete: false,
        }
    }

    pub(crate) fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub(crate) fn with_delete(mut self) -> Self {
        self.allows_delete = true;
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ConfirmDialog {
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) intent: ConfirmIntent,
}

impl ConfirmDialog {
    pub(crate) fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        intent: ConfirmIntent,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            intent,
        }
    }

    pub(crate) fn notice(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, ConfirmIntent::Notice)
    }

    pub(crate) fn is_notice(&self) -> bool {
        self.intent == ConfirmIntent::Notice
    }
}

/// Result of a key pressed while a form dialog has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormOutcome {
    Pending,
    Save,
    Delete,
    Cancelled,
}

/// Holds at most one form dialog and one confirmation dialog stacked above it.
#[derive(Debug, Default)]
pub(crate) struct ModalHost {
    form: Option<FormDialog>,
    confirm: Option<ConfirmDialog>,
}

impl ModalHost {
    /// Show a form dialog, replacing any open one and its intent.
    pub(crate) fn open(&mut self, dialog: FormDialog) {
        self.form = Some(dialog);
    }

    pub(crate) fn close(&mut self) {
        self.form = None;
    }

    /// Show a confirmation dialog above whatever is open.
    pub(crate) fn confirm(&mut self, dialog: ConfirmDialog) {
        self.confirm = Some(dialog);
    }

    pub(crate) fn form(&self) -> Option<&FormDialog> {
        self.form.as_ref()
    }

    pub(crate) fn form_mut(&mut self) -> Option<&mut FormDialog> {
        self.form.as_mut()
    }

    pub(crate) fn confirm_dialog(&self) -> Option<&ConfirmDialog> {
        self.confirm.as_ref()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.form.is_some() || self.confirm.is_some()
    }

    /// Answer the confirmation dialog from a key press. Returns its intent and
    /// the answer once resolved; Esc counts as Cancel.
    pub(crate) fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<(ConfirmIntent, bool)> {
        let dialog = self.confirm.as_ref()?;
        let answer = if dialog.is_notice() {
            match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ' | 'y' | 'Y') => true,
                _ => return None,
            }
        } else {
            match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => true,
                KeyCode::Char('n' | 'N') | KeyCode::Esc => false,
                _ => return None,
            }
        };
        self.confirm.take().map(|dialog| (dialog.intent, answer))
    }

    /// Route a key to the open form dialog. Cancel closes it without saving.
    pub(crate) fn handle_form_key(&mut self, key: KeyEvent) -> FormOutcome {
        if self.form.is_some() && key.code == KeyCode::Esc {
            self.form = None;
            return FormOutcome::Cancelled;
        }
        let Some(dialog) = self.form.as_mut() else {
            return FormOutcome::Pending;
        };
        let save_chord =
            key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s');
        match key.code {
            KeyCode::Enter => FormOutcome::Save,
            _ if save_chord => FormOutcome::Save,
            KeyCode::Char('d') | KeyCode::Delete
                if dialog.allows_delete && dialog.form.is_empty() =>
            {
                FormOutcome::Delete
            }
            _ => {
                dialog.form.handle_key(key);
                FormOutcome::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::FormField;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn delete_intent() -> ConfirmIntent {
        ConfirmIntent::Delete(EntityKind::Client, RecordId::from("cli_001"))
    }

    #[test]
    fn escape_on_confirmation_resolves_false() {
        let mut host = ModalHost::default();
        host.confirm(ConfirmDialog::new("Delete Client", "Sure?", delete_intent()));
        assert_eq!(host.handle_confirm_key(press(KeyCode::Char('x'))), None);
        let resolved = host.handle_confirm_key(press(KeyCode::Esc));
        assert_eq!(resolved, Some((delete_intent(), false)));
        assert!(host.confirm_dialog().is_none());
    }

    #[test]
    fn confirmation_resolves_once() {
        let mut host = ModalHost::default();
        host.confirm(ConfirmDialog::new("Delete Client", "Sure?", delete_intent()));
        assert_eq!(
            host.handle_confirm_key(press(KeyCode::Char('y'))),
            Some((delete_intent(), true))
        );
        assert_eq!(host.handle_confirm_key(press(KeyCode::Char('y'))), None);
    }

    #[test]
    fn reopening_replaces_previous_intent() {
        let mut host = ModalHost::default();
        let form = Form::new(vec![FormField::text("Service Name", "")]);
        host.open(FormDialog::new("Add Service", form.clone(), FormIntent::Add(EntityKind::Service)));
        host.open(FormDialog::new(
            "Edit Service",
            form,
            FormIntent::Edit(EntityKind::Service, RecordId::from("serv_001")),
        ));
        let intent = host.form().map(|dialog| dialog.intent.clone());
        assert_eq!(
            intent,
            Some(FormIntent::Edit(EntityKind::Service, RecordId::from("serv_001")))
        );
    }

    #[test]
    fn escape_on_form_cancels_without_save() {
        let mut host = ModalHost::default();
        let form = Form::new(vec![FormField::text("Service Name", "")]);
        host.open(FormDialog::new("Add Service", form, FormIntent::Add(EntityKind::Service)));
        assert_eq!(host.handle_form_key(press(KeyCode::Char('a'))), FormOutcome::Pending);
        assert_eq!(host.handle_form_key(press(KeyCode::Esc)), FormOutcome::Cancelled);
        assert!(!host.is_open());
    }

    #[test]
    fn details_dialog_offers_delete() {
        let mut host = ModalHost::default();
        host.open(
            FormDialog::new("Team Meeting", Form::default(), FormIntent::EventDetails("event_001".into()))
                .with_body("Start: 2025-08-20 10:00")
                .with_delete(),
        );
        assert_eq!(host.handle_form_key(press(KeyCode::Char('d'))), FormOutcome::Delete);
        assert!(host.form().is_some());
    }
}
