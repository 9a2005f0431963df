use super::{require, Alert, Outcome};
use crate::api::ContactsApi;
use crate::model::{Contact, ContactForm};
use std::fmt;

/// Editing state for one contact: the record as it was when the edit
/// screen opened, the working draft and whether the draft differs.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    original: Contact,
    draft: ContactForm,
    dirty: bool,
}

impl EditSession {
    pub fn new(original: Contact) -> Self {
        let draft = original.form();
        EditSession {
            original,
            draft,
            dirty: false,
        }
    }

    pub fn original(&self) -> &Contact {
        &self.original
    }

    pub fn draft(&self) -> &ContactForm {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the draft; the dirty flag tracks whether it still matches
    /// the original record.
    pub fn set_draft(&mut self, draft: ContactForm) {
        self.dirty = !self.original.matches(&draft);
        self.draft = draft;
    }
}

#[derive(Debug)]
pub struct EditContactScreen {
    session: EditSession,
}

impl EditContactScreen {
    pub fn new(session: EditSession) -> Self {
        EditContactScreen { session }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    /// PUT the draft. A clean session has nothing to send and just returns.
    pub fn save(&self, api: &dyn ContactsApi) -> Outcome {
        if !self.session.is_dirty() {
            return Outcome::back();
        }
        if let Err(alert) = require(&[("name", self.session.draft.nome.as_str())]) {
            return Outcome::stay_with(alert);
        }
        match api.update_contact(&self.session.original.id, &self.session.draft) {
            Ok(_) => Outcome::back_with(Alert::success("Contact updated!")),
            Err(err) => Outcome::stay_with(Alert::from_error("Updating contact", &err)),
        }
    }

    pub fn delete(&self, api: &dyn ContactsApi) -> Outcome {
        match api.delete_contact(&self.session.original.id) {
            Ok(()) => Outcome::back_with(Alert::success("Contact deleted!")),
            Err(err) => Outcome::stay_with(Alert::from_error("Deleting contact", &err)),
        }
    }
}

impl fmt::Display for EditContactScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let draft = &self.session.draft;
        writeln!(f, "== Edit contact ==")?;
        writeln!(f, "Name:   {}", draft.nome)?;
        writeln!(f, "E-mail: {}", draft.email)?;
        writeln!(f, "Phone:  {}", draft.telefone)?;
        if self.session.dirty {
            writeln!(f, "(unsaved changes)")?;
        }
        Ok(())
    }
}
