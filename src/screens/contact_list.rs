use super::{Alert, CreateContactScreen, EditContactScreen, EditSession, Outcome, Route};
use crate::error::ClientError;
use crate::model::Contact;
use std::fmt;

/// Contact list view-model. Its contents are only ever replaced wholesale
/// by a successful refresh.
#[derive(Debug, Default)]
pub struct ContactListScreen {
    contacts: Vec<Contact>,
    loaded: bool,
}

impl ContactListScreen {
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Screen-enter hook, run every time the list gains focus. The refresh
    /// callback is injected so callers decide where contacts come from.
    pub fn on_enter<F>(&mut self, refresh: F) -> Option<Alert>
    where
        F: FnOnce() -> Result<Vec<Contact>, ClientError>,
    {
        match refresh() {
            Ok(contacts) => {
                self.contacts = contacts;
                self.loaded = true;
                None
            }
            Err(err) => Some(Alert::from_error("Loading contacts", &err)),
        }
    }

    /// Open the edit screen on a copy of the contact at `index`.
    pub fn open(&self, index: usize) -> Outcome {
        match self.contacts.get(index) {
            Some(contact) => Outcome::push(Route::EditContact(EditContactScreen::new(
                EditSession::new(contact.clone()),
            ))),
            None => Outcome::stay(),
        }
    }

    pub fn add(&self) -> Outcome {
        Outcome::push(Route::CreateContact(CreateContactScreen::default()))
    }
}

impl fmt::Display for ContactListScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Contacts ==")?;
        if !self.loaded {
            return writeln!(f, "(not loaded)");
        }
        if self.contacts.is_empty() {
            return writeln!(f, "(no contacts yet)");
        }
        for contact in &self.contacts {
            writeln!(f, "{:<24} {}", contact.nome, contact.telefone)?;
        }
        Ok(())
    }
}
