// In-memory stand-ins for the contacts service and the identity provider.

#![allow(dead_code)]

use agenda_cli::api::{ContactsApi, SessionClient, UserDirectory};
use agenda_cli::auth::Authenticator;
use agenda_cli::model::{Contact, ContactForm, ContactId, Credentials, Session, UserProfile};
use agenda_cli::ClientError;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use std::cell::{Cell, RefCell};

#[derive(Default)]
pub struct FakeService {
    contacts: RefCell<Vec<Contact>>,
    next_id: Cell<u64>,
    users: RefCell<Vec<(String, String)>>,
    pub profiles: RefCell<Vec<UserProfile>>,
    pub calls: Cell<usize>,
    pub offline: Cell<bool>,
    pub signed_in: Cell<bool>,
}

impl FakeService {
    pub fn with_user(email: &str, password: &str) -> Self {
        let svc = FakeService::default();
        svc.users
            .borrow_mut()
            .push((email.to_string(), password.to_string()));
        svc
    }

    pub fn seed(&self, form: ContactForm) -> Contact {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let contact = Contact {
            id: ContactId::new(id.to_string()),
            nome: form.nome,
            email: form.email,
            telefone: form.telefone,
        };
        self.contacts.borrow_mut().push(contact.clone());
        contact
    }

    fn enter(&self) -> Result<(), ClientError> {
        self.calls.set(self.calls.get() + 1);
        if self.offline.get() {
            return Err(ClientError::Server {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: String::new(),
            });
        }
        Ok(())
    }
}

pub fn form(nome: &str, email: &str, telefone: &str) -> ContactForm {
    ContactForm {
        nome: nome.into(),
        email: email.into(),
        telefone: telefone.into(),
    }
}

pub fn session(email: &str) -> Session {
    Session {
        local_id: format!("uid-{email}"),
        email: email.to_string(),
        display_name: None,
        id_token: SecretString::from("test-token".to_string()),
    }
}

impl ContactsApi for FakeService {
    fn list_contacts(&self) -> Result<Vec<Contact>, ClientError> {
        self.enter()?;
        Ok(self.contacts.borrow().clone())
    }

    fn create_contact(&self, form: &ContactForm) -> Result<Contact, ClientError> {
        self.enter()?;
        Ok(self.seed(form.clone()))
    }

    fn update_contact(&self, id: &ContactId, form: &ContactForm) -> Result<Contact, ClientError> {
        self.enter()?;
        let mut contacts = self.contacts.borrow_mut();
        let contact = contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| ClientError::NotFound("contact".into()))?;
        contact.nome = form.nome.clone();
        contact.email = form.email.clone();
        contact.telefone = form.telefone.clone();
        Ok(contact.clone())
    }

    fn delete_contact(&self, id: &ContactId) -> Result<(), ClientError> {
        self.enter()?;
        let mut contacts = self.contacts.borrow_mut();
        let before = contacts.len();
        contacts.retain(|c| &c.id != id);
        if contacts.len() == before {
            return Err(ClientError::NotFound("contact".into()));
        }
        Ok(())
    }
}

impl SessionClient for FakeService {
    fn end_session(&mut self) -> bool {
        self.signed_in.replace(false)
    }
}

impl Authenticator for FakeService {
    fn sign_in(&self, credentials: &Credentials) -> Result<Session, ClientError> {
        self.enter()?;
        let known = self.users.borrow().iter().any(|(email, password)| {
            *email == credentials.email && password == credentials.password.expose_secret()
        });
        if known {
            self.signed_in.set(true);
            Ok(session(&credentials.email))
        } else {
            Err(ClientError::InvalidCredentials)
        }
    }

    fn sign_up(&self, credentials: &Credentials, display_name: &str) -> Result<Session, ClientError> {
        self.enter()?;
        if self.users.borrow().iter().any(|(email, _)| *email == credentials.email) {
            return Err(ClientError::Rejected {
                status: StatusCode::BAD_REQUEST,
                reason: "An account with this email already exists.".into(),
            });
        }
        self.users.borrow_mut().push((
            credentials.email.clone(),
            credentials.password.expose_secret().to_string(),
        ));
        let mut session = session(&credentials.email);
        session.display_name = Some(display_name.to_string());
        Ok(session)
    }
}

impl UserDirectory for FakeService {
    fn create_profile(&self, _session: &Session, profile: &UserProfile) -> Result<(), ClientError> {
        self.enter()?;
        self.profiles.borrow_mut().push(profile.clone());
        Ok(())
    }
}

/// Base URL on which nothing is listening.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
