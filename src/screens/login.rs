use super::{require, Alert, ContactListScreen, Outcome, RegisterScreen, Route};
use crate::auth::Authenticator;
use crate::model::{Credentials, Session};
use std::fmt;

#[derive(Debug, Default)]
pub struct LoginScreen {
    pub email: String,
    pub password: String,
}

impl LoginScreen {
    /// Exchange the entered credentials for a session. On success the
    /// contact list is pushed; any failure keeps the user here.
    pub fn submit(&mut self, auth: &dyn Authenticator) -> (Outcome, Option<Session>) {
        if let Err(alert) = require(&[
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
        ]) {
            return (Outcome::stay_with(alert), None);
        }
        let credentials = Credentials::new(self.email.trim(), std::mem::take(&mut self.password));
        match auth.sign_in(&credentials) {
            Ok(session) => (
                Outcome::push(Route::Contacts(ContactListScreen::default())),
                Some(session),
            ),
            Err(err) => (Outcome::stay_with(Alert::from_error("Login", &err)), None),
        }
    }

    pub fn register(&self) -> Outcome {
        Outcome::push(Route::RegisterUser(RegisterScreen::default()))
    }
}

impl fmt::Display for LoginScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Login ==")?;
        if !self.email.is_empty() {
            writeln!(f, "E-mail: {}", self.email)?;
        }
        Ok(())
    }
}
