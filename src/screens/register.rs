use super::{require, Alert, Outcome};
use crate::api::UserDirectory;
use crate::auth::Authenticator;
use crate::model::{Credentials, Session, UserProfile};
use std::fmt;

/// Registration form. The account is created at the identity provider
/// and the profile (without the password) is stored on the service.
#[derive(Debug, Default)]
pub struct RegisterScreen {
    pub nome: String,
    pub email: String,
    pub cpf: String,
    pub senha: String,
    /// Account already created whose profile write has not succeeded yet.
    pending: Option<Session>,
}

impl RegisterScreen {
    /// True once sign-up succeeded but the profile still has to be stored.
    /// Further submits only retry the profile write.
    pub fn awaiting_profile(&self) -> bool {
        self.pending.is_some()
    }

    pub fn submit(&mut self, auth: &dyn Authenticator, users: &dyn UserDirectory) -> Outcome {
        let password = if self.awaiting_profile() { "-" } else { self.senha.as_str() };
        if let Err(alert) = require(&[
            ("full name", self.nome.as_str()),
            ("email", self.email.as_str()),
            ("CPF", self.cpf.as_str()),
            ("password", password),
        ]) {
            return Outcome::stay_with(alert);
        }

        let session = match self.pending.take() {
            Some(session) => session,
            None => {
                let credentials =
                    Credentials::new(self.email.trim(), std::mem::take(&mut self.senha));
                match auth.sign_up(&credentials, self.nome.trim()) {
                    Ok(session) => session,
                    Err(err) => {
                        return Outcome::stay_with(Alert::from_error("Registration", &err))
                    }
                }
            }
        };

        let profile = UserProfile {
            nome: self.nome.trim().to_string(),
            email: session.email.clone(),
            cpf: self.cpf.trim().to_string(),
        };
        match users.create_profile(&session, &profile) {
            Ok(()) => Outcome::back_with(Alert::success("User registered! You can now log in.")),
            Err(err) => {
                self.pending = Some(session);
                let mut alert = Alert::from_error("Saving your profile", &err);
                alert.message = format!(
                    "Your account was created. {} Submit again to retry.",
                    alert.message
                );
                Outcome::stay_with(alert)
            }
        }
    }
}

impl fmt::Display for RegisterScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== User registration ==")?;
        if let Some(session) = &self.pending {
            writeln!(f, "Account {} created, profile not saved yet.", session.email)?;
        }
        Ok(())
    }
}
