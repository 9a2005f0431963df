// Records exchanged with the contacts service and the identity provider.
// Field names follow the service's wire format (Portuguese keys).

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Service-assigned contact identifier. The service may hand it out as a
/// JSON number or a string, so it is kept as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactId(String);

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        ContactId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => ContactId(n.to_string()),
            Raw::Text(s) => ContactId(s),
        })
    }
}

/// A contact as returned by the service.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefone: String,
}

impl Contact {
    /// Editable fields of this record.
    pub fn form(&self) -> ContactForm {
        ContactForm {
            nome: self.nome.clone(),
            email: self.email.clone(),
            telefone: self.telefone.clone(),
        }
    }

    pub fn matches(&self, form: &ContactForm) -> bool {
        self.nome == form.nome && self.email == form.email && self.telefone == form.telefone
    }
}

/// Body sent on create and update.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub nome: String,
    pub email: String,
    pub telefone: String,
}

/// Profile stored on the contacts service after sign-up. The password is
/// owned by the identity provider and never sent here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub nome: String,
    pub email: String,
    pub cpf: String,
}

/// Email and password captured by the login and registration screens.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Authenticated session issued by the identity provider.
#[derive(Debug)]
pub struct Session {
    pub local_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub id_token: SecretString,
}

impl Session {
    /// Name to greet the user with.
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_id_accepts_number_or_string() {
        let numeric: Contact =
            serde_json::from_str(r#"{"id":7,"nome":"Ana","email":"a@x.com","telefone":"1"}"#)
                .unwrap();
        assert_eq!(numeric.id.as_str(), "7");

        let text: Contact = serde_json::from_str(r#"{"id":"a1b2","nome":"Bia"}"#).unwrap();
        assert_eq!(text.id, ContactId::new("a1b2"));
        assert_eq!(text.telefone, "");
    }

    #[test]
    fn greeting_falls_back_to_email() {
        let session = Session {
            local_id: "u1".into(),
            email: "ana@x.com".into(),
            display_name: Some(String::new()),
            id_token: SecretString::from("t".to_string()),
        };
        assert_eq!(session.greeting_name(), "ana@x.com");
    }
}
