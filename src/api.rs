// API client module: a small blocking HTTP client for the contacts service.
// One call per user action, no retries and no caching. Failures are returned,
// not logged; the screen that turns them into alerts logs them once.

use crate::error::ClientError;
use crate::model::{Contact, ContactForm, ContactId, Session, UserProfile};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Contact operations the screens depend on. Implemented by `ApiClient`
/// and by in-memory fakes in tests.
pub trait ContactsApi {
    fn list_contacts(&self) -> Result<Vec<Contact>, ClientError>;
    fn create_contact(&self, form: &ContactForm) -> Result<Contact, ClientError>;
    fn update_contact(&self, id: &ContactId, form: &ContactForm) -> Result<Contact, ClientError>;
    fn delete_contact(&self, id: &ContactId) -> Result<(), ClientError>;
}

/// Contact operations bound to the session they run under.
pub trait SessionClient: ContactsApi {
    /// Drop the current session. Returns whether one was active.
    fn end_session(&mut self) -> bool;
}

/// Where user profiles are written after sign-up.
pub trait UserDirectory {
    fn create_profile(&self, session: &Session, profile: &UserProfile) -> Result<(), ClientError>;
}

/// What a request addresses. A 404 only means "gone" for a single record;
/// on a collection it is the service refusing the route.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Target<'a> {
    Record(&'a str),
    Collection(&'a str),
}

/// Client for the contacts service. Holds the reqwest blocking client,
/// the base URL and the session whose id token authorizes requests.
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder().build().map_err(ClientError::Unreachable)?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Install the session used for subsequent authenticated requests.
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(s) => req.bearer_auth(s.id_token.expose_secret()),
            None => req,
        }
    }

    fn send(&self, req: RequestBuilder, target: Target<'_>) -> Result<Response, ClientError> {
        let res = self
            .authorized(req)
            .send()
            .map_err(ClientError::from_send)?;
        check_status(res, target)
    }
}

/// Turn a non-2xx response into the matching error.
pub(crate) fn check_status(res: Response, target: Target<'_>) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().unwrap_or_default();
    if status.is_server_error() {
        return Err(ClientError::Server { status, body });
    }
    let reason = match target {
        Target::Record(what) if status == StatusCode::NOT_FOUND => {
            return Err(ClientError::NotFound(what.to_string()));
        }
        Target::Collection(what) if status == StatusCode::NOT_FOUND => {
            format!("The service does not provide {what} ({status}).")
        }
        _ if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("request rejected")
            .to_string(),
        _ => body,
    };
    Err(ClientError::Rejected { status, reason })
}

pub(crate) fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    res.json().map_err(ClientError::Decode)
}

impl ContactsApi for ApiClient {
    fn list_contacts(&self) -> Result<Vec<Contact>, ClientError> {
        debug!("GET /contatos");
        let req = self.client.get(self.url("/contatos"));
        let contacts: Vec<Contact> = decode(self.send(req, Target::Collection("contacts"))?)?;
        info!(count = contacts.len(), "contacts loaded");
        Ok(contacts)
    }

    fn create_contact(&self, form: &ContactForm) -> Result<Contact, ClientError> {
        debug!(nome = %form.nome, "POST /contatos");
        let req = self.client.post(self.url("/contatos")).json(form);
        let created: Contact = decode(self.send(req, Target::Collection("contacts"))?)?;
        info!(id = %created.id, "contact created");
        Ok(created)
    }

    fn update_contact(&self, id: &ContactId, form: &ContactForm) -> Result<Contact, ClientError> {
        debug!(%id, "PUT /contatos/{id}");
        let req = self.client.put(self.url(&format!("/contatos/{id}"))).json(form);
        let updated: Contact = decode(self.send(req, Target::Record("contact"))?)?;
        info!(%id, "contact updated");
        Ok(updated)
    }

    fn delete_contact(&self, id: &ContactId) -> Result<(), ClientError> {
        debug!(%id, "DELETE /contatos/{id}");
        let req = self.client.delete(self.url(&format!("/contatos/{id}")));
        self.send(req, Target::Record("contact"))?;
        info!(%id, "contact deleted");
        Ok(())
    }
}

impl SessionClient for ApiClient {
    fn end_session(&mut self) -> bool {
        self.session.take().is_some()
    }
}

impl UserDirectory for ApiClient {
    fn create_profile(&self, session: &Session, profile: &UserProfile) -> Result<(), ClientError> {
        debug!(email = %profile.email, "POST /usuarios");
        let req = self
            .client
            .post(self.url("/usuarios"))
            .bearer_auth(session.id_token.expose_secret())
            .json(profile);
        let res = req.send().map_err(ClientError::from_send)?;
        check_status(res, Target::Collection("user profiles"))?;
        info!(email = %profile.email, "user profile stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let api = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(api.url("/contatos"), "http://localhost:3000/contatos");
        assert!(!api.has_session());
    }

    #[test]
    fn ending_without_session_reports_nothing_to_end() {
        let mut api = ApiClient::new("http://localhost:3000").unwrap();
        assert!(!api.end_session());
    }
}
