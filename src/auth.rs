// Identity provider client. Sign-in and sign-up are delegated to an
// Identity Toolkit style REST service keyed by a project API key.

use crate::api::{check_status, decode, Target};
use crate::error::ClientError;
use crate::model::{Credentials, Session};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Provider messages that mean the email/password pair was not accepted.
const CREDENTIAL_ERRORS: &[&str] = &[
    "EMAIL_NOT_FOUND",
    "INVALID_PASSWORD",
    "INVALID_LOGIN_CREDENTIALS",
    "USER_DISABLED",
];

/// Exchanges credentials for a session.
pub trait Authenticator {
    fn sign_in(&self, credentials: &Credentials) -> Result<Session, ClientError>;
    fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: &str,
    ) -> Result<Session, ClientError>;
}

pub struct IdentityClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Deserialize)]
struct ProviderError {
    message: String,
}

impl IdentityClient {
    pub fn new(base_url: &str, api_key: SecretString) -> Result<Self, ClientError> {
        let client = Client::builder().build().map_err(ClientError::Unreachable)?;
        Ok(IdentityClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn call(&self, method: &str, body: &PasswordRequest<'_>) -> Result<Session, ClientError> {
        let url = format!("{}/accounts:{method}", self.base_url);
        debug!(email = body.email, "identity provider {method}");
        let res = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(body)
            .send()
            .map_err(ClientError::from_send)?;

        let status = res.status();
        if status.is_client_error() {
            let text = res.text().unwrap_or_default();
            return Err(provider_error(status, &text));
        }
        let resp: PasswordResponse = decode(check_status(res, Target::Collection("accounts"))?)?;
        info!(local_id = %resp.local_id, "identity provider {method} succeeded");
        Ok(Session {
            local_id: resp.local_id,
            email: if resp.email.is_empty() {
                body.email.to_string()
            } else {
                resp.email
            },
            display_name: resp.display_name,
            id_token: SecretString::from(resp.id_token),
        })
    }
}

/// Map a 4xx provider body to a credential or business error.
fn provider_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ProviderErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    // Messages look like "WEAK_PASSWORD : Password should be ...".
    let code = message.split(" : ").next().unwrap_or_default().trim();
    if CREDENTIAL_ERRORS.contains(&code) {
        return ClientError::InvalidCredentials;
    }
    let reason = match code {
        "EMAIL_EXISTS" => "An account with this email already exists.".to_string(),
        "INVALID_EMAIL" => "The email address is not valid.".to_string(),
        "WEAK_PASSWORD" => "The password is too weak.".to_string(),
        _ if message.is_empty() => status.canonical_reason().unwrap_or("rejected").to_string(),
        _ => message,
    };
    ClientError::Rejected { status, reason }
}

impl Authenticator for IdentityClient {
    fn sign_in(&self, credentials: &Credentials) -> Result<Session, ClientError> {
        self.call(
            "signInWithPassword",
            &PasswordRequest {
                email: &credentials.email,
                password: credentials.password.expose_secret(),
                display_name: None,
                return_secure_token: true,
            },
        )
    }

    fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: &str,
    ) -> Result<Session, ClientError> {
        self.call(
            "signUp",
            &PasswordRequest {
                email: &credentials.email,
                password: credentials.password.expose_secret(),
                display_name: Some(display_name),
                return_secure_token: true,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_messages_become_invalid_credentials() {
        let body = r#"{"error":{"code":400,"message":"INVALID_LOGIN_CREDENTIALS","errors":[]}}"#;
        assert!(matches!(
            provider_error(StatusCode::BAD_REQUEST, body),
            ClientError::InvalidCredentials
        ));
    }

    #[test]
    fn weak_password_keeps_business_reason() {
        let body = r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters"}}"#;
        match provider_error(StatusCode::BAD_REQUEST, body) {
            ClientError::Rejected { reason, .. } => assert_eq!(reason, "The password is too weak."),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_body_is_passed_through() {
        match provider_error(StatusCode::FORBIDDEN, "API key not valid") {
            ClientError::Rejected { status, reason } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(reason, "API key not valid");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
