// Error types shared by the API and identity clients. Screens turn these
// into alerts, so every variant must carry enough to explain itself.

use reqwest::StatusCode;
use thiserror::Error;

/// Broad classification used to pick the alert shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server could not be reached or misbehaved.
    Transport,
    /// The server answered and refused the request.
    Business,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("could not reach server: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("server error {status}: {body}")]
    Server { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(String),

    #[error("request rejected ({status}): {reason}")]
    Rejected { status: StatusCode, reason: String },
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Unreachable(_) | ClientError::Server { .. } | ClientError::Decode(_) => {
                ErrorKind::Transport
            }
            ClientError::InvalidCredentials
            | ClientError::NotFound(_)
            | ClientError::Rejected { .. } => ErrorKind::Business,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// Message suitable for an alert body.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Unreachable(_) => {
                "Could not reach the server. Check your connection and try again.".into()
            }
            ClientError::Server { status, .. } => {
                format!("The server failed to handle the request ({status}). Try again later.")
            }
            ClientError::Decode(_) => "The server sent a response we could not read.".into(),
            ClientError::InvalidCredentials => "Incorrect email or password.".into(),
            ClientError::NotFound(what) => format!("The {what} no longer exists."),
            ClientError::Rejected { reason, .. } => reason.clone(),
        }
    }

    /// Map a send failure. Body decoding errors are reported separately.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err)
        } else {
            ClientError::Unreachable(err)
        }
    }
}
