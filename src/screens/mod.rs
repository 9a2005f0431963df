// Screen view-models and the navigation stack that owns them.
//
// Each screen is a plain struct holding its form state. Submitting a screen
// performs one network action and yields an `Outcome`: an optional alert
// for the user plus the navigation `Transition` to apply. The terminal UI
// renders screens through their `Display` impls and hands outcomes to
// `Navigator::focus`, which also runs the enter hooks.

pub mod contact_list;
pub mod create_contact;
pub mod edit_contact;
pub mod login;
pub mod register;

use crate::api::SessionClient;
use crate::error::{ClientError, ErrorKind};
use std::fmt;
use tracing::{error, info, warn};

pub use contact_list::ContactListScreen;
pub use create_contact::CreateContactScreen;
pub use edit_contact::{EditContactScreen, EditSession};
pub use login::LoginScreen;
pub use register::RegisterScreen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// Message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Alert {
            kind: AlertKind::Success,
            title: "Success".into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Alert {
            kind: AlertKind::Error,
            title: "Error".into(),
            message: message.into(),
        }
    }

    /// Alert for a failed action. Transport failures and service refusals
    /// get distinct titles. This is the only place client failures are logged.
    pub fn from_error(action: &str, err: &ClientError) -> Self {
        let title = match err.kind() {
            ErrorKind::Transport => {
                error!(error = %err, "{action} failed");
                "Connection error"
            }
            ErrorKind::Business => {
                warn!(error = %err, "{action} failed");
                "Error"
            }
        };
        Alert {
            kind: AlertKind::Error,
            title: title.into(),
            message: format!("{action} failed. {}", err.user_message()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == AlertKind::Error
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Navigation requested by a screen.
#[derive(Debug)]
pub enum Transition {
    Stay,
    Push(Route),
    Back,
    Exit,
}

#[derive(Debug)]
pub struct Outcome {
    pub alert: Option<Alert>,
    pub transition: Transition,
}

impl Outcome {
    pub fn stay() -> Self {
        Outcome {
            alert: None,
            transition: Transition::Stay,
        }
    }

    pub fn stay_with(alert: Alert) -> Self {
        Outcome {
            alert: Some(alert),
            transition: Transition::Stay,
        }
    }

    pub fn back() -> Self {
        Outcome {
            alert: None,
            transition: Transition::Back,
        }
    }

    pub fn exit() -> Self {
        Outcome {
            alert: None,
            transition: Transition::Exit,
        }
    }

    pub fn back_with(alert: Alert) -> Self {
        Outcome {
            alert: Some(alert),
            transition: Transition::Back,
        }
    }

    pub fn push(route: Route) -> Self {
        Outcome {
            alert: None,
            transition: Transition::Push(route),
        }
    }
}

/// A navigable screen together with its state.
#[derive(Debug)]
pub enum Route {
    Login(LoginScreen),
    Contacts(ContactListScreen),
    RegisterUser(RegisterScreen),
    CreateContact(CreateContactScreen),
    EditContact(EditContactScreen),
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login(_) => "login",
            Route::Contacts(_) => "contacts",
            Route::RegisterUser(_) => "register-user",
            Route::CreateContact(_) => "create-contact",
            Route::EditContact(_) => "edit-contact",
        }
    }
}

/// Stack of routes. The bottom route is the root and is never popped.
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new(root: Route) -> Self {
        Navigator { stack: vec![root] }
    }

    pub fn current(&self) -> &Route {
        &self.stack[self.stack.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut Route {
        let top = self.stack.len() - 1;
        &mut self.stack[top]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Apply a transition. Returns the route that gained focus, if any;
    /// `focus` runs that route's enter hook.
    pub fn apply(&mut self, transition: Transition) -> Option<&mut Route> {
        match transition {
            Transition::Stay | Transition::Exit => None,
            Transition::Push(route) => {
                tracing::debug!(route = route.name(), "navigate");
                self.stack.push(route);
                Some(self.current_mut())
            }
            Transition::Back => {
                if self.stack.len() == 1 {
                    return None;
                }
                let left = self.stack.pop().map(|r| r.name()).unwrap_or_default();
                tracing::debug!(from = left, to = self.current().name(), "back");
                Some(self.current_mut())
            }
        }
    }

    /// Apply a transition and run the enter hook of the route that gains
    /// focus: the contact list refreshes through `client`, and returning to
    /// login ends the session. Returns the alert raised by the hook, if any.
    pub fn focus(
        &mut self,
        transition: Transition,
        client: &mut dyn SessionClient,
    ) -> Option<Alert> {
        match self.apply(transition) {
            Some(Route::Contacts(list)) => list.on_enter(|| client.list_contacts()),
            Some(Route::Login(_)) => {
                if client.end_session() {
                    info!("logged out");
                }
                None
            }
            _ => None,
        }
    }
}

/// Names of required fields that are blank.
pub(crate) fn missing_fields<'a>(fields: &[(&'a str, &str)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

/// Presence check shared by the form screens.
pub(crate) fn require(fields: &[(&str, &str)]) -> Result<(), Alert> {
    let missing = missing_fields(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Alert::error(format!("Please fill in: {}.", missing.join(", "))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_on_root_is_noop() {
        let mut nav = Navigator::new(Route::Login(LoginScreen::default()));
        assert!(nav.apply(Transition::Back).is_none());
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current().name(), "login");
    }

    #[test]
    fn back_refocuses_previous_route() {
        let mut nav = Navigator::new(Route::Login(LoginScreen::default()));
        let focused = nav.apply(Transition::Push(Route::Contacts(ContactListScreen::default())));
        assert!(matches!(focused, Some(Route::Contacts(_))));

        nav.apply(Transition::Push(Route::CreateContact(
            CreateContactScreen::default(),
        )));
        assert_eq!(nav.depth(), 3);

        let focused = nav.apply(Transition::Back);
        assert!(matches!(focused, Some(Route::Contacts(_))));
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn stay_focuses_nothing() {
        let mut nav = Navigator::new(Route::Login(LoginScreen::default()));
        assert!(nav.apply(Transition::Stay).is_none());
    }

    #[test]
    fn error_alert_title_follows_error_kind() {
        let server = ClientError::Server {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        };
        let alert = Alert::from_error("Loading contacts", &server);
        assert_eq!(alert.title, "Connection error");
        assert!(alert.message.starts_with("Loading contacts failed."));

        let alert = Alert::from_error("Deleting contact", &ClientError::NotFound("contact".into()));
        assert_eq!(alert.title, "Error");
        assert_eq!(alert.message, "Deleting contact failed. The contact no longer exists.");
    }

    #[test]
    fn require_lists_blank_fields() {
        let err = require(&[("name", "  "), ("email", "a@x.com"), ("phone", "")]).unwrap_err();
        assert!(err.is_error());
        assert_eq!(err.message, "Please fill in: name, phone.");
        assert!(require(&[("name", "Ana")]).is_ok());
    }
}
