// UI layer: drives the navigator with `dialoguer` prompts. Each screen's
// view-model is rendered, the user picks an action, and the resulting
// outcome (alert + transition) is applied.

use crate::api::{ApiClient, ContactsApi};
use crate::auth::Authenticator;
use crate::model::ContactForm;
use crate::screens::{
    Alert, AlertKind, ContactListScreen, CreateContactScreen, EditContactScreen, LoginScreen,
    Navigator, Outcome, RegisterScreen, Route, Transition,
};
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Main loop. Starts on the login screen and runs until the user exits.
pub fn run(mut api: ApiClient, auth: &dyn Authenticator) -> Result<()> {
    let mut nav = Navigator::new(Route::Login(LoginScreen::default()));
    loop {
        println!();
        let outcome = match nav.current_mut() {
            Route::Login(screen) => handle_login(screen, &mut api, auth)?,
            Route::Contacts(screen) => handle_contacts(screen, &api)?,
            Route::RegisterUser(screen) => handle_register(screen, &api, auth)?,
            Route::CreateContact(screen) => handle_create(screen, &api)?,
            Route::EditContact(screen) => handle_edit(screen, &api)?,
        };

        if let Some(alert) = &outcome.alert {
            show_alert(alert);
        }
        if matches!(outcome.transition, Transition::Exit) {
            break;
        }

        let alert = with_spinner("Loading...", || nav.focus(outcome.transition, &mut api))?;
        if let Some(alert) = alert {
            show_alert(&alert);
        }
    }
    Ok(())
}

fn handle_login(
    screen: &mut LoginScreen,
    api: &mut ApiClient,
    auth: &dyn Authenticator,
) -> Result<Outcome> {
    print!("{screen}");
    let items = ["Log in", "Create an account", "Exit"];
    match Select::new().items(&items).default(0).interact()? {
        0 => {
            screen.email = text("E-mail", &screen.email)?;
            screen.password = Password::new()
                .with_prompt("Password")
                .allow_empty_password(true)
                .interact()?;
            let (outcome, session) = with_spinner("Logging in...", || screen.submit(auth))?;
            if let Some(session) = session {
                println!("Welcome {}!", session.greeting_name());
                api.set_session(session);
            }
            Ok(outcome)
        }
        1 => Ok(screen.register()),
        _ => Ok(Outcome::exit()),
    }
}

fn handle_contacts(screen: &mut ContactListScreen, api: &ApiClient) -> Result<Outcome> {
    print!("{screen}");
    let items = ["Open contact", "Add contact", "Refresh", "Log out"];
    match Select::new().items(&items).default(0).interact()? {
        0 => {
            if screen.contacts().is_empty() {
                return Ok(Outcome::stay());
            }
            let names: Vec<String> = screen
                .contacts()
                .iter()
                .map(|c| format!("{} ({})", c.nome, c.telefone))
                .collect();
            let index = Select::new().items(&names).default(0).interact()?;
            Ok(screen.open(index))
        }
        1 => Ok(screen.add()),
        2 => {
            let alert = with_spinner("Loading contacts...", || {
                screen.on_enter(|| api.list_contacts())
            })?;
            Ok(alert.map_or_else(Outcome::stay, Outcome::stay_with))
        }
        _ => Ok(Outcome::back()),
    }
}

fn handle_register(
    screen: &mut RegisterScreen,
    api: &ApiClient,
    auth: &dyn Authenticator,
) -> Result<Outcome> {
    print!("{screen}");
    let items = ["Fill in and submit", "Back"];
    if Select::new().items(&items).default(0).interact()? != 0 {
        return Ok(Outcome::back());
    }
    screen.nome = text("Full name", &screen.nome)?;
    screen.email = text("E-mail", &screen.email)?;
    screen.cpf = text("CPF", &screen.cpf)?;
    if !screen.awaiting_profile() {
        screen.senha = Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .allow_empty_password(true)
            .interact()?;
    }
    with_spinner("Registering...", || screen.submit(auth, api))
}

fn handle_create(screen: &mut CreateContactScreen, api: &ApiClient) -> Result<Outcome> {
    print!("{screen}");
    let items = ["Fill in and save", "Back"];
    if Select::new().items(&items).default(0).interact()? != 0 {
        return Ok(Outcome::back());
    }
    screen.form = contact_form(&screen.form)?;
    with_spinner("Saving...", || screen.submit(api))
}

fn handle_edit(screen: &mut EditContactScreen, api: &ApiClient) -> Result<Outcome> {
    print!("{screen}");
    let items = ["Edit and save", "Delete", "Back"];
    match Select::new().items(&items).default(0).interact()? {
        0 => {
            let draft = contact_form(screen.session().draft())?;
            screen.session_mut().set_draft(draft);
            with_spinner("Saving...", || screen.save(api))
        }
        1 => {
            let prompt = format!("Delete {}?", screen.session().original().nome);
            if !Confirm::new().with_prompt(prompt).default(false).interact()? {
                return Ok(Outcome::stay());
            }
            with_spinner("Deleting...", || screen.delete(api))
        }
        _ => Ok(Outcome::back()),
    }
}

fn contact_form(current: &ContactForm) -> Result<ContactForm> {
    Ok(ContactForm {
        nome: text("Name", &current.nome)?,
        email: text("E-mail", &current.email)?,
        telefone: text("Phone", &current.telefone)?,
    })
}

/// Prompt for a line of text, pre-filled with the current value.
fn text(prompt: &str, initial: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn show_alert(alert: &Alert) {
    let title = match alert.kind {
        AlertKind::Success => alert.title.as_str().green().bold(),
        AlertKind::Error => alert.title.as_str().red().bold(),
    };
    println!("{title}: {}", alert.message);
}

/// Show a spinner while `f` runs a request.
fn with_spinner<T>(message: &'static str, f: impl FnOnce() -> T) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    let out = f();
    spinner.finish_and_clear();
    Ok(out)
}
