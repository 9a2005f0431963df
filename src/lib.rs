// Library root
// ------------
// The binary (`main.rs`) wires these modules into the interactive client.
//
// Module responsibilities:
// - `api`: HTTP calls to the contacts service (contacts CRUD, user profiles).
// - `auth`: sign-in and sign-up against the identity provider.
// - `screens`: per-screen view-models and the navigation stack.
// - `ui`: terminal prompts that render screens and apply their outcomes.
// - `cli`: configuration from flags and environment, logging setup.
pub mod api;
pub mod auth;
pub mod cli;
pub mod error;
pub mod model;
pub mod screens;
pub mod ui;

pub use error::{ClientError, ErrorKind};
