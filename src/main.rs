// Entrypoint: read configuration, build the two clients and hand them to
// the UI loop.

use agenda_cli::{api::ApiClient, auth::IdentityClient, cli, ui};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = cli::start()?;
    info!(api_url = %config.api_url, auth_url = %config.auth_url, "starting");

    let api = ApiClient::new(&config.api_url)?;
    let auth = IdentityClient::new(&config.auth_url, config.api_key)?;

    // Blocks until the user picks "Exit" on the login screen.
    ui::run(api, &auth)?;
    Ok(())
}
