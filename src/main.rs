// Entrypoint for the CLI application.
// - Keeps `main` small: read the device endpoint, build the RESTCONF
//   client and hand it to the UI loop.
// - Returns `anyhow::Result` to simplify error handling.

use dialoguer::Password;
use iosxe_cli::api::{DeviceConfig, RestconfClient};
use iosxe_cli::ui::main_menu;

fn main() -> anyhow::Result<()> {
    // Device host and credentials come from IOSXE_* environment variables.
    // See `api::DeviceConfig::from_env`.
    let mut config = DeviceConfig::from_env()?;
    if config.password.is_empty() {
        config.password = Password::new()
            .with_prompt(format!("Password for {}@{}", config.username, config.host))
            .interact()?;
    }

    let api = RestconfClient::new(&config)?;

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(api)?;
    Ok(())
}
