use clap::ArgMatches;
use tracing::{error, info};

use qwatch_core::QwatchPaths;
use qwatch_core::auth::persistence;

use crate::color;

pub(crate) fn handle_logout_command(
    _matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.logout_started");

    let paths = QwatchPaths::resolve()?;
    match persistence::clear_session(&paths) {
        Ok(true) => {
            println!("✅ Logged out");
            info!(event = "cli.logout_completed", removed = true);
            Ok(())
        }
        Ok(false) => {
            println!("Not logged in.");
            info!(event = "cli.logout_completed", removed = false);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", color::error(&format!("❌ Failed to log out: {}", e)));
            error!(event = "cli.logout_failed", error = %e);
            Err(e.into())
        }
    }
}
