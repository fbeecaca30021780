use clap::ArgMatches;
use tracing::{error, info};

use super::helpers::{self, CliContext};
use crate::color;

pub(crate) fn handle_ping_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CliContext::from_matches(matches)?;
    let server = ctx.client.base_url().to_string();

    info!(event = "cli.ping_started", server = %server);

    let up = helpers::block_on(ctx.client.ping())?
        .map_err(|e| helpers::report_api_error("reach the backend", "cli.ping_failed", e))?;

    if !up {
        eprintln!(
            "{}",
            color::error(&format!("❌ Backend at {} answered but is not ready", server))
        );
        error!(event = "cli.ping_failed", server = %server, error = "not ready");
        return Err("Backend not ready".into());
    }

    println!("✅ Backend at {} is up", color::sky(&server));
    info!(event = "cli.ping_completed", server = %server);
    Ok(())
}
