use clap::ArgMatches;
use tracing::info;

use super::helpers::{self, CliContext};
use crate::color;

pub(crate) fn handle_clean_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.clean_started");

    let ctx = CliContext::from_matches(matches)?;
    let session = ctx.require_session()?;
    let message = helpers::block_on(ctx.client.clean(&session))?
        .map_err(|e| helpers::report_api_error("clean queries", "cli.clean_failed", e))?;

    println!("✅ Finished queries removed");
    if !message.is_empty() {
        println!("   {}", color::muted(&message));
    }

    info!(event = "cli.clean_completed");
    Ok(())
}
