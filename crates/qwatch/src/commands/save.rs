use clap::ArgMatches;
use tracing::info;

use super::helpers::{self, CliContext};
use crate::color;

pub(crate) fn handle_save_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.save_started");

    let ctx = CliContext::from_matches(matches)?;
    let session = ctx.require_session()?;
    let message = helpers::block_on(ctx.client.save(&session))?
        .map_err(|e| helpers::report_api_error("save queries", "cli.save_failed", e))?;

    println!("✅ Queries saved");
    if !message.is_empty() {
        println!("   {}", color::muted(&message));
    }

    info!(event = "cli.save_completed");
    Ok(())
}
