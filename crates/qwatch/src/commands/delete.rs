use clap::ArgMatches;
use tracing::info;

use super::helpers::{self, CliContext};
use crate::color;

pub(crate) fn handle_delete_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let uid = matches
        .get_one::<String>("uid")
        .ok_or("Uid argument is required")?;

    info!(event = "cli.delete_started", uid = %uid);

    let ctx = CliContext::from_matches(matches)?;
    let session = ctx.require_session()?;
    helpers::block_on(ctx.client.delete_query(&session, uid))?.map_err(|e| {
        helpers::report_api_error(&format!("delete query '{}'", uid), "cli.delete_failed", e)
    })?;

    println!("✅ Deleted query {}", color::sky(uid));
    info!(event = "cli.delete_completed", uid = %uid);
    Ok(())
}
