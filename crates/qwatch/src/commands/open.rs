use clap::ArgMatches;
use tracing::{error, info};

use super::helpers::{self, CliContext};
use crate::color;

pub(crate) fn handle_open_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let uid = matches
        .get_one::<String>("uid")
        .ok_or("Uid argument is required")?;

    info!(event = "cli.open_started", uid = %uid);

    let ctx = CliContext::from_matches(matches)?;
    let session = ctx.require_session()?;
    let query = helpers::block_on(ctx.client.query(&session, uid))?.map_err(|e| {
        helpers::report_api_error(&format!("look up query '{}'", uid), "cli.open_failed", e)
    })?;

    let target = query.target_url();
    if target.is_empty() {
        eprintln!("{}", color::error(&format!("❌ Query '{}' has no URL", uid)));
        error!(event = "cli.open_failed", uid = %uid, error = "no url");
        return Err(format!("Query '{}' has no URL", uid).into());
    }

    if let Err(e) = open::that(target) {
        eprintln!("{}", color::error(&format!("❌ Failed to open {}: {}", target, e)));
        error!(event = "cli.open_failed", uid = %uid, error = %e);
        return Err(e.into());
    }

    println!("✅ Opened {}", color::sky(target));
    info!(event = "cli.open_completed", uid = %uid, url = target);
    Ok(())
}
