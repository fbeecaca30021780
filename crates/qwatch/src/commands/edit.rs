use clap::ArgMatches;
use tracing::info;

use qwatch_core::QueryForm;

use super::helpers::{self, CliContext};
use crate::color;

/// Read-modify-write: the current query pre-fills the form, flags override it.
pub(crate) fn handle_edit_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let uid = matches
        .get_one::<String>("uid")
        .ok_or("Uid argument is required")?;

    info!(event = "cli.edit_started", uid = %uid);

    let ctx = CliContext::from_matches(matches)?;
    let session = ctx.require_session()?;
    let action = format!("edit query '{}'", uid);

    let message = helpers::block_on(async {
        let current = ctx.client.query(&session, uid).await?;
        let mut form = QueryForm::from(&current);
        helpers::apply_form_args(&mut form, matches);
        ctx.client.edit_query(&session, &form).await
    })?
    .map_err(|e| helpers::report_api_error(&action, "cli.edit_failed", e))?;

    println!("✅ Updated query {}", color::sky(uid));
    if !message.is_empty() {
        println!("   {}", color::muted(&message));
    }

    info!(event = "cli.edit_completed", uid = %uid);
    Ok(())
}
