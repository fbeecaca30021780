use clap::ArgMatches;
use tracing::info;

use qwatch_core::QueryForm;

use super::helpers::{self, CliContext};
use crate::color;

pub(crate) fn handle_add_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut form = QueryForm::default();
    helpers::apply_form_args(&mut form, matches);

    info!(event = "cli.add_started", url = %form.url, alias = %form.alias);

    let ctx = CliContext::from_matches(matches)?;
    let session = ctx.require_session()?;
    let message = helpers::block_on(ctx.client.add_query(&session, &form))?
        .map_err(|e| helpers::report_api_error("add query", "cli.add_failed", e))?;

    let name = if form.alias.is_empty() { &form.url } else { &form.alias };
    println!("✅ Added query {}", color::sky(name));
    if !message.is_empty() {
        println!("   {}", color::muted(&message));
    }

    info!(event = "cli.add_completed", url = %form.url);
    Ok(())
}
