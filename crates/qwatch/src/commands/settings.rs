use clap::ArgMatches;
use tracing::info;

use qwatch_core::{ApiError, Settings};

use super::helpers::{self, CliContext};
use crate::color;

/// Without flags, prints the settings. With flags, updates only what was given.
pub(crate) fn handle_settings_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let autosave = matches.get_one::<bool>("autosave").copied();
    let notes = matches.get_one::<String>("notes").cloned();
    let updating = autosave.is_some() || notes.is_some();

    info!(event = "cli.settings_started", updating = updating);

    let ctx = CliContext::from_matches(matches)?;
    let session = ctx.require_session()?;

    let settings = helpers::block_on(async {
        let mut settings = ctx.client.settings(&session).await?;
        if updating {
            apply(&mut settings, autosave, notes);
            ctx.client.update_settings(&session, &settings).await?;
        }
        Ok::<_, ApiError>(settings)
    })?
    .map_err(|e| helpers::report_api_error("update settings", "cli.settings_failed", e))?;

    if updating {
        println!("✅ Settings updated");
    }
    println!("{} {}", color::muted("Autosave:"), settings.autosave);
    let notes = if settings.notes.is_empty() { "-" } else { &settings.notes };
    println!("{} {}", color::muted("Notes:   "), notes);

    info!(event = "cli.settings_completed", updating = updating);
    Ok(())
}

fn apply(settings: &mut Settings, autosave: Option<bool>, notes: Option<String>) {
    if let Some(autosave) = autosave {
        settings.autosave = autosave;
    }
    if let Some(notes) = notes {
        settings.notes = notes;
    }
}
