use clap::ArgMatches;
use tracing::info;

use qwatch_core::QuerySnapshot;
use qwatch_core::notify;

use super::helpers::{self, CliContext};
use crate::color;

pub(crate) fn handle_show_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let uid = matches
        .get_one::<String>("uid")
        .ok_or("Uid argument is required")?;
    let json_output = matches.get_flag("json");

    info!(event = "cli.show_started", uid = %uid);

    let ctx = CliContext::from_matches(matches)?;
    let session = ctx.require_session()?;
    let query = helpers::block_on(ctx.client.query(&session, uid))?.map_err(|e| {
        helpers::report_api_error(&format!("show query '{}'", uid), "cli.show_failed", e)
    })?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&query)?);
    } else {
        for (label, value) in detail_lines(&query) {
            println!("{} {}", color::muted(&format!("{label:<14}")), value);
        }
    }

    info!(event = "cli.show_completed", uid = %uid);
    Ok(())
}

fn detail_lines(query: &QuerySnapshot) -> Vec<(&'static str, String)> {
    let notification = notify::evaluate_query(query);
    let or_dash = |s: String| if s.is_empty() { "-".to_string() } else { s };
    let opt = |v: Option<i64>| v.map_or("-".to_string(), |n| n.to_string());

    vec![
        ("Uid", color::sky(&query.uid)),
        ("Name", color::sky(query.display_name())),
        ("URL", query.url.clone()),
        ("Target URL", query.target_url().to_string()),
        ("Status", color::status(query.status, query.status.label())),
        ("Found", format!("{} {}", query.found, notification.glyph).trim_end().to_string()),
        ("Recurring", query.is_recurring.to_string()),
        ("Disabled", query.is_disabled().to_string()),
        ("Mode", or_dash(query.mode.clone())),
        ("Sequence", or_dash(query.sequence.clone())),
        ("Every", or_dash(query.interval.to_string())),
        ("Randomize", or_dash(query.randomize.to_string())),
        ("Cooldown", or_dash(query.cooldown.to_string())),
        ("Next run", or_dash(query.eta.to_string())),
        ("Last run", or_dash(query.last_run.to_string())),
        ("Last match", or_dash(query.last_match_datetime.to_string())),
        ("Cycles", opt(query.cycles)),
        ("Cycle limit", opt(query.cycles_limit)),
        ("Min matches", opt(query.min_matches)),
        ("Alert sound", or_dash(query.alert_sound.clone())),
        ("Cookies", or_dash(query.cookies_filename.clone())),
        ("Message", or_dash(query.message.clone())),
    ]
}
