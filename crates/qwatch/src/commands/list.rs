use clap::ArgMatches;
use tracing::info;

use qwatch_core::BoardRow;

use super::helpers::{self, CliContext};
use crate::table::TableFormatter;

pub(crate) fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let include_disabled = matches.get_flag("all");

    info!(event = "cli.list_started", json_output = json_output);

    let ctx = CliContext::from_matches(matches)?;
    let session = ctx.require_session()?;
    let queries = helpers::block_on(ctx.client.all_queries(&session))?
        .map_err(|e| helpers::report_api_error("list queries", "cli.list_failed", e))?;

    let visible: Vec<_> = queries
        .values()
        .filter(|query| include_disabled || !query.is_disabled())
        .collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else if visible.is_empty() {
        println!("No queries found.");
    } else {
        let rows: Vec<BoardRow> = visible.iter().map(|q| BoardRow::from_query(q)).collect();
        TableFormatter::new(&rows).print_table(&rows);
    }

    info!(event = "cli.list_completed", count = visible.len());
    Ok(())
}
