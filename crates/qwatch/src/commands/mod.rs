use clap::ArgMatches;
use tracing::error;

use qwatch_core::events;

pub mod helpers;

mod add;
mod clean;
mod completions;
mod delete;
mod edit;
mod list;
mod login;
mod logout;
mod open;
mod ping;
mod save;
mod settings;
mod show;
mod watch;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let result = match matches.subcommand() {
        Some(("login", sub_matches)) => login::handle_login_command(sub_matches),
        Some(("logout", sub_matches)) => logout::handle_logout_command(sub_matches),
        Some(("watch", sub_matches)) => watch::handle_watch_command(sub_matches),
        Some(("list", sub_matches)) => list::handle_list_command(sub_matches),
        Some(("show", sub_matches)) => show::handle_show_command(sub_matches),
        Some(("add", sub_matches)) => add::handle_add_command(sub_matches),
        Some(("edit", sub_matches)) => edit::handle_edit_command(sub_matches),
        Some(("delete", sub_matches)) => delete::handle_delete_command(sub_matches),
        Some(("open", sub_matches)) => open::handle_open_command(sub_matches),
        Some(("save", sub_matches)) => save::handle_save_command(sub_matches),
        Some(("clean", sub_matches)) => clean::handle_clean_command(sub_matches),
        Some(("settings", sub_matches)) => settings::handle_settings_command(sub_matches),
        Some(("ping", sub_matches)) => ping::handle_ping_command(sub_matches),
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_app_shutdown();
    result
}
