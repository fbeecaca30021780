mod global;
mod misc;
mod query;
mod session;


use clap::Command;

pub fn build_cli() -> Command {
    global::root_command()
        .subcommand(session::login_command())
        .subcommand(session::logout_command())
        .subcommand(session::watch_command())
        .subcommand(query::list_command())
        .subcommand(query::show_command())
        .subcommand(query::add_command())
        .subcommand(query::edit_command())
        .subcommand(query::delete_command())
        .subcommand(query::open_command())
        .subcommand(misc::save_command())
        .subcommand(misc::clean_command())
        .subcommand(misc::settings_command())
        .subcommand(misc::ping_command())
        .subcommand(misc::completions_command())
}
