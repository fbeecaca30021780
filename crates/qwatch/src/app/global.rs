use clap::{Arg, ArgAction, Command};

pub fn root_command() -> Command {
    Command::new("qwatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Watch web queries on a change-monitoring backend")
        .long_about("qwatch talks to a change-monitoring backend. It manages the queries the backend runs and shows a live status board that refreshes on a fixed interval and plays an alert sound the moment a query finds a new match.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("server")
                .long("server")
                .value_name("URL")
                .help("Backend base URL (overrides config and QWATCH_SERVER_URL)")
                .global(true),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .value_name("SECS")
                .help("Board refresh interval in seconds (overrides config)")
                .value_parser(clap::value_parser!(u64).range(1..=86_400))
                .global(true),
        )
        .arg(
            Arg::new("mute")
                .long("mute")
                .help("Do not play alert sounds")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
}
