use clap::{Arg, Command};
use clap_complete::Shell;

pub fn save_command() -> Command {
    Command::new("save").about("Ask the backend to persist its queries")
}

pub fn clean_command() -> Command {
    Command::new("clean").about("Remove queries that reached their cycle limit")
}

pub fn settings_command() -> Command {
    Command::new("settings")
        .about("Show or change backend settings")
        .arg(
            Arg::new("autosave")
                .long("autosave")
                .value_name("BOOL")
                .value_parser(clap::value_parser!(bool))
                .help("Persist queries automatically after changes (true/false)"),
        )
        .arg(
            Arg::new("notes")
                .long("notes")
                .help("Free-form notes stored with the account"),
        )
}

pub fn ping_command() -> Command {
    Command::new("ping").about("Check that the backend is reachable")
}

pub fn completions_command() -> Command {
    Command::new("completions")
        .about("Generate shell completion scripts")
        .arg(
            Arg::new("shell")
                .help("Target shell")
                .required(true)
                .index(1)
                .value_parser(clap::value_parser!(Shell)),
        )
}
