use clap::{Arg, ArgAction, Command};

pub fn list_command() -> Command {
    Command::new("list")
        .about("List monitored queries without triggering a scan")
        .arg(
            Arg::new("all")
                .long("all")
                .short('a')
                .help("Include disabled queries (negative cycle limit)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
}

pub fn show_command() -> Command {
    Command::new("show")
        .about("Show every field of one query")
        .arg(uid_arg("Uid of the query to show"))
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
}

pub fn add_command() -> Command {
    form_args(
        Command::new("add")
            .about("Create a query on the backend")
            .arg(
                Arg::new("url")
                    .long("url")
                    .short('u')
                    .help("Page the backend loads on every run")
                    .required(true),
            ),
    )
}

pub fn edit_command() -> Command {
    form_args(
        Command::new("edit")
            .about("Change fields of an existing query; omitted flags keep their value")
            .arg(uid_arg("Uid of the query to edit"))
            .arg(
                Arg::new("url")
                    .long("url")
                    .short('u')
                    .help("Page the backend loads on every run"),
            ),
    )
}

pub fn delete_command() -> Command {
    Command::new("delete")
        .about("Delete a query")
        .arg(uid_arg("Uid of the query to delete"))
}

pub fn open_command() -> Command {
    Command::new("open")
        .about("Open a query's target page in the default browser")
        .arg(uid_arg("Uid of the query to open"))
}

fn uid_arg(help: &'static str) -> Arg {
    Arg::new("uid").help(help).required(true).index(1)
}

/// Flags shared by `add` and `edit`. Values are passed to the backend as-is.
fn form_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("alias")
                .long("alias")
                .help("Display name on the board"),
        )
        .arg(
            Arg::new("sequence")
                .long("sequence")
                .short('s')
                .help("Content sequence the backend looks for"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .short('m')
                .help("Match mode understood by the backend (default: exists)"),
        )
        .arg(
            Arg::new("query-interval")
                .long("every")
                .value_name("INTERVAL")
                .help("How often the backend runs the query"),
        )
        .arg(
            Arg::new("eta")
                .long("eta")
                .help("First run time"),
        )
        .arg(
            Arg::new("cycles-limit")
                .long("cycles-limit")
                .value_name("N")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i64))
                .help("Stop after N runs; 0 runs forever, negative disables the query"),
        )
        .arg(
            Arg::new("randomize")
                .long("randomize")
                .value_name("SECS")
                .help("Random jitter added to the interval"),
        )
        .arg(
            Arg::new("recurring")
                .long("recurring")
                .value_name("BOOL")
                .value_parser(clap::value_parser!(bool))
                .help("Keep alerting on every matching run (true/false)"),
        )
        .arg(
            Arg::new("target-url")
                .long("target-url")
                .help("Page opened by 'qwatch open' (defaults to the query url)"),
        )
        .arg(
            Arg::new("alert-sound")
                .long("alert-sound")
                .value_name("SOUND")
                .help("Sound played on a new match (default sound when empty)"),
        )
        .arg(
            Arg::new("cookies")
                .long("cookies")
                .value_name("FILE")
                .help("Cookies file the backend loads before the run"),
        )
        .arg(
            Arg::new("min-matches")
                .long("min-matches")
                .value_name("N")
                .value_parser(clap::value_parser!(u32))
                .help("Matches needed before the query counts as found"),
        )
        .arg(
            Arg::new("cooldown")
                .long("cooldown")
                .value_name("SECS")
                .help("Pause after a match before the next run"),
        )
}
