use clap::{Arg, ArgAction, Command};

pub fn login_command() -> Command {
    Command::new("login")
        .about("Log in to the backend and store the session")
        .arg(
            Arg::new("username")
                .help("Account name")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .short('p')
                .help("Password (prompted on stdin when omitted)"),
        )
}

pub fn logout_command() -> Command {
    Command::new("logout").about("Forget the stored session")
}

pub fn watch_command() -> Command {
    Command::new("watch")
        .about("Show the live status board and alert on new matches")
        .arg(
            Arg::new("once")
                .long("once")
                .help("Refresh once, print the board and exit")
                .action(ArgAction::SetTrue),
        )
}
