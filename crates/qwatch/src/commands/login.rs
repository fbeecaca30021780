use std::io::{BufRead, Write};

use clap::ArgMatches;
use tracing::{error, info};

use qwatch_core::auth::persistence;
use qwatch_core::{Gate, SessionError};

use super::helpers::{self, CliContext};
use crate::color;

pub(crate) fn handle_login_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let username = matches
        .get_one::<String>("username")
        .ok_or("Username argument is required")?;
    let ctx = CliContext::from_matches(matches)?;

    let password = match matches.get_one::<String>("password") {
        Some(password) => password.clone(),
        None => prompt_password()?,
    };

    info!(event = "cli.login_started", username = %username, server = ctx.client.base_url());

    let gate = helpers::block_on(ctx.client.login(username, &password))?
        .map_err(|e| helpers::report_api_error("log in", "cli.login_failed", e))?;

    let session = match gate {
        Gate::Authorized(session) => session,
        Gate::Denied => {
            let e = SessionError::LoginRejected {
                username: username.clone(),
            };
            eprintln!("{}", color::error(&format!("❌ {}", e)));
            error!(event = "cli.login_failed", username = %username, error = %e);
            return Err(e.into());
        }
    };

    if let Err(e) = persistence::save_session(&ctx.paths, &session) {
        eprintln!("{}", color::error(&format!("❌ Failed to store session: {}", e)));
        error!(event = "cli.login_failed", username = %username, error = %e);
        return Err(e.into());
    }

    println!("✅ Logged in as {}", color::sky(&session.username));
    println!(
        "   Session stored in {}",
        color::muted(&ctx.paths.session_file().display().to_string())
    );
    info!(event = "cli.login_completed", username = %session.username);
    Ok(())
}

/// Read the password from stdin. The prompt goes to stderr so stdout stays clean.
fn prompt_password() -> Result<String, Box<dyn std::error::Error>> {
    eprint!("Password: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err("No password given".into());
    }
    Ok(password)
}
