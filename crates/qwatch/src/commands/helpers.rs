use std::future::Future;

use clap::ArgMatches;
use tracing::{error, warn};

use qwatch_core::auth::persistence;
use qwatch_core::events;
use qwatch_core::{
    ApiError, BackendClient, CliOverrides, QueryForm, QwatchConfig, QwatchError, QwatchPaths,
    Session, SessionError,
};

use crate::color;

/// Everything a backend command needs, resolved once per invocation.
pub struct CliContext {
    pub paths: QwatchPaths,
    pub config: QwatchConfig,
    pub client: BackendClient,
}

impl CliContext {
    /// Resolve paths, load config (with CLI overrides) and build the client.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, Box<dyn std::error::Error>> {
        let paths = QwatchPaths::resolve()?;
        let overrides = cli_overrides(matches);
        let config = load_config_with_warning(&paths)
            .with_cli_overrides(&overrides)
            .inspect_err(|e| {
                eprintln!("{}", color::error(&format!("Invalid option: {}", e)));
                error!(event = "cli.config.override_failed", error = %e);
            })?;
        let client = BackendClient::from_config(&config)?;
        Ok(Self {
            paths,
            config,
            client,
        })
    }

    /// The stored session, or [`SessionError::NotLoggedIn`].
    pub fn require_session(&self) -> Result<Session, Box<dyn std::error::Error>> {
        match persistence::load_session(&self.paths)? {
            Some(session) => Ok(session),
            None => {
                let e = SessionError::NotLoggedIn;
                eprintln!("{}", color::error(&e.to_string()));
                Err(e.into())
            }
        }
    }
}

/// Global flags that override the config file.
pub fn cli_overrides(matches: &ArgMatches) -> CliOverrides {
    CliOverrides {
        server_url: matches.get_one::<String>("server").cloned(),
        refresh_interval_secs: matches.get_one::<u64>("interval").copied(),
        mute: matches.get_flag("mute"),
    }
}

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub fn load_config_with_warning(paths: &QwatchPaths) -> QwatchConfig {
    match qwatch_config::load_hierarchy_from(paths) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "{}",
                color::warning(&format!(
                    "Warning: Could not load config: {}. Using defaults.\n\
                     Tip: Check {} for syntax errors.",
                    e,
                    paths.user_config().display()
                ))
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            QwatchConfig::default()
        }
    }
}

/// Run a future to completion on a fresh multi-threaded runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    // A pending stdin read in `watch` would otherwise keep the process alive.
    runtime.shutdown_background();
    Ok(output)
}

/// Print and log a failed backend call, then hand the error back.
///
/// `action` completes the sentence "Failed to ...".
pub fn report_api_error(action: &str, event: &str, e: ApiError) -> Box<dyn std::error::Error> {
    eprintln!("{}", color::error(&format!("❌ Failed to {}: {}", action, e)));
    if e.is_auth_expired() {
        eprintln!("{}", color::hint("   Hint: run 'qwatch login' to start a new session"));
    }
    error!(
        event = event,
        error = %e,
        error_code = e.error_code()
    );
    events::log_app_error(&e);
    e.into()
}

/// Apply `add`/`edit` flags to a form. Flags not given leave the field alone.
pub fn apply_form_args(form: &mut QueryForm, matches: &ArgMatches) {
    let text_fields: [(&str, &mut String); 11] = [
        ("url", &mut form.url),
        ("alias", &mut form.alias),
        ("sequence", &mut form.sequence),
        ("mode", &mut form.mode),
        ("query-interval", &mut form.interval),
        ("eta", &mut form.eta),
        ("randomize", &mut form.randomize),
        ("target-url", &mut form.target_url),
        ("alert-sound", &mut form.alert_sound),
        ("cookies", &mut form.cookies_filename),
        ("cooldown", &mut form.cooldown),
    ];
    for (id, field) in text_fields {
        if let Some(value) = matches.get_one::<String>(id) {
            *field = value.clone();
        }
    }

    if let Some(limit) = matches.get_one::<i64>("cycles-limit") {
        form.cycles_limit = limit.to_string();
    }
    if let Some(recurring) = matches.get_one::<bool>("recurring") {
        form.is_recurring = recurring.to_string();
    }
    if let Some(min) = matches.get_one::<u32>("min-matches") {
        form.min_matches = min.to_string();
    }
}
