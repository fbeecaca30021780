use std::time::Duration;

use clap::ArgMatches;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};

use qwatch_core::{
    Board, Poller, PollerState, Session, SessionStore, dispatcher_from_config,
};

use super::helpers::{self, CliContext};
use crate::color;
use crate::table::TableFormatter;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

pub(crate) fn handle_watch_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let once = matches.get_flag("once");
    let ctx = CliContext::from_matches(matches)?;
    let session = ctx.require_session()?;

    info!(
        event = "cli.watch_started",
        server = ctx.client.base_url(),
        interval_secs = ctx.config.refresh_interval().as_secs(),
        once = once
    );

    let result = helpers::block_on(run_watch(ctx, session, once))?;
    match &result {
        Ok(()) => info!(event = "cli.watch_completed"),
        Err(e) => error!(event = "cli.watch_failed", error = %e),
    }
    result
}

async fn run_watch(
    ctx: CliContext,
    session: Session,
    once: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = SessionStore::new(Some(session));
    let dispatcher = dispatcher_from_config(&ctx.config, &ctx.client, &store, &ctx.paths);
    let interval = ctx.config.refresh_interval();
    let server = ctx.client.base_url().to_string();

    let handle = Poller::new(ctx.client, dispatcher, interval)
        .mount(store.subscribe())
        .await;

    if handle.state() == PollerState::Stopped {
        return Err(session_rejected());
    }

    if once {
        for line in board_lines(&handle.board(), &server, interval, false) {
            println!("{line}");
        }
        handle.join().await;
        return Ok(());
    }

    let mut updates = handle.subscribe();
    let mut acks = spawn_ack_reader();
    redraw(&updates.borrow_and_update(), &server, interval);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let outcome = loop {
        tokio::select! {
            _ = &mut ctrl_c => break Ok(()),
            _ = handle.stopped() => break Err(session_rejected()),
            changed = updates.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let board = updates.borrow_and_update().clone();
                redraw(&board, &server, interval);
            }
            Some(()) = acks.recv() => {
                handle.acknowledge();
                info!(event = "cli.watch.acknowledged");
            }
        }
    };

    handle.join().await;
    outcome
}

fn session_rejected() -> Box<dyn std::error::Error> {
    let message = "Session rejected by the backend. Run 'qwatch login' again";
    eprintln!("{}", color::error(&format!("❌ {}", message)));
    message.into()
}

/// Each line on stdin acknowledges the fresh-match indicator.
fn spawn_ack_reader() -> mpsc::Receiver<()> {
    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(_)) = lines.next_line().await {
            if tx.send(()).await.is_err() {
                break;
            }
        }
    });
    rx
}

fn redraw(board: &Board, server: &str, interval: Duration) {
    print!("{CLEAR_SCREEN}");
    for line in board_lines(board, server, interval, true) {
        println!("{line}");
    }
}

fn board_lines(board: &Board, server: &str, interval: Duration, live: bool) -> Vec<String> {
    let mut lines = vec![
        color::muted(&format!(
            "qwatch · {} · every {}s",
            server,
            interval.as_secs()
        )),
        format!("Last refresh: {}", board.last_refresh_label()),
    ];

    if board.unnotified_new {
        let prompt = if live {
            "!!! New matches (press Enter to acknowledge)"
        } else {
            "!!! New matches"
        };
        lines.push(color::bold(&color::siren(prompt)));
    }
    lines.push(String::new());

    if board.rows.is_empty() {
        lines.push("No queries.".to_string());
    } else {
        lines.extend(TableFormatter::new(&board.rows).render(&board.rows));
    }

    if live {
        lines.push(String::new());
        lines.push(color::muted("Ctrl-C to quit"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use qwatch_core::{BoardRow, QuerySnapshot};

    fn board(unnotified_new: bool) -> Board {
        let query = QuerySnapshot {
            uid: "1".to_string(),
            alias: "Tickets".to_string(),
            found: true,
            is_new: true,
            ..Default::default()
        };
        Board {
            rows: vec![BoardRow::from_query(&query)],
            last_refresh: None,
            unnotified_new,
        }
    }

    #[test]
    fn test_board_lines_show_refresh_and_rows() {
        let lines = board_lines(&board(false), "http://h:1", Duration::from_secs(15), false);
        assert!(lines[0].contains("http://h:1"));
        assert!(lines[0].contains("every 15s"));
        assert_eq!(lines[1], "Last refresh: never");
        assert!(lines.iter().any(|l| l.contains("Tickets") && l.contains("!!!")));
        assert!(!lines.iter().any(|l| l.contains("Ctrl-C")));
    }

    #[test]
    fn test_board_lines_flag_unnotified_matches() {
        let lines = board_lines(&board(true), "http://h:1", Duration::from_secs(15), true);
        assert!(lines[2].contains("New matches"));
        assert!(lines[2].contains("press Enter"));
        assert!(lines.last().unwrap().contains("Ctrl-C"));
    }

    #[test]
    fn test_board_lines_empty_board() {
        let lines = board_lines(&Board::default(), "http://h:1", Duration::from_secs(5), false);
        assert!(lines.iter().any(|l| l == "No queries."));
    }
}
