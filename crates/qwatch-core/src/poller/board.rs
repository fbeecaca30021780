//! The rendered status board.

use chrono::{DateTime, Local};
use qwatch_protocol::{DashboardSnapshot, QuerySnapshot, QueryStatus};

use crate::notify::{self, Glyph};

/// One visible query after evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardRow {
    pub uid: String,
    pub name: String,
    pub target_url: String,
    pub glyph: Glyph,
    pub alert_eligible: bool,
    pub status: QueryStatus,
    pub is_recurring: bool,
    pub interval: String,
    pub cycles: Option<i64>,
    pub cycles_limit: Option<i64>,
    pub eta: String,
    pub last_run: String,
    pub alert_sound: String,
}

impl BoardRow {
    pub fn from_query(query: &QuerySnapshot) -> Self {
        let notification = notify::evaluate_query(query);
        Self {
            uid: query.uid.clone(),
            name: query.display_name().to_string(),
            target_url: query.target_url().to_string(),
            glyph: notification.glyph,
            alert_eligible: notification.alert_eligible,
            status: query.status,
            is_recurring: query.is_recurring,
            interval: query.interval.to_string(),
            cycles: query.cycles,
            cycles_limit: query.cycles_limit,
            eta: query.eta.to_string(),
            last_run: query.last_run.to_string(),
            alert_sound: query.alert_sound.clone(),
        }
    }

    /// `cycles/limit`, with `-` for unknown parts. A zero limit means unbounded.
    pub fn cycles_label(&self) -> String {
        let cycles = self.cycles.map_or("-".to_string(), |c| c.to_string());
        match self.cycles_limit {
            Some(limit) if limit > 0 => format!("{cycles}/{limit}"),
            _ => cycles,
        }
    }
}

/// Everything a viewer needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    pub rows: Vec<BoardRow>,
    /// Local time of the last successful refresh. `None` until the first one.
    pub last_refresh: Option<DateTime<Local>>,
    /// Some row showed a fresh match since the viewer last acknowledged.
    pub unnotified_new: bool,
}

impl Board {
    pub fn last_refresh_label(&self) -> String {
        self.last_refresh
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string())
    }

    pub fn alert_count(&self) -> usize {
        self.rows.iter().filter(|r| r.alert_eligible).count()
    }
}

/// Evaluate every enabled query in uid order.
pub fn evaluate_snapshot(snapshot: &DashboardSnapshot) -> Vec<BoardRow> {
    snapshot
        .values()
        .filter(|query| !query.is_disabled())
        .map(BoardRow::from_query)
        .collect()
}
