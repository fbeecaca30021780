//! Per-query notification decision.
//!
//! Pure functions over the server's flags. The backend computes `is_new`,
//! so there is no client-side memory of what was already alerted: a query
//! alerts on exactly the ticks where the server ran it and it matched.

use qwatch_protocol::QuerySnapshot;

/// Marker shown next to a query on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Glyph {
    /// No match.
    #[default]
    None,
    /// Matched on an earlier run.
    Plus,
    /// Matched on the run the server just completed.
    Bang,
}

impl Glyph {
    pub fn as_str(&self) -> &'static str {
        match self {
            Glyph::None => " ",
            Glyph::Plus => "+",
            Glyph::Bang => "!!!",
        }
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Notification {
    pub glyph: Glyph,
    /// Play the query's alert sound for this tick.
    pub alert_eligible: bool,
}

/// Decide glyph and alert for one query.
///
/// Recurring queries follow the same rule: they alert whenever a fresh run
/// matches, which the server reports through `is_new`.
pub fn evaluate(found: bool, is_new: bool, _is_recurring: bool) -> Notification {
    match (found, is_new) {
        (false, _) => Notification {
            glyph: Glyph::None,
            alert_eligible: false,
        },
        (true, true) => Notification {
            glyph: Glyph::Bang,
            alert_eligible: true,
        },
        (true, false) => Notification {
            glyph: Glyph::Plus,
            alert_eligible: false,
        },
    }
}

pub fn evaluate_query(query: &QuerySnapshot) -> Notification {
    evaluate(query.found, query.is_new, query.is_recurring)
}
