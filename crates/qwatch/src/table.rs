use unicode_width::UnicodeWidthStr;

use qwatch_core::BoardRow;

use crate::color;

const HEADERS: [&str; 8] = ["", "Uid", "Name", "Status", "Cycles", "Every", "Next Run", "Last Run"];

/// Box-drawn table of board rows.
pub struct TableFormatter {
    widths: [usize; 8],
}

impl TableFormatter {
    pub fn new(rows: &[BoardRow]) -> Self {
        // Minimum widths = header label lengths; the glyph column fits "!!!".
        let mut widths = HEADERS.map(display_width);
        widths[0] = 3;

        for row in rows {
            for (width, cell) in widths.iter_mut().zip(Self::cells(row)) {
                *width = (*width).max(display_width(&cell));
            }
        }

        Self { widths }
    }

    pub fn print_table(&self, rows: &[BoardRow]) {
        for line in self.render(rows) {
            println!("{line}");
        }
    }

    pub fn render(&self, rows: &[BoardRow]) -> Vec<String> {
        let mut lines = Vec::with_capacity(rows.len() + 4);
        lines.push(self.border('┌', '┬', '┐'));
        lines.push(self.header_row());
        lines.push(self.border('├', '┼', '┤'));
        lines.extend(rows.iter().map(|row| self.row(row)));
        lines.push(self.border('└', '┴', '┘'));
        lines
    }

    fn cells(row: &BoardRow) -> [String; 8] {
        [
            row.glyph.as_str().to_string(),
            row.uid.clone(),
            row.name.clone(),
            row.status.label().to_string(),
            row.cycles_label(),
            row.interval.clone(),
            row.eta.clone(),
            row.last_run.clone(),
        ]
    }

    fn row(&self, row: &BoardRow) -> String {
        let [glyph, uid, name, status, cycles, every, eta, last_run] = Self::cells(row);
        let w = &self.widths;
        let sep = color::muted("│");
        format!(
            "{sep} {} {sep} {} {sep} {} {sep} {} {sep} {} {sep} {} {sep} {} {sep} {} {sep}",
            color::glyph(row.glyph, &pad(&glyph, w[0])),
            color::muted(&pad(&uid, w[1])),
            color::sky(&pad(&name, w[2])),
            color::status(row.status, &pad(&status, w[3])),
            pad(&cycles, w[4]),
            pad(&every, w[5]),
            pad(&eta, w[6]),
            pad(&last_run, w[7]),
        )
    }

    fn header_row(&self) -> String {
        let sep = color::muted("│");
        let cells: Vec<String> = HEADERS
            .iter()
            .zip(self.widths)
            .map(|(label, width)| color::bold(&pad(label, width)))
            .collect();
        format!("{sep} {} {sep}", cells.join(&format!(" {sep} ")))
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        color::muted(&format!(
            "{left}{}{right}",
            segments.join(&middle.to_string())
        ))
    }
}

/// Compute the terminal display width of a string.
///
/// Wide characters (CJK, emoji) count as 2 columns.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad a string to a minimum display width without truncating.
pub(crate) fn pad(s: &str, min_width: usize) -> String {
    let width = display_width(s);
    if width >= min_width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(min_width - width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qwatch_core::{Glyph, QueryStatus};

    fn row(uid: &str, name: &str, glyph: Glyph) -> BoardRow {
        BoardRow {
            uid: uid.to_string(),
            name: name.to_string(),
            target_url: String::new(),
            glyph,
            alert_eligible: glyph == Glyph::Bang,
            status: QueryStatus::Ok,
            is_recurring: false,
            interval: "00:15:00".to_string(),
            cycles: Some(2),
            cycles_limit: Some(0),
            eta: String::new(),
            last_run: "08:00".to_string(),
            alert_sound: String::new(),
        }
    }

    #[test]
    fn test_pad_shorter_than_width() {
        assert_eq!(pad("hi", 5), "hi   ");
    }

    #[test]
    fn test_pad_longer_than_width() {
        // Never truncates
        assert_eq!(pad("hello world", 5), "hello world");
    }

    #[test]
    fn test_display_width_cjk() {
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn test_pad_with_wide_chars() {
        assert_eq!(pad("日本", 6), "日本  ");
    }

    #[test]
    fn test_widths_grow_to_longest_cell() {
        let rows = vec![row("1", "Tickets for the big show", Glyph::Bang)];
        let formatter = TableFormatter::new(&rows);
        assert_eq!(formatter.widths[0], 3);
        assert_eq!(formatter.widths[2], "Tickets for the big show".len());
        assert_eq!(formatter.widths[1], "Uid".len());
    }

    #[test]
    fn test_render_has_border_header_and_rows() {
        let rows = vec![row("1", "Tickets", Glyph::Bang), row("2", "Docs", Glyph::None)];
        let lines = TableFormatter::new(&rows).render(&rows);

        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("Name"));
        assert!(lines[3].contains("!!!"));
        assert!(lines[3].contains("Tickets"));
        assert!(lines[4].contains("Docs"));
    }
}
