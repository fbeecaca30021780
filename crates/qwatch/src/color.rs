//! CLI color functions.
//!
//! All functions respect `NO_COLOR`, `FORCE_COLOR` and TTY detection via
//! `owo-colors`' `if_supports_color()`. The `--no-color` flag sets an
//! in-process flag that bypasses owo-colors entirely.

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use qwatch_core::{Glyph, QueryStatus};

/// Global override: when true, forces color off (set by `--no-color` flag).
static NO_COLOR_FLAG: AtomicBool = AtomicBool::new(false);

/// Call once from main.rs when `--no-color` is passed.
pub fn set_no_color() {
    NO_COLOR_FLAG.store(true, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

const SKY: Rgb = Rgb::from_hex(0x6FA8DC); // Names, primary accent
const LEAF: Rgb = Rgb::from_hex(0x6AA84F); // Healthy
const AMBER: Rgb = Rgb::from_hex(0xE6A23C); // Earlier match, not yet ran
const SIREN: Rgb = Rgb::from_hex(0xD9534F); // Fresh match, errors
const MUTED: Rgb = Rgb::from_hex(0x5C6370); // Secondary info

fn no_color() -> bool {
    NO_COLOR_FLAG.load(Ordering::Relaxed)
}

fn paint(text: &str, rgb: Rgb) -> String {
    if no_color() {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.truecolor(rgb.r, rgb.g, rgb.b))
        .to_string()
}

fn paint_stderr(text: &str, rgb: Rgb) -> String {
    if no_color() {
        return text.to_string();
    }
    text.if_supports_color(owo_colors::Stream::Stderr, |t| {
        t.truecolor(rgb.r, rgb.g, rgb.b)
    })
    .to_string()
}

/// Query names and uids.
pub fn sky(text: &str) -> String {
    paint(text, SKY)
}

pub fn leaf(text: &str) -> String {
    paint(text, LEAF)
}

pub fn amber(text: &str) -> String {
    paint(text, AMBER)
}

pub fn siren(text: &str) -> String {
    paint(text, SIREN)
}

/// Apply bold bright text (headers).
pub fn bold(text: &str) -> String {
    if no_color() {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.bold()).to_string()
}

/// Borders, hints, timestamps.
pub fn muted(text: &str) -> String {
    paint(text, MUTED)
}

/// Color a query status label by health.
pub fn status(status: QueryStatus, text: &str) -> String {
    match status {
        QueryStatus::Ok => leaf(text),
        QueryStatus::NotYetRan => amber(text),
        QueryStatus::AccessDenied | QueryStatus::ConnectionLost => siren(text),
        QueryStatus::Unknown(_) => muted(text),
    }
}

/// Color a notification glyph. `text` is the padded glyph.
pub fn glyph(glyph: Glyph, text: &str) -> String {
    match glyph {
        Glyph::Bang => bold(&siren(text)),
        Glyph::Plus => amber(text),
        Glyph::None => text.to_string(),
    }
}

/// Error styling for stderr messages.
pub fn error(text: &str) -> String {
    paint_stderr(text, SIREN)
}

/// Warning styling for stderr messages.
pub fn warning(text: &str) -> String {
    paint_stderr(text, AMBER)
}

/// Hint styling for secondary info on stderr.
pub fn hint(text: &str) -> String {
    paint_stderr(text, MUTED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex() {
        let c = Rgb::from_hex(0x6FA8DC);
        assert_eq!(c.r, 0x6F);
        assert_eq!(c.g, 0xA8);
        assert_eq!(c.b, 0xDC);
    }

    #[test]
    fn test_no_color_flag_disables_all_formatting() {
        NO_COLOR_FLAG.store(true, Ordering::Relaxed);

        assert_eq!(sky("test"), "test");
        assert_eq!(leaf("test"), "test");
        assert_eq!(amber("test"), "test");
        assert_eq!(siren("test"), "test");
        assert_eq!(bold("test"), "test");
        assert_eq!(muted("test"), "test");
        assert_eq!(error("test"), "test");
        assert_eq!(warning("test"), "test");
        assert_eq!(hint("test"), "test");
        assert_eq!(glyph(Glyph::Bang, "!!!"), "!!!");

        NO_COLOR_FLAG.store(false, Ordering::Relaxed);
    }

    #[test]
    fn test_status_keeps_text() {
        assert!(status(QueryStatus::Ok, "OK").contains("OK"));
        assert!(status(QueryStatus::ConnectionLost, "Connection Lost").contains("Connection Lost"));
        assert!(status(QueryStatus::Unknown(7), "Unknown").contains("Unknown"));
    }

    #[test]
    fn test_glyph_none_is_plain() {
        assert_eq!(glyph(Glyph::None, "   "), "   ");
        assert!(glyph(Glyph::Plus, "+").contains('+'));
    }
}
