//! Terminal UI primitives — colors, icons, and formatting helpers.
//!
//! Zero external dependencies. Uses raw ANSI escape codes.
//! Respects the `NO_COLOR` environment variable (https://no-color.org/).

use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if color output is enabled.
/// Disabled when `NO_COLOR` env var is set (any value) or `TERM=dumb`.
pub fn color_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        if std::env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if let Ok(term) = std::env::var("TERM") {
            if term == "dumb" {
                return false;
            }
        }
        true
    })
}

// ---------------------------------------------------------------------------
// ANSI escape helpers
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const FG_RED: &str = "\x1b[31m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_CYAN: &str = "\x1b[36m";

/// Apply an ANSI style to text. Returns plain text if color is disabled.
fn styled(codes: &[&str], text: &str) -> String {
    if !color_enabled() || codes.is_empty() {
        return text.to_string();
    }
    let prefix: String = codes.iter().copied().collect();
    format!("{}{}{}", prefix, text, RESET)
}

// ---------------------------------------------------------------------------
// Public style functions
// ---------------------------------------------------------------------------

pub fn bold(text: &str) -> String { styled(&[BOLD], text) }
pub fn dim(text: &str) -> String { styled(&[DIM], text) }

pub fn red(text: &str) -> String { styled(&[FG_RED], text) }
pub fn green(text: &str) -> String { styled(&[FG_GREEN], text) }
pub fn yellow(text: &str) -> String { styled(&[FG_YELLOW], text) }
pub fn cyan(text: &str) -> String { styled(&[FG_CYAN], text) }

pub fn bold_cyan(text: &str) -> String { styled(&[BOLD, FG_CYAN], text) }
pub fn bold_green(text: &str) -> String { styled(&[BOLD, FG_GREEN], text) }

// ---------------------------------------------------------------------------
// Geometric icons — flat, modern, no bubbly emojis
// ---------------------------------------------------------------------------

/// Icons used throughout the CLI. Flat geometric style.
pub mod icon {
    pub const OK: &str = "✓";
    pub const FAIL: &str = "✗";
    pub const ACTIVE: &str = "●";
    pub const PENDING: &str = "○";
    pub const ARROW_RIGHT: &str = "→";
}
