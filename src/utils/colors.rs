/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Timeline rows: blocks in blue, movements in magenta.
pub fn color_for_kind(kind: &str) -> &'static str {
    match kind {
        "block" => BLUE,
        "movement" => MAGENTA,
        _ => RESET,
    }
}
