//! Status lines printed by the commands.

use crate::utils::colors::{BLUE, BOLD, GREEN, RED, RESET, YELLOW};
use std::fmt;
use unicode_width::UnicodeWidthStr;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

fn status(color: &str, icon: &str, msg: impl fmt::Display) -> String {
    format!("{}{}{} {}{}", color, BOLD, icon, RESET, msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", status(BLUE, ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", status(GREEN, ICON_OK, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", status(YELLOW, ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", status(RED, ICON_ERR, msg));
}

/// Title of a `show` view (day, block, movement, participant, agenda),
/// underlined to its display width.
pub fn header<T: fmt::Display>(title: T) {
    let title = title.to_string();
    let rule = "─".repeat(title.width().max(3));
    println!("{}{}{}\n{}{}\n", BOLD, BLUE, title, rule, RESET);
}
