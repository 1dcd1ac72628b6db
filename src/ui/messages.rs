use ansi_term::{Colour, Style};
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

fn icon(colour: Colour, icon: &str) -> String {
    Style::new().bold().fg(colour).paint(icon).to_string()
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", icon(Colour::Blue, ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", icon(Colour::Green, ICON_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", icon(Colour::Yellow, ICON_WARN), msg);
}

/// Errors go to stderr so piped JSON output stays clean.
pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", icon(Colour::Red, ICON_ERR), msg);
}

/// Section header, underlined with `sep` to the width of the title.
pub fn header<T: fmt::Display>(msg: T, sep: &str) {
    let title = msg.to_string();
    let width = unicode_width::UnicodeWidthStr::width(title.as_str()).max(3);
    println!("{}", Style::new().bold().fg(Colour::Blue).paint(&title));
    println!("{}", sep.repeat(width));
}
