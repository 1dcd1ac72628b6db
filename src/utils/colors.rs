/// ANSI color helpers for calendar tables.
use crate::models::OwnerType;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

/// One colour per hierarchy level, used for the badge column.
pub fn color_for_level(level: OwnerType) -> &'static str {
    match level {
        OwnerType::Legal => RED,
        OwnerType::HeadOffice => BLUE,
        OwnerType::Franchise => MAGENTA,
        OwnerType::Store => CYAN,
    }
}

/// Operating days green, closed days red.
pub fn color_for_operating(operating: bool) -> &'static str {
    if operating { GREEN } else { RED }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}

/// Empty cells are rendered as a grey dash.
pub fn colorize_optional(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => format!("{GREY}--{RESET}"),
    }
}
