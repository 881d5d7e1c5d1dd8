//! Everything the CLI prints goes through [`print`], which logs on
//! [`PRINT_TARGET`] so lines interleave cleanly with the progress spinner.

use colored::*;
use tracing::info;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

/// Events on this target are printed as-is by the formatter.
pub const PRINT_TARGET: &str = "lanscout::print";

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

/// A full-width line of `fill`, with `label` centred in it when given.
fn rule(fill: &str, label: Option<&str>) -> String {
    let Some(label) = label else {
        return fill.repeat(TOTAL_WIDTH).color(colors::SEPARATOR).to_string();
    };

    let label = format!("⟦ {} ⟧", label.to_uppercase());
    let free = TOTAL_WIDTH.saturating_sub(console::measure_text_width(&label));
    let left = free / 2;
    format!(
        "{}{}{}",
        fill.repeat(left).color(colors::SEPARATOR),
        label.color(colors::PRIMARY),
        fill.repeat(free - left).color(colors::SEPARATOR)
    )
}

pub fn header(msg: &str, q_level: u8) {
    if q_level == 0 {
        print(&rule("─", Some(msg)));
    }
}

pub fn fat_separator() {
    print(&rule("═", None));
}

pub fn centerln(msg: &str) {
    let pad = TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2;
    print(&format!("{}{msg}", " ".repeat(pad)));
}

/// Dotted leader from `key` to the value column at `width`.
fn leader(key: &str, width: usize) -> String {
    format!(
        "{}{}",
        ".".repeat(width.saturating_sub(key.len())).color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    )
}

/// `> key.....: value` lines with the values lined up.
pub fn aligned_block(rows: &[(&str, ColoredString)]) {
    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0) + 1;
    for (key, value) in rows {
        print(&format!(
            "{} {}{} {value}",
            ">".color(colors::SEPARATOR),
            key.color(colors::PRIMARY),
            leader(key, width)
        ));
    }
}

pub fn status(msg: &str) {
    print(&format!("{} {}", ">".color(colors::SEPARATOR), msg));
}

/// `[n] name` followed by one branch per detail row.
pub fn device_tree(position: usize, name: &str, details: &[(String, ColoredString)]) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        position.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));

    let width = details.iter().map(|(key, _)| key.len()).max().unwrap_or(0) + 1;
    for (i, (key, value)) in details.iter().enumerate() {
        let branch = if i + 1 == details.len() { "└─" } else { "├─" };
        print(&format!(
            " {} {}{} {value}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            leader(key, width)
        ));
    }
}

const NO_RESULTS: &str = r#"
         _   _  ___    ____  _______     _____ ____ _____ ____
        | \ | |/ _ \  |  _ \| ____\ \   / /_ _/ ___| ____/ ___|
        |  \| | | | | | | | |  _|  \ \ / / | | |   |  _| \___ \
        | |\  | |_| | | |_| | |___  \ V /  | | |___| |___ ___) |
        |_| \_|\___/  |____/|_____|  \_/  |___\____|_____|____/
"#;

pub fn no_results() {
    print(&NO_RESULTS.red().bold().to_string());
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
