use std::fmt::{self, Write as _};

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::print::PRINT_TARGET;

/// Renders events as status lines: `[+]` success, `[*]` info, `[!]` warning,
/// `[-]` error. Events on [`PRINT_TARGET`] are written verbatim.
pub struct LanscoutFormatter;

#[derive(Default)]
struct StatusLine {
    message: String,
    raw: Option<String>,
    success: bool,
    extra: String,
}

impl Visit for StatusLine {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "raw_msg" => self.raw = Some(value.to_string()),
            "message" => self.message = value.to_string(),
            name => {
                let _ = write!(self.extra, " {name}={value}");
            }
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "success" => self.success = value,
            name => {
                let _ = write!(self.extra, " {name}={value}");
            }
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            name => {
                let _ = write!(self.extra, " {name}={value:?}");
            }
        }
    }
}

impl<S, N> FormatEvent<S, N> for LanscoutFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut line = StatusLine::default();
        event.record(&mut line);

        if meta.target() == PRINT_TARGET {
            if let Some(raw) = line.raw {
                return writeln!(writer, "{raw}");
            }
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO if line.success => ("[+]", |s| s.green().bold()),
            Level::INFO => ("[*]", |s| s.bright_blue().bold()),
            Level::WARN => ("[!]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} {}", color_func(symbol.into()), line.message)?;
        if !line.extra.is_empty() && *meta.level() >= Level::DEBUG {
            write!(writer, "{}", line.extra.dimmed())?;
        }
        writeln!(writer)
    }
}
