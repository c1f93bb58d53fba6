//! Log output on stderr
//!
//! Every line starts with a colorized one-letter level, e.g.
//! `[W] server unavailable endpoint=db1:9020`.

use std::fmt;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use super::LogLevel;

const PREFIX_COLOR: &str = "\x1b[93m";
const RESET: &str = "\x1b[0m";

/// Event formatter printing `[L] message fields`
#[derive(Debug, Default, Clone, Copy)]
pub struct LevelPrefix;

impl LevelPrefix {
    /// One-letter tag for a level
    pub fn letter(level: &Level) -> char {
        match *level {
            Level::ERROR => 'E',
            Level::WARN => 'W',
            Level::INFO => 'I',
            Level::DEBUG => 'D',
            Level::TRACE => 'T',
        }
    }
}

impl<S, N> FormatEvent<S, N> for LevelPrefix
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let letter = Self::letter(event.metadata().level());
        write!(writer, "{}[{}]{} ", PREFIX_COLOR, letter, RESET)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG`, when set, takes precedence over `--log-level`.
pub fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(LevelPrefix)
        .try_init();
}
