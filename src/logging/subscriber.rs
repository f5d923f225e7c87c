//! Tracing subscriber setup: console formatter and initialisation.
use std::io::IsTerminal as _;

use super::STAGE_TARGET;

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// Render one console line for an event.
///
/// Stage headers get a `==>` marker, warnings and errors a level prefix,
/// debug output is dimmed. Colour codes are only emitted when `color` is set.
pub(super) fn format_line(level: tracing::Level, target: &str, msg: &str, color: bool) -> String {
    let paint = |code: &str, text: &str| {
        if color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    };

    match level {
        tracing::Level::ERROR => format!("{} {msg}", paint("31", "ERROR")),
        tracing::Level::WARN => format!("{}  {msg}", paint("33", "WARN")),
        tracing::Level::INFO if target == STAGE_TARGET => {
            format!("{} {}", paint("1;34", "==>"), paint("1", msg))
        }
        tracing::Level::INFO => format!("  {msg}"),
        _ => format!("  {}", paint("2", msg)),
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits hwconfig-style
/// console output.
struct HwConfigFormatter {
    color: bool,
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for HwConfigFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        writeln!(
            writer,
            "{}",
            format_line(
                *metadata.level(),
                metadata.target(),
                &extractor.message,
                self.color
            )
        )
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// All output goes to stderr so stdout carries nothing but the JSON result.
/// The level is `info` (or `debug` with `verbose`) unless `HWCONFIG_LOG`
/// holds an [`EnvFilter`](tracing_subscriber::EnvFilter) directive.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::{
        EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("HWCONFIG_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .event_format(HwConfigFormatter {
            color: std::io::stderr().is_terminal(),
        })
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
