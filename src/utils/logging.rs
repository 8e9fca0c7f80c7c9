//! Status-line output.
//!
//! Every event is printed as a single `[Label] message` line. The label comes
//! from the event level, except that an info event recorded with
//! `status = "success"` is printed as `[Success]`.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Field name that overrides the level label.
pub const STATUS_FIELD: &str = "status";

pub fn status_label(level: &Level, status: Option<&str>) -> &'static str {
    if *level == Level::ERROR {
        "Error"
    } else if *level == Level::WARN {
        "Warning"
    } else if *level == Level::INFO {
        match status {
            Some("success") => "Success",
            _ => "Info",
        }
    } else if *level == Level::DEBUG {
        "Debug"
    } else {
        "Trace"
    }
}

#[derive(Default)]
struct StatusVisitor {
    message: String,
    status: Option<String>,
    fields: String,
}

impl Visit for StatusVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            STATUS_FIELD => self.status = Some(value.to_string()),
            "message" => self.message.push_str(value),
            name => {
                let _ = write!(self.fields, " {}={}", name, value);
            }
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => {
                let _ = write!(self.message, "{:?}", value);
            }
            STATUS_FIELD => self.status = Some(format!("{:?}", value)),
            name => {
                let _ = write!(self.fields, " {}={:?}", name, value);
            }
        }
    }
}

/// Event formatter producing `[Info] ...` style lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusFormat;

impl<S, N> FormatEvent<S, N> for StatusFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = StatusVisitor::default();
        event.record(&mut visitor);

        let label = status_label(event.metadata().level(), visitor.status.as_deref());
        writeln!(writer, "[{}] {}{}", label, visitor.message, visitor.fields)
    }
}

/// Install the global subscriber. `RUST_LOG` may add directives; the crate
/// itself logs at info and above unless told otherwise.
pub fn init() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("price_tracker=info".parse()?),
        )
        .event_format(StatusFormat)
        .init();
    Ok(())
}
