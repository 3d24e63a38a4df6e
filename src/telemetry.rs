//! Log output, as GitHub Actions workflow commands when running inside a workflow.
//!
//! See: [`init_logging`], [`add_mask`]

use std::{fmt, io};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer as _,
    fmt::{FmtContext, FormatEvent, FormatFields, format::Writer},
    layer::SubscriberExt as _,
    registry::LookupSpan,
    util::{SubscriberInitExt as _, TryInitError},
};

/// Checks if the process runs inside a GitHub Actions workflow.
pub fn in_github_actions() -> bool {
    is_github_actions(std::env::var("GITHUB_ACTIONS").ok().as_deref())
}

/// Checks a `GITHUB_ACTIONS` value. The runner sets it to `true`.
pub fn is_github_actions(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Escapes a value embedded in a workflow command.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Asks the runner to redact `secret` from every following log line.
///
/// The runner only reads workflow commands from stdout, so `writer` is stdout outside of tests.
///
/// # Errors
///
/// Returns an [`io::Error`] if writing the command fails.
pub fn add_mask<W>(writer: &mut W, secret: &str) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(writer, "::add-mask::{}", escape_data(secret))
}

/// Formats events as workflow commands: warnings and errors become annotations, debug lines are only shown with step debugging.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionsFormat;

impl<S, N> FormatEvent<S, N> for ActionsFormat
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
        let mut message = String::new();
        ctx.field_format()
            .format_fields(Writer::new(&mut message), event)?;

        let command = match *event.metadata().level() {
            Level::ERROR => "error",
            Level::WARN => "warning",
            Level::INFO => return writeln!(writer, "{message}"),
            _ => "debug",
        };
        writeln!(writer, "::{command}::{}", escape_data(&message))
    }
}

/// Installs the global subscriber. The filter comes from `RUST_LOG` and defaults to `info`.
///
/// # Errors
///
/// Returns a [`TryInitError`] if a global subscriber is already installed.
pub fn init_logging(in_github_actions: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if in_github_actions {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(ActionsFormat)
                    .with_writer(io::stdout)
                    .with_filter(filter),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stderr)
                    .with_filter(filter),
            )
            .try_init()
    }
}

/// An in-memory log sink for tests.
#[cfg(test)]
pub(crate) mod capture {
    use std::{io, sync::Arc};

    use parking_lot::Mutex;
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    use super::ActionsFormat;

    #[derive(Debug, Clone, Default)]
    pub(crate) struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        pub(crate) fn output(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }

        /// Runs `f` with every event rendered as a workflow command into this capture.
        pub(crate) fn run<F, R>(&self, f: F) -> R
        where
            F: FnOnce() -> R,
        {
            let subscriber = tracing_subscriber::fmt()
                .event_format(ActionsFormat)
                .with_writer(self.clone())
                .with_max_level(Level::DEBUG)
                .finish();
            tracing::subscriber::with_default(subscriber, f)
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }
}
