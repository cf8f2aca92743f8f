//! Output and error channels.

use core::fmt::{self, Write};

use super::ansi;
use super::error::EngineError;

/// Function signature for output handlers.
///
/// Receives text from the engine and forwards it to the transport
/// (UART, USB CDC, ...). Must not block.
pub type WriterFn = fn(&str);

/// How error reports are decorated before reaching the error writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorStyle {
    /// Message only.
    #[default]
    Plain,
    /// Yellow and bold, attributes cleared afterwards.
    Highlighted,
}

/// The two writer callbacks. Either may be absent, in which case that class
/// of output is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Writers {
    /// Regular output.
    pub output: Option<WriterFn>,
    /// Error reports.
    pub error: Option<WriterFn>,
    /// Decoration for [`error`](Self::error).
    pub error_style: ErrorStyle,
}

impl Writers {
    pub(crate) fn write(&self, text: &str) {
        if let Some(output) = self.output {
            output(text);
        }
    }

    pub(crate) fn write_error(&self, text: &str) {
        if let Some(error) = self.error {
            self.decorated(error, |sink| sink.write_str(text));
        }
    }

    pub(crate) fn write_error_fmt(&self, args: fmt::Arguments<'_>) {
        if let Some(error) = self.error {
            self.decorated(error, |sink| sink.write_fmt(args));
        }
    }

    /// Report an engine error as `CRLF message CRLF`.
    pub(crate) fn report(&self, error: &EngineError) {
        warn!("reporting {}", error);
        if let Some(sink) = self.error {
            self.decorated(sink, |w| {
                write!(w, "{}{}{}", ansi::CRLF, error, ansi::CRLF)
            });
        }
    }

    /// Report a name that matched neither a command nor an application.
    pub(crate) fn report_not_found(&self, name: &str) {
        warn!("reporting {}", EngineError::NotFound);
        if let Some(sink) = self.error {
            self.decorated(sink, |w| {
                write!(w, "{}Command '{}' not found{}", ansi::CRLF, name, ansi::CRLF)
            });
        }
    }

    fn decorated(&self, sink: WriterFn, body: impl FnOnce(&mut FnSink) -> fmt::Result) {
        let highlighted = self.error_style == ErrorStyle::Highlighted;
        if highlighted {
            sink(ansi::MAKE_YELLOW);
            sink(ansi::MAKE_BOLD);
        }
        let _ = body(&mut FnSink(sink));
        if highlighted {
            sink(ansi::CLEAR_ATTRIBUTES);
        }
    }
}

/// Adapts a [`WriterFn`] to `core::fmt::Write`, one call per fragment.
pub(crate) struct FnSink(pub(crate) WriterFn);

impl fmt::Write for FnSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        (self.0)(s);
        Ok(())
    }
}
