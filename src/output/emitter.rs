//! Severity-tagged terminal messages
//!
//! Each [`Severity`] maps to a fixed color, prefix and stream. Escapes are
//! written only when the emitter was built with color on, and always wrap the
//! whole message so nothing leaks into later output.

use std::fmt;
use std::io::{self, Write};

use colored::Color;

use super::Streams;

const RESET: &str = "\x1b[0m";

/// Message category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Raw text, no color, no trailing newline
    Plain,
    /// Neutral status (cyan)
    Info,
    /// Something completed (green)
    Success,
    /// Degraded but continuing (yellow, stderr)
    Warning,
    /// Failure (red, stderr)
    Error,
}

/// Destination stream of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
}

struct Style {
    color: Option<Color>,
    target: Target,
    prefix: &'static str,
    newline: bool,
}

impl Severity {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style {
                color: None,
                target: Target::Stdout,
                prefix: "",
                newline: false,
            },
            Self::Info => Style {
                color: Some(Color::Cyan),
                target: Target::Stdout,
                prefix: "",
                newline: true,
            },
            Self::Success => Style {
                color: Some(Color::Green),
                target: Target::Stdout,
                prefix: "",
                newline: true,
            },
            Self::Warning => Style {
                color: Some(Color::Yellow),
                target: Target::Stderr,
                prefix: "Warning: ",
                newline: true,
            },
            Self::Error => Style {
                color: Some(Color::Red),
                target: Target::Stderr,
                prefix: "Error: ",
                newline: true,
            },
        }
    }

    /// Stream this severity is written to
    #[must_use]
    pub fn target(self) -> Target {
        self.style().target
    }
}

/// Writes styled messages; color is fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emitter {
    color: bool,
}

impl Emitter {
    /// Create an emitter. `color` should already account for the terminal.
    #[must_use]
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    /// Build the exact bytes [`Emitter::emit`] would write
    #[must_use]
    pub fn format(&self, severity: Severity, args: fmt::Arguments<'_>) -> String {
        let style = severity.style();
        let escape = style.color.filter(|_| self.color);

        let mut msg = String::new();
        if let Some(color) = escape {
            msg.push_str(&open(color));
        }
        msg.push_str(style.prefix);
        msg.push_str(&fmt::format(args));
        if style.newline {
            msg.push('\n');
        }
        if escape.is_some() {
            msg.push_str(RESET);
        }
        msg
    }

    /// Write one message to the stream its severity selects, then flush it
    pub fn emit<O: Write, E: Write>(
        &self,
        streams: &mut Streams<O, E>,
        severity: Severity,
        args: fmt::Arguments<'_>,
    ) -> io::Result<()> {
        let msg = self.format(severity, args);
        let sink: &mut dyn Write = match severity.target() {
            Target::Stdout => &mut streams.out,
            Target::Stderr => &mut streams.err,
        };
        sink.write_all(msg.as_bytes())?;
        sink.flush()
    }

    /// Color a span of text for inline use
    #[must_use]
    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            format!("{}{text}{RESET}", open(color))
        } else {
            text.to_string()
        }
    }
}

fn open(color: Color) -> String {
    format!("\x1b[{}m", color.to_fg_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink whose every write fails the way a closed pipe does
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    const ALL: [Severity; 5] = [
        Severity::Plain,
        Severity::Info,
        Severity::Success,
        Severity::Warning,
        Severity::Error,
    ];

    #[test]
    fn test_error_with_color_wraps_message() {
        let mut streams = Streams::captured();
        Emitter::new(true)
            .emit(&mut streams, Severity::Error, format_args!("disk full"))
            .unwrap();

        assert_eq!(streams.err_text(), "\x1b[31mError: disk full\n\x1b[0m");
        assert!(streams.out.is_empty());
    }

    #[test]
    fn test_error_without_color_keeps_prefix() {
        let mut streams = Streams::captured();
        Emitter::new(false)
            .emit(&mut streams, Severity::Error, format_args!("disk {}", "full"))
            .unwrap();

        assert_eq!(streams.err_text(), "Error: disk full\n");
    }

    #[test]
    fn test_warning_goes_to_stderr() {
        let mut streams = Streams::captured();
        Emitter::new(false)
            .emit(&mut streams, Severity::Warning, format_args!("pid {} vanished", 42))
            .unwrap();

        assert_eq!(streams.err_text(), "Warning: pid 42 vanished\n");
        assert!(streams.out.is_empty());
    }

    #[test]
    fn test_info_and_success_go_to_stdout_unprefixed() {
        let mut streams = Streams::captured();
        let emitter = Emitter::new(true);
        emitter
            .emit(&mut streams, Severity::Info, format_args!("scanning"))
            .unwrap();
        emitter
            .emit(&mut streams, Severity::Success, format_args!("done"))
            .unwrap();

        assert_eq!(
            streams.out_text(),
            "\x1b[36mscanning\n\x1b[0m\x1b[32mdone\n\x1b[0m"
        );
        assert!(streams.err.is_empty());
    }

    #[test]
    fn test_plain_has_no_newline_or_color() {
        let emitter = Emitter::new(true);
        assert_eq!(emitter.format(Severity::Plain, format_args!("raw")), "raw");
    }

    #[test]
    fn test_no_escapes_when_color_disabled() {
        let emitter = Emitter::new(false);
        for severity in ALL {
            let msg = emitter.format(severity, format_args!("message"));
            assert!(!msg.contains('\x1b'), "{severity:?} leaked an escape");
        }
        assert_eq!(emitter.paint("x", Color::Red), "x");
    }

    #[test]
    fn test_exactly_one_trailing_newline() {
        let emitter = Emitter::new(false);
        for severity in ALL.into_iter().filter(|s| *s != Severity::Plain) {
            let msg = emitter.format(severity, format_args!("line"));
            assert!(msg.ends_with("line\n"));
            assert!(!msg.ends_with("\n\n"));
        }
    }

    #[test]
    fn test_paint_wraps_with_reset() {
        let emitter = Emitter::new(true);
        assert_eq!(emitter.paint("hdr", Color::Cyan), "\x1b[36mhdr\x1b[0m");
    }

    #[test]
    fn test_write_failure_on_stdout_is_returned() {
        let mut streams = Streams::new(ClosedPipe, Vec::<u8>::new());
        let err = Emitter::new(false)
            .emit(&mut streams, Severity::Info, format_args!("scanning"))
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(streams.err.is_empty());
    }

    #[test]
    fn test_write_failure_on_stderr_is_returned() {
        let mut streams = Streams::new(Vec::<u8>::new(), ClosedPipe);
        let err = Emitter::new(true)
            .emit(&mut streams, Severity::Error, format_args!("disk full"))
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(streams.out.is_empty());
    }

    #[test]
    fn test_targets() {
        assert_eq!(Severity::Error.target(), Target::Stderr);
        assert_eq!(Severity::Warning.target(), Target::Stderr);
        assert_eq!(Severity::Info.target(), Target::Stdout);
        assert_eq!(Severity::Success.target(), Target::Stdout);
        assert_eq!(Severity::Plain.target(), Target::Stdout);
    }
}
