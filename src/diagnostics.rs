/*
 * ==========================================================================
 * VERBOSE - Say What You Mean!
 * ==========================================================================
 * 
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * 
 * License:
 * This file is part of the VERBOSE programming language project.
 * 
 * VERBOSE is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */


/*!
 * Diagnostic sinks.
 *
 * The interpreter never prints. Every line of program output and every
 * log, warning and error event goes through a [`Sink`], which decides how
 * (and whether) to render it.
 */

use std::io::{self, Write};

use tracing::warn;

use crate::error::{ErrorKind, MessageArg};
use crate::locale::Catalog;
use crate::span::Span;

/// Informational events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// The CLI is starting; the argument is a timestamp.
    Initialized,
}

/// Non-fatal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A value-returning function ended without `RETURN`.
    MissingReturn,
}

/// Receiver of everything a Verbose program and its toolchain emit.
pub trait Sink {
    /// One line of program output (`Print`, `FizzBuzz`).
    fn emit_line(&mut self, line: &str);

    fn emit_log(&mut self, kind: LogKind, span: Span, args: &[MessageArg]);

    fn emit_warning(&mut self, kind: WarningKind, span: Span, args: &[MessageArg]);

    /// `buffered` is the raw source text around the failure, if any.
    fn emit_error(&mut self, kind: ErrorKind, span: Span, buffered: &str, args: &[MessageArg]);
}

/* ============================================================================
 * Console Sink
 * ============================================================================
 */

/// Renders events through a [`Catalog`] onto two writers.
///
/// Program output and logs go to `out`, warnings and errors to `err`.
/// When the source text is attached, each located error (other than stack
/// trace lines) is followed by an excerpt of the offending line:
///
/// ```text
/// [VE13] @ (2, 15): Division by zero!
///     |
///   2 | NUMBER x IS 1 / 0;
///     |               ^
/// ```
pub struct ConsoleSink<O: Write, E: Write> {
    out: O,
    err: E,
    catalog: Catalog,
    source: Option<String>,
}

impl ConsoleSink<io::Stdout, io::Stderr> {
    /// A sink on stdout / stderr with the built-in English catalog.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr(), Catalog::english())
    }
}

impl<O: Write, E: Write> ConsoleSink<O, E> {
    pub fn new(out: O, err: E, catalog: Catalog) -> Self {
        Self {
            out,
            err,
            catalog,
            source: None,
        }
    }

    /// Attaches the program text used for source excerpts.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Gives back the writers, e.g. to inspect in-memory buffers.
    pub fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }

    fn excerpt(&self, span: Span) -> Option<String> {
        let source = self.source.as_ref()?;
        let line = source.lines().nth(span.line.checked_sub(1)?)?;

        let mut underline = " ".repeat(span.column.saturating_sub(1));
        underline.push('^');

        Some(format!(
            "    |\n{:>3} | {}\n    | {}",
            span.line, line, underline
        ))
    }

    fn write(target: &mut dyn Write, text: &str) {
        // A broken output stream has nowhere left to be reported.
        if let Err(e) = writeln!(target, "{}", text).and_then(|_| target.flush()) {
            warn!("failed to write diagnostic: {}", e);
        }
    }
}

impl<O: Write, E: Write> Sink for ConsoleSink<O, E> {
    fn emit_line(&mut self, line: &str) {
        Self::write(&mut self.out, line);
    }

    fn emit_log(&mut self, kind: LogKind, span: Span, args: &[MessageArg]) {
        let template = self.catalog.log(&format!("{:?}", kind));
        let text = self.catalog.render(template, span, "", args);
        Self::write(&mut self.out, &text);
    }

    fn emit_warning(&mut self, kind: WarningKind, span: Span, args: &[MessageArg]) {
        let template = self.catalog.warning(&format!("{:?}", kind));
        let text = self.catalog.render(template, span, "", args);
        Self::write(&mut self.err, &text);
    }

    fn emit_error(&mut self, kind: ErrorKind, span: Span, buffered: &str, args: &[MessageArg]) {
        let template = self.catalog.error(&format!("{:?}", kind));
        let mut text = self.catalog.render(template, span, buffered, args);

        if !matches!(kind, ErrorKind::StackTrace | ErrorKind::NoSource) {
            if let Some(excerpt) = self.excerpt(span) {
                text.push('\n');
                text.push_str(&excerpt);
            }
        }
        Self::write(&mut self.err, &text);
    }
}

/* ============================================================================
 * Capture Sink
 * ============================================================================
 */

/// A recorded log, warning or error.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Log {
        kind: LogKind,
        span: Span,
        args: Vec<MessageArg>,
    },
    Warning {
        kind: WarningKind,
        span: Span,
        args: Vec<MessageArg>,
    },
    Error {
        kind: ErrorKind,
        span: Span,
        buffered: String,
        args: Vec<MessageArg>,
    },
}

/// Keeps everything in memory. Used by tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    pub lines: Vec<String>,
    pub events: Vec<Event>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All output lines joined without separators.
    pub fn output(&self) -> String {
        self.lines.concat()
    }

    /// Kinds of the recorded errors, in order.
    pub fn errors(&self) -> Vec<ErrorKind> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Error { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<WarningKind> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Warning { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }
}

impl Sink for CaptureSink {
    fn emit_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn emit_log(&mut self, kind: LogKind, span: Span, args: &[MessageArg]) {
        self.events.push(Event::Log {
            kind,
            span,
            args: args.to_vec(),
        });
    }

    fn emit_warning(&mut self, kind: WarningKind, span: Span, args: &[MessageArg]) {
        self.events.push(Event::Warning {
            kind,
            span,
            args: args.to_vec(),
        });
    }

    fn emit_error(&mut self, kind: ErrorKind, span: Span, buffered: &str, args: &[MessageArg]) {
        self.events.push(Event::Error {
            kind,
            span,
            buffered: buffered.to_string(),
            args: args.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(source: &str) -> ConsoleSink<Vec<u8>, Vec<u8>> {
        ConsoleSink::new(Vec::new(), Vec::new(), Catalog::english()).with_source(source)
    }

    #[test]
    fn output_lines_go_to_out() {
        let mut sink = console("");
        sink.emit_line("hello");
        let (out, err) = sink.into_writers();
        assert_eq!(String::from_utf8(out).unwrap(), "hello\n");
        assert!(err.is_empty());
    }

    #[test]
    fn errors_carry_a_source_excerpt() {
        let mut sink = console("NUMBER a IS 1;\nNUMBER x IS 1 / 0;");
        sink.emit_error(ErrorKind::DivisionByZero, Span::new(2, 15), "", &[]);
        let (_, err) = sink.into_writers();
        let text = String::from_utf8(err).unwrap();

        assert!(text.starts_with("[VE13] @ (2, 15): Division by zero!\n"));
        assert!(text.contains("  2 | NUMBER x IS 1 / 0;"));
        assert!(text.contains(&format!("    | {}^", " ".repeat(14))));
    }

    #[test]
    fn stack_traces_have_no_excerpt() {
        let mut sink = console("CALL f NOW;");
        sink.emit_error(ErrorKind::StackTrace, Span::new(1, 1), "", &["f".into()]);
        let (_, err) = sink.into_writers();
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "    Occured @ (1, 1) inside of 'f'...\n"
        );
    }

    #[test]
    fn capture_sink_records_in_order() {
        let mut sink = CaptureSink::new();
        sink.emit_line("1");
        sink.emit_line("2");
        sink.emit_error(ErrorKind::StackOverflow, Span::new(1, 1), "", &[]);
        assert_eq!(sink.output(), "12");
        assert_eq!(sink.errors(), vec![ErrorKind::StackOverflow]);
    }
}
