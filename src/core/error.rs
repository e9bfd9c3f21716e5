// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types, diagnostics, and reporting for the translator.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::parser::ParseError;
use crate::core::parser_reporter::{format_parse_error, highlight_line};

/// Categories of translator errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateErrorKind {
    Cli,
    Io,
    Syntax,
}

/// A translator error with a kind and message.
#[derive(Debug, Clone)]
pub struct TranslateError {
    kind: TranslateErrorKind,
    message: String,
}

impl TranslateError {
    pub fn new(kind: TranslateErrorKind, msg: &str, param: Option<&str>) -> Self {
        Self {
            kind,
            message: format_error(msg, param),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> TranslateErrorKind {
        self.kind
    }
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TranslateError {}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A diagnostic message with location and context.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub(crate) line: u32,
    pub(crate) column: Option<usize>,
    pub(crate) severity: Severity,
    pub(crate) error: TranslateError,
    pub(crate) file: Option<String>,
    pub(crate) parser_error: Option<ParseError>,
}

impl Diagnostic {
    pub fn new(line: u32, severity: Severity, error: TranslateError) -> Self {
        Self {
            line,
            column: None,
            severity,
            error,
            file: None,
            parser_error: None,
        }
    }

    pub fn with_column(mut self, column: Option<usize>) -> Self {
        self.column = column;
        self
    }

    pub fn with_file(mut self, file: Option<String>) -> Self {
        self.file = file;
        self
    }

    pub fn with_parser_error(mut self, parser_error: Option<ParseError>) -> Self {
        self.parser_error = parser_error;
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn format(&self) -> String {
        let sev = match self.severity {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        format!("{}: {} - {}", self.line, sev, self.error.message())
    }

    pub fn format_with_context(&self, lines: Option<&[String]>, use_color: bool) -> String {
        if let Some(parser_error) = &self.parser_error {
            return format_parse_error(parser_error, self.file.as_deref(), lines, use_color);
        }
        let sev = match self.severity {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        let header = match &self.file {
            Some(file) => format!("{file}:{}: {sev}", self.line),
            None => format!("{}: {sev}", self.line),
        };

        let mut out = String::new();
        out.push_str(&header);
        out.push('\n');

        for line in build_context_lines(self.line, self.column, lines, use_color) {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&format!("{sev}: {}", self.error.message()));
        out
    }
}

/// Report from a successful translation run.
#[derive(Debug)]
pub struct TranslateRunReport {
    diagnostics: Vec<Diagnostic>,
    source_lines: Vec<String>,
    output_path: Option<PathBuf>,
}

impl TranslateRunReport {
    pub fn new(
        diagnostics: Vec<Diagnostic>,
        source_lines: Vec<String>,
        output_path: Option<PathBuf>,
    ) -> Self {
        Self {
            diagnostics,
            source_lines,
            output_path,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}

/// Error from a failed translation run.
#[derive(Debug)]
pub struct TranslateRunError {
    error: TranslateError,
    diagnostics: Vec<Diagnostic>,
    source_lines: Vec<String>,
}

impl TranslateRunError {
    pub fn new(
        error: TranslateError,
        diagnostics: Vec<Diagnostic>,
        source_lines: Vec<String>,
    ) -> Self {
        Self {
            error,
            diagnostics,
            source_lines,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }
}

impl fmt::Display for TranslateRunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for TranslateRunError {}

/// Build context lines for error display.
pub fn build_context_lines(
    line_num: u32,
    column: Option<usize>,
    lines: Option<&[String]>,
    use_color: bool,
) -> Vec<String> {
    let line_idx = line_num.saturating_sub(1) as usize;
    let line_text = lines
        .and_then(|lines| lines.get(line_idx))
        .map(|s| s.as_str());
    match line_text {
        Some(line) => {
            let display = highlight_line(line, column.unwrap_or(0), use_color);
            vec![format!("{:>5} | {}", line_num, display)]
        }
        None => vec![format!("{:>5} | <source unavailable>", line_num)],
    }
}

/// Format an error message with an optional parameter.
pub fn format_error(msg: &str, param: Option<&str>) -> String {
    match param {
        Some(p) => format!("{msg}: {p}"),
        None => msg.to_string(),
    }
}
