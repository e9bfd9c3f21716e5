// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! LuaASM translator - main entry point.
//!
//! Ties the line classifier, the Program Model, and the code generator
//! together: the parse pass runs to completion over all input lines, then
//! the generator serializes the finished model once.

pub mod cli;

use std::fs;
use std::path::Path;

use clap::Parser;

use crate::core::codegen::generate;
use crate::core::error::{
    Diagnostic, Severity, TranslateError, TranslateErrorKind, TranslateRunError,
    TranslateRunReport,
};
use crate::core::parser::classify;
use crate::core::program::Program;

use cli::{validate_cli, Cli, CliConfig};

// Re-export public types
pub use crate::core::error::{TranslateRunError as RunError, TranslateRunReport as RunReport};
pub use cli::VERSION;

/// Run the translator with command-line arguments.
pub fn run() -> Result<TranslateRunReport, TranslateRunError> {
    let cli = Cli::parse();
    let config = validate_cli(&cli)?;
    run_one(&config)
}

/// Translate one input file to one output file.
pub fn run_one(config: &CliConfig) -> Result<TranslateRunReport, TranslateRunError> {
    let source = fs::read_to_string(&config.input)
        .map_err(|_| io_run_error("Error reading input file", &config.input))?;
    let source_lines: Vec<String> = source.lines().map(|s| s.to_string()).collect();

    let mut translation = Translation::new(Some(config.input.to_string_lossy().to_string()));
    translation.parse(&source_lines)?;

    let output_text = generate(translation.program());
    fs::write(&config.output, output_text.as_bytes())
        .map_err(|_| io_run_error("Error writing output file", &config.output))?;

    Ok(TranslateRunReport::new(
        translation.take_diagnostics(),
        source_lines,
        Some(config.output.clone()),
    ))
}

/// Translate LuaASM source text to NASM text in memory.
pub fn translate_source(source: &str) -> Result<String, TranslateRunError> {
    let lines: Vec<String> = source.lines().map(|s| s.to_string()).collect();
    let mut translation = Translation::new(None);
    translation.parse(&lines)?;
    Ok(generate(translation.program()))
}

fn io_run_error(msg: &str, path: &Path) -> TranslateRunError {
    TranslateRunError::new(
        TranslateError::new(
            TranslateErrorKind::Io,
            msg,
            Some(path.to_string_lossy().as_ref()),
        ),
        Vec::new(),
        Vec::new(),
    )
}

/// State for one translation pass. Owns the Program Model exclusively; one
/// instance per run, never shared.
pub struct Translation {
    program: Program,
    diagnostics: Vec<Diagnostic>,
    file: Option<String>,
}

impl Translation {
    pub fn new(file: Option<String>) -> Self {
        Self {
            program: Program::new(),
            diagnostics: Vec::new(),
            file,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Classify and apply every line. Fail-fast: the first syntax error
    /// aborts the pass and no partial model reaches the generator.
    pub fn parse(&mut self, lines: &[String]) -> Result<(), TranslateRunError> {
        for (idx, raw) in lines.iter().enumerate() {
            let line_num = idx as u32 + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            match classify(trimmed, line_num) {
                Ok(shape) => self.program.apply(shape),
                Err(mut parse_err) => {
                    if parse_err.span.col_start > 0 {
                        // classification saw the trimmed line
                        parse_err.span.col_start += raw.len() - raw.trim_start().len();
                    }
                    let error =
                        TranslateError::new(TranslateErrorKind::Syntax, &parse_err.message, None);
                    let column = (parse_err.span.col_start > 0).then_some(parse_err.span.col_start);
                    self.diagnostics.push(
                        Diagnostic::new(line_num, Severity::Error, error.clone())
                            .with_column(column)
                            .with_file(self.file.clone())
                            .with_parser_error(Some(parse_err)),
                    );
                    return Err(TranslateRunError::new(
                        error,
                        std::mem::take(&mut self.diagnostics),
                        lines.to_vec(),
                    ));
                }
            }
        }

        if let Some(name) = self.program.open_function_name() {
            let warn = TranslateError::new(
                TranslateErrorKind::Syntax,
                "Found function without end",
                Some(name),
            );
            self.diagnostics.push(
                Diagnostic::new(lines.len() as u32, Severity::Warning, warn)
                    .with_file(self.file.clone()),
            );
        }
        Ok(())
    }
}
