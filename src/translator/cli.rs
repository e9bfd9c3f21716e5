// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing and argument validation.

use std::path::PathBuf;

use clap::Parser;

use crate::core::error::{TranslateError, TranslateErrorKind, TranslateRunError};

pub const VERSION: &str = "0.1";

const LONG_ABOUT: &str = "LuaASM to NASM translator.

Reads a LuaASM source file and writes NASM-style assembly text to the output
path. The run is all-or-nothing: the first syntax error aborts the
translation and no output file is written.";

#[derive(Parser, Debug)]
#[command(
    name = "luaforge",
    version = VERSION,
    about = "LuaASM to NASM translator",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(value_name = "INPUT", help = "Input LuaASM file to parse")]
    pub input: PathBuf,
    #[arg(
        value_name = "OUTPUT",
        help = "Output path for the generated assembly code"
    )]
    pub output: PathBuf,
}

/// Validated CLI configuration.
#[derive(Debug)]
pub struct CliConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Validate CLI arguments and return parsed configuration.
pub fn validate_cli(cli: &Cli) -> Result<CliConfig, TranslateRunError> {
    if cli.input == cli.output {
        return Err(TranslateRunError::new(
            TranslateError::new(
                TranslateErrorKind::Cli,
                "Input and output paths must differ",
                None,
            ),
            Vec::new(),
            Vec::new(),
        ));
    }
    Ok(CliConfig {
        input: cli.input.clone(),
        output: cli.output.clone(),
    })
}
