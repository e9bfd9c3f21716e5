// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Dialect-agnostic translator core.
//!
//! # Components
//!
//! - [`text_utils`] - Text processing utilities (cursor, identifiers)
//! - [`parser`] - Line classification into tagged shapes
//! - [`program`] - The Program Model built up during parsing
//! - [`codegen`] - Serialization of the Program Model into NASM text
//! - [`error`] - Error types, diagnostics, and run reporting
//! - [`parser_reporter`] - Parse error rendering with source context

pub mod codegen;
pub mod error;
pub mod parser;
pub mod parser_reporter;
pub mod program;
pub mod text_utils;

// Re-exports for convenience
pub use error::{TranslateError, TranslateErrorKind, TranslateRunError, TranslateRunReport};
pub use parser::{classify, LineShape, ParseError, Span};
pub use program::{Function, InlineAsm, LayoutKey, Program};
