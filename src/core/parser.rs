// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// Line classifier for LuaASM source.

use crate::core::program::LayoutKey;
use crate::core::text_utils::{is_word_char, Cursor};

/// Location of a parse error within the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: u32,
    /// 1-based column; 0 when unknown.
    pub col_start: usize,
}

impl Span {
    pub fn new(line: u32, col_start: usize) -> Self {
        Self { line, col_start }
    }
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    fn new(message: String, span: Span) -> Self {
        Self { message, span }
    }
}

/// A single import binding: bound name to source description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub name: String,
    pub source: String,
}

/// The shape of one trimmed, non-empty source line.
///
/// Classification is total: every line maps to exactly one variant, by the
/// fixed precedence in [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineShape {
    Import { bindings: Vec<ImportBinding> },
    ArchDirective { tag: String },
    LayoutDirective { key: LayoutKey, value: String },
    FunctionStart { name: String, params: Vec<String> },
    FunctionEnd,
    InlineAsm { raw: String, fragment: String },
    Call { text: String },
    FreeStatement { text: String },
}

/// Classify one trimmed, non-empty line. First match wins:
/// import, architecture, layout directive, function start, `end`,
/// inline assembly, call, free statement.
pub fn classify(line: &str, line_num: u32) -> Result<LineShape, ParseError> {
    if line.starts_with("import") || (line.starts_with("local ") && line.contains("import")) {
        return parse_import_line(line, line_num);
    }
    if line.starts_with("#!arch[") {
        return parse_architecture(line, line_num);
    }
    if line.starts_with("#![") {
        return parse_layout_directive(line, line_num);
    }
    if line.starts_with("function") {
        return parse_function_start(line, line_num);
    }
    if line == "end" {
        return Ok(LineShape::FunctionEnd);
    }
    if let Some(fragment) = strip_asm_envelope(line) {
        return Ok(LineShape::InlineAsm {
            raw: line.to_string(),
            fragment,
        });
    }
    if is_call_shaped(line) {
        return Ok(LineShape::Call {
            text: line.to_string(),
        });
    }
    Ok(LineShape::FreeStatement {
        text: line.to_string(),
    })
}

fn parse_import_line(line: &str, line_num: u32) -> Result<LineShape, ParseError> {
    let bindings = parse_single_import(line)
        .or_else(|| parse_multi_import(line))
        .or_else(|| parse_local_import(line));
    match bindings {
        Some(bindings) => Ok(LineShape::Import { bindings }),
        None => Err(ParseError::new(
            format!("Invalid import statement: {line}"),
            Span::new(line_num, 0),
        )),
    }
}

/// `import <name> from <module>`
fn parse_single_import(line: &str) -> Option<Vec<ImportBinding>> {
    let mut cur = Cursor::new(line);
    if cur.take_word()? != "import" {
        return None;
    }
    cur.skip_ws();
    let name = cur.take_word()?;
    cur.skip_ws();
    if cur.take_word()? != "from" {
        return None;
    }
    cur.skip_ws();
    let module = cur.take_word()?;
    cur.skip_ws();
    if !cur.at_end() {
        return None;
    }
    Some(vec![ImportBinding {
        name: name.to_string(),
        source: module.to_string(),
    }])
}

/// `import [<name>, <name>, ...] from <module>`
fn parse_multi_import(line: &str) -> Option<Vec<ImportBinding>> {
    let mut cur = Cursor::new(line);
    if cur.take_word()? != "import" {
        return None;
    }
    cur.skip_ws();
    if !cur.eat(b'[') {
        return None;
    }
    let rest = cur.rest();
    let close = rest.rfind(']')?;
    let names = &rest[..close];
    if names.trim().is_empty() {
        return None;
    }

    let mut tail = Cursor::new(&rest[close + 1..]);
    tail.skip_ws();
    if tail.take_word()? != "from" {
        return None;
    }
    tail.skip_ws();
    let module = tail.take_word()?;
    tail.skip_ws();
    if !tail.at_end() {
        return None;
    }

    Some(
        names
            .split(',')
            .map(|name| ImportBinding {
                name: name.trim().to_string(),
                source: module.to_string(),
            })
            .collect(),
    )
}

/// `local <alias> = import <name> from <module>`
fn parse_local_import(line: &str) -> Option<Vec<ImportBinding>> {
    let mut cur = Cursor::new(line);
    if cur.take_word()? != "local" {
        return None;
    }
    cur.skip_ws();
    let alias = cur.take_word()?;
    cur.skip_ws();
    if !cur.eat(b'=') {
        return None;
    }
    cur.skip_ws();
    if cur.take_word()? != "import" {
        return None;
    }
    cur.skip_ws();
    let name = cur.take_word()?;
    cur.skip_ws();
    if cur.take_word()? != "from" {
        return None;
    }
    cur.skip_ws();
    let module = cur.take_word()?;
    cur.skip_ws();
    if !cur.at_end() {
        return None;
    }
    Some(vec![ImportBinding {
        name: alias.to_string(),
        source: format!("{module}.{name}"),
    }])
}

/// `#!arch[<tag>]` - tag stored verbatim, case preserved.
fn parse_architecture(line: &str, line_num: u32) -> Result<LineShape, ParseError> {
    let inner = line
        .strip_prefix("#!arch[")
        .and_then(|rest| rest.strip_suffix(']'));
    match inner {
        Some(tag) if !tag.is_empty() => Ok(LineShape::ArchDirective {
            tag: tag.to_string(),
        }),
        _ => Err(ParseError::new(
            format!("Invalid architecture definition: {line}"),
            Span::new(line_num, 0),
        )),
    }
}

/// `#![<name>(<value>)]` with name in {start, pad, sign} and a decimal or
/// 0x-hex value.
fn parse_layout_directive(line: &str, line_num: u32) -> Result<LineShape, ParseError> {
    let err = |col: usize| {
        ParseError::new(
            format!("Invalid directive format: {line}"),
            Span::new(line_num, col),
        )
    };
    let Some(body) = line
        .strip_prefix("#![")
        .and_then(|rest| rest.strip_suffix(")]"))
    else {
        return Err(err(0));
    };
    let Some((name, value)) = body.split_once('(') else {
        return Err(err(0));
    };
    let Some(key) = LayoutKey::from_name(name) else {
        return Err(err(4));
    };
    if !is_numeral(value) {
        // column of the value: "#![" + name + "(", 1-based
        return Err(err(3 + name.len() + 2));
    }
    Ok(LineShape::LayoutDirective {
        key,
        value: value.to_string(),
    })
}

/// `function <name>(<params>)`
fn parse_function_start(line: &str, line_num: u32) -> Result<LineShape, ParseError> {
    let err = || {
        ParseError::new(
            format!("Invalid function definition: {line}"),
            Span::new(line_num, 0),
        )
    };
    let mut cur = Cursor::new(line);
    if cur.take_word() != Some("function") {
        return Err(err());
    }
    cur.skip_ws();
    let Some(name) = cur.take_word() else {
        return Err(err());
    };
    if !cur.eat(b'(') {
        return Err(err());
    }
    let rest = cur.rest();
    let Some(close) = rest.rfind(')') else {
        return Err(err());
    };
    if close != rest.len() - 1 {
        return Err(err());
    }
    let params_str = &rest[..close];
    let params = if params_str.trim().is_empty() {
        Vec::new()
    } else {
        params_str.split(',').map(|p| p.trim().to_string()).collect()
    };
    Ok(LineShape::FunctionStart {
        name: name.to_string(),
        params,
    })
}

/// `asm(<fragment>)` - returns the trimmed fragment.
fn strip_asm_envelope(line: &str) -> Option<String> {
    let fragment = line.strip_prefix("asm(")?.strip_suffix(')')?;
    Some(fragment.trim().to_string())
}

/// Word characters immediately followed by a parenthesized list spanning the
/// whole line.
fn is_call_shaped(line: &str) -> bool {
    let Some(open) = line.find('(') else {
        return false;
    };
    open > 0
        && line.as_bytes()[..open].iter().all(|&c| is_word_char(c))
        && line.ends_with(')')
}

fn is_numeral(s: &str) -> bool {
    if let Some(hex) = s.strip_prefix("0x") {
        return !hex.is_empty() && hex.bytes().all(|c| c.is_ascii_hexdigit());
    }
    !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit())
}
