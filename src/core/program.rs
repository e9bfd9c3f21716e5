// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! The Program Model built up by parsing one LuaASM source.

use std::collections::HashMap;

use crate::core::parser::LineShape;

/// Layout directive keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKey {
    Start,
    Pad,
    Sign,
}

impl LayoutKey {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Self::Start),
            "pad" => Some(Self::Pad),
            "sign" => Some(Self::Sign),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pad => "pad",
            Self::Sign => "sign",
        }
    }
}

/// Layout directive values, kept as source text. Every key is always
/// present; the value is empty until set, and re-declaration overwrites.
#[derive(Debug, Default, Clone)]
pub struct Directives {
    start: Option<String>,
    pad: Option<String>,
    sign: Option<String>,
}

impl Directives {
    pub fn set(&mut self, key: LayoutKey, value: String) {
        let slot = match key {
            LayoutKey::Start => &mut self.start,
            LayoutKey::Pad => &mut self.pad,
            LayoutKey::Sign => &mut self.sign,
        };
        *slot = Some(value);
    }

    pub fn get(&self, key: LayoutKey) -> Option<&str> {
        match key {
            LayoutKey::Start => self.start.as_deref(),
            LayoutKey::Pad => self.pad.as_deref(),
            LayoutKey::Sign => self.sign.as_deref(),
        }
    }
}

/// A parsed function definition. The body holds raw statement lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<String>,
}

/// An inline assembly line: the original bracketed line and the stripped
/// fragment emitted at generation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAsm {
    pub raw: String,
    pub fragment: String,
}

/// In-memory model of one translation. Created empty, populated by the
/// parse pass, read-only for the generator, discarded after the run.
#[derive(Debug, Default)]
pub struct Program {
    architecture: Option<String>,
    directives: Directives,
    imports: HashMap<String, String>,
    functions: Vec<Function>,
    current_function: Option<Function>,
    free_statements: Vec<String>,
    inline_asm: Vec<InlineAsm>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one classified line to the model. Total: every shape maps to
    /// exactly one mutation.
    pub fn apply(&mut self, shape: LineShape) {
        match shape {
            LineShape::Import { bindings } => {
                for binding in bindings {
                    self.bind_import(binding.name, binding.source);
                }
            }
            LineShape::ArchDirective { tag } => self.set_architecture(tag),
            LineShape::LayoutDirective { key, value } => self.set_directive(key, value),
            LineShape::FunctionStart { name, params } => self.open_function(name, params),
            LineShape::FunctionEnd => {
                self.close_function();
            }
            LineShape::InlineAsm { raw, fragment } => self.push_inline_asm(raw, fragment),
            LineShape::Call { text } | LineShape::FreeStatement { text } => {
                self.push_statement(text)
            }
        }
    }

    /// Bind a name to its source description. Last declaration wins.
    pub fn bind_import(&mut self, name: String, source: String) {
        self.imports.insert(name, source);
    }

    /// A later architecture directive overwrites an earlier one.
    pub fn set_architecture(&mut self, tag: String) {
        self.architecture = Some(tag);
    }

    pub fn set_directive(&mut self, key: LayoutKey, value: String) {
        self.directives.set(key, value);
    }

    /// Open a function definition. A second `function` line while one is
    /// open overwrites the in-progress record; there is no definition stack.
    pub fn open_function(&mut self, name: String, params: Vec<String>) {
        self.current_function = Some(Function {
            name,
            params,
            body: Vec::new(),
        });
    }

    /// Move the open function into the function table, keeping the position
    /// of an earlier definition with the same name. Returns false (no-op)
    /// when nothing is open.
    pub fn close_function(&mut self) -> bool {
        let Some(func) = self.current_function.take() else {
            return false;
        };
        if let Some(existing) = self.functions.iter_mut().find(|f| f.name == func.name) {
            *existing = func;
        } else {
            self.functions.push(func);
        }
        true
    }

    /// Append a raw statement to the open function's body, or to the free
    /// statement list when no function is open.
    pub fn push_statement(&mut self, text: String) {
        match &mut self.current_function {
            Some(func) => func.body.push(text),
            None => self.free_statements.push(text),
        }
    }

    pub fn push_inline_asm(&mut self, raw: String, fragment: String) {
        self.inline_asm.push(InlineAsm { raw, fragment });
    }

    pub fn architecture(&self) -> Option<&str> {
        self.architecture.as_deref()
    }

    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    pub fn import(&self, name: &str) -> Option<&str> {
        self.imports.get(name).map(|s| s.as_str())
    }

    pub fn imports(&self) -> &HashMap<String, String> {
        &self.imports
    }

    /// Closed functions, in insertion order.
    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Name of the function still under construction, if any.
    pub fn open_function_name(&self) -> Option<&str> {
        self.current_function.as_ref().map(|f| f.name.as_str())
    }

    pub fn free_statements(&self) -> &[String] {
        &self.free_statements
    }

    pub fn inline_asm(&self) -> &[InlineAsm] {
        &self.inline_asm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::classify;

    fn apply_lines(program: &mut Program, lines: &[&str]) {
        for (idx, line) in lines.iter().enumerate() {
            let shape = classify(line, idx as u32 + 1).expect("line should classify");
            program.apply(shape);
        }
    }

    #[test]
    fn import_rebinding_last_wins() {
        let mut program = Program::new();
        apply_lines(
            &mut program,
            &["import add from math", "import add from vector"],
        );
        assert_eq!(program.import("add"), Some("vector"));
        assert_eq!(program.imports().len(), 1);
    }

    #[test]
    fn later_architecture_overwrites() {
        let mut program = Program::new();
        apply_lines(&mut program, &["#!arch[x86]", "#!arch[x64]"]);
        assert_eq!(program.architecture(), Some("x64"));
    }

    #[test]
    fn directive_redeclaration_overwrites() {
        let mut program = Program::new();
        apply_lines(&mut program, &["#![pad(16)]", "#![pad(0x100)]"]);
        assert_eq!(program.directives().get(LayoutKey::Pad), Some("0x100"));
        assert_eq!(program.directives().get(LayoutKey::Start), None);
    }

    #[test]
    fn function_definition_records_params_and_body() {
        let mut program = Program::new();
        apply_lines(
            &mut program,
            &["function add(a, b)", "add(a, b)", "mov eax, 1", "end"],
        );
        assert!(program.open_function_name().is_none());
        let func = program.function("add").expect("add should be defined");
        assert_eq!(func.params, vec!["a", "b"]);
        assert_eq!(func.body, vec!["add(a, b)", "mov eax, 1"]);
        assert!(program.free_statements().is_empty());
    }

    #[test]
    fn stray_end_is_a_noop() {
        let mut program = Program::new();
        apply_lines(&mut program, &["end", "end"]);
        assert!(!program.close_function());
        assert!(program.functions().is_empty());
    }

    #[test]
    fn second_function_line_overwrites_open_record() {
        let mut program = Program::new();
        apply_lines(
            &mut program,
            &["function lost(a)", "lost(a)", "function kept(b)", "end"],
        );
        assert_eq!(program.functions().len(), 1);
        assert!(program.function("lost").is_none());
        let kept = program.function("kept").expect("kept should be defined");
        assert_eq!(kept.params, vec!["b"]);
        assert!(kept.body.is_empty());
    }

    #[test]
    fn redefined_function_keeps_original_position() {
        let mut program = Program::new();
        apply_lines(
            &mut program,
            &[
                "function first()",
                "end",
                "function second()",
                "end",
                "function first(x)",
                "end",
            ],
        );
        let names: Vec<&str> = program.functions().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(program.function("first").unwrap().params, vec!["x"]);
    }

    #[test]
    fn statements_outside_functions_keep_source_order() {
        let mut program = Program::new();
        apply_lines(&mut program, &["foo(1)", "mov eax, 2", "bar(3)"]);
        assert_eq!(
            program.free_statements(),
            &["foo(1)", "mov eax, 2", "bar(3)"]
        );
    }

    #[test]
    fn unterminated_function_stays_out_of_table() {
        let mut program = Program::new();
        apply_lines(&mut program, &["function pending(a)", "pending(a)"]);
        assert_eq!(program.open_function_name(), Some("pending"));
        assert!(program.function("pending").is_none());
    }

    #[test]
    fn inline_asm_keeps_raw_and_fragment() {
        let mut program = Program::new();
        apply_lines(&mut program, &["asm( int 0x80 )"]);
        let blocks = program.inline_asm();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].raw, "asm( int 0x80 )");
        assert_eq!(blocks[0].fragment, "int 0x80");
    }

    #[test]
    fn layout_key_round_trips_names() {
        for name in ["start", "pad", "sign"] {
            assert_eq!(LayoutKey::from_name(name).unwrap().as_str(), name);
        }
        assert!(LayoutKey::from_name("org").is_none());
    }
}
