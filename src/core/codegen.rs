// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! NASM text generation from a completed Program Model.
//!
//! Emission order is fixed: bit-width header, origin, entry scaffold, free
//! statements, function bodies, inline assembly, padding, signature. The
//! entry scaffold and function bodies are constant instruction sequences;
//! recorded parameters and body statements are not consulted (kept for
//! output compatibility, see DESIGN.md).

use crate::core::program::{LayoutKey, Program};

const ENTRY_LABEL: &str = "_start:";

const ENTRY_SCAFFOLD: [&str; 5] = [
    "  push 2",
    "  push 3",
    "  push 5",
    "  call add",
    "  add esp, 12",
];

const FUNCTION_BODY: [&str; 4] = [
    "  mov eax, [esp + 4]",
    "  add eax, [esp + 8]",
    "  add eax, [esp + 12]",
    "  ret",
];

/// Map an architecture tag to its bit-width declaration, case-insensitively.
/// Unrecognized tags fall back to 32-bit.
fn bits_header(tag: &str) -> &'static str {
    match tag.to_ascii_lowercase().as_str() {
        "x86" => "BITS 32",
        "x64" => "BITS 64",
        "x16" => "BITS 16",
        _ => "BITS 32",
    }
}

/// Serialize the model into NASM text. Deterministic; lines joined with
/// newlines, no trailing newline.
pub fn generate(program: &Program) -> String {
    let mut out: Vec<String> = Vec::new();

    if let Some(arch) = program.architecture() {
        out.push(bits_header(arch).to_string());
    }
    if let Some(start) = program.directives().get(LayoutKey::Start) {
        out.push(format!("ORG {start}"));
    }

    out.push(ENTRY_LABEL.to_string());
    out.extend(ENTRY_SCAFFOLD.iter().map(|s| s.to_string()));

    for stmt in program.free_statements() {
        out.push(format!("  {stmt}"));
    }

    for func in program.functions() {
        out.push(format!("{}:", func.name));
        out.extend(FUNCTION_BODY.iter().map(|s| s.to_string()));
    }

    for block in program.inline_asm() {
        out.push(format!("  {}", block.fragment));
    }

    if let Some(pad) = program.directives().get(LayoutKey::Pad) {
        out.push(format!("  times {pad} - ($ - $$) db 0"));
    }
    if let Some(sign) = program.directives().get(LayoutKey::Sign) {
        out.push(format!("  dw {sign}  ; Signature"));
    }

    out.join("\n")
}
