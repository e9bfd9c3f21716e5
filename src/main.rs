// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for luaforge.

fn main() {
    let use_color = std::env::var("NO_COLOR").is_err();
    match luaforge::translator::run() {
        Ok(report) => {
            for diag in report.diagnostics() {
                eprintln!(
                    "{}",
                    diag.format_with_context(Some(report.source_lines()), use_color)
                );
            }
            if let Some(path) = report.output_path() {
                println!("Output written to {}", path.display());
            }
        }
        Err(err) => {
            for diag in err.diagnostics() {
                eprintln!(
                    "{}",
                    diag.format_with_context(Some(err.source_lines()), use_color)
                );
            }
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
