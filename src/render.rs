//! Rendering of generated scripts for the terminal and for export.

use crate::script::VideoScript;
use colored::Colorize;

/// Render a script as plain text in fixed field order.
///
/// Pure and deterministic; also the format written by `--output`.
pub fn script_to_text(script: &VideoScript) -> String {
    let mut out = String::new();

    out.push_str(&format!("TITLE: {}\n\n", script.title));
    out.push_str(&format!("HOOK:\n{}\n\n", script.hook));
    out.push_str(&format!("INTRODUCTION:\n{}\n\n", script.introduction));

    out.push_str("MAIN POINTS:\n");
    for (i, point) in script.main_points.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, point));
    }
    out.push('\n');

    out.push_str(&format!("CONCLUSION:\n{}\n\n", script.conclusion));
    out.push_str(&format!("TAGS:\n{}\n\n", script.tags.join(", ")));
    out.push_str(&format!("ESTIMATED DURATION:\n{}\n", script.estimated_duration));

    out
}

/// Print a script to the terminal, field by field in the same order.
pub fn print_script(script: &VideoScript) {
    println!("=== {} ===\n", script.title.bold());

    println!("🎣 Hook:");
    println!("  {}\n", script.hook);

    println!("📖 Introduction:");
    println!("  {}\n", script.introduction);

    println!("📌 Main Points:");
    for (i, point) in script.main_points.iter().enumerate() {
        println!("  {}. {}", i + 1, point);
    }
    println!();

    println!("💡 Conclusion:");
    println!("  {}\n", script.conclusion);

    println!("🏷️  Tags:");
    println!("  {}\n", script.tags.join(", ").cyan());

    println!("⏱️  Estimated duration: {}", script.estimated_duration);
}
