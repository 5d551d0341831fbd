//! Terminal rendering and input helpers shared by the page controllers.

use colored::Colorize;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::error;

use crate::errors::ClientError;

pub fn editor() -> Result<DefaultEditor, ClientError> {
    DefaultEditor::new().map_err(|err| ClientError::Io(std::io::Error::other(err)))
}

/// Reads one line; `None` means the user bailed (Ctrl-C / Ctrl-D).
pub fn read_line(editor: &mut DefaultEditor, prompt: &str) -> Option<String> {
    match editor.readline(prompt) {
        Ok(line) => {
            let _ = editor.add_history_entry(line.as_str());
            Some(line)
        }
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => None,
        Err(err) => {
            error!("readline failed: {err}");
            None
        }
    }
}

pub fn confirm(editor: &mut DefaultEditor, question: &str) -> bool {
    read_line(editor, &format!("{question} [y/N] "))
        .map(|line| matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
        .unwrap_or(false)
}

pub fn banner(title: &str, subtitle: &str) {
    println!("{}", title.bold());
    if !subtitle.is_empty() {
        println!("{}", subtitle.dimmed());
    }
    println!();
}

pub fn section(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A remote actor's line in a transcript.
pub fn remote_line(label: &str, text: &str) {
    println!("{} {}", format!("{label}:").cyan().bold(), text);
}

/// Secondary detail under a transcript line (detected intent, progress).
pub fn meta_line(text: &str) {
    println!("  {}", text.dimmed());
}

pub fn success_line(text: &str) {
    println!("{} {}", "✔".green(), text);
}

/// One generic user-facing line per failure; the detail goes to the log.
pub fn report_error(context: &str, err: &ClientError) {
    error!("{context}: {err}");
    let message = match err {
        ClientError::MissingSession => {
            "You're not signed in — set LIGHTNING_EMAIL/LIGHTNING_PASSWORD or run `lightning login`.".to_string()
        }
        ClientError::MissingTenant => {
            "No organization is set up for this account yet.".to_string()
        }
        ClientError::Cancelled => format!("{context} was cancelled."),
        _ => format!("{context} failed — please try again."),
    };
    eprintln!("{} {}", "✗".red(), message);
}

/// Standard table shell used by every list page.
pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    table
}

/// Formats a 0.0–1.0 confidence as a whole percentage, e.g. `0.82` → `82%`.
pub fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}
