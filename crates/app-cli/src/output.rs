//! Output formatting for the CLI.

use clap::ValueEnum;
use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print `text`, or `value` as JSON.
pub fn print<T: Serialize>(value: &T, text: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", text),
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(_) => println!("{}", text),
        },
    }
}

/// Print an error message.
pub fn print_error(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => eprintln!("Error: {}", message),
        OutputFormat::Json => {
            let value = serde_json::json!({ "status": "error", "message": message });
            eprintln!("{}", value);
        }
    }
}

/// Print a table row.
pub fn print_row(label: &str, value: &str) {
    println!("  {:<16} {}", format!("{}:", label), value);
}

/// Print a divider line.
pub fn print_divider() {
    println!("{}", "-".repeat(50));
}

/// Print a heading.
pub fn print_heading(text: &str) {
    println!("\n{}", text);
    print_divider();
}
