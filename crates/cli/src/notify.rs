//! Transient notices, the terminal stand-in for toasts.
//! Success and info go to stdout, warnings and errors to stderr.

use common::InsightError;
use console::style;

pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

pub fn info(message: &str) {
    println!("{} {}", style("•").cyan(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), style(message).yellow());
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(message).red());
}

/// One line for a failed command: the normalized API message when the
/// error came from the client, the full context chain otherwise.
pub fn describe(error: &anyhow::Error) -> String {
    match error.downcast_ref::<InsightError>() {
        Some(insight) => insight.user_message(),
        None => format!("{:#}", error),
    }
}
