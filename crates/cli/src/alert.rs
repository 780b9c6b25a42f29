//! Console implementation of the presentation boundary.

use std::io::{self, BufRead, Write};

use medtrack_core::alert::{Alert, AlertKind, AlertPresenter, Choice};

/// Renders alerts on stdout and reads confirmations from stdin.
pub struct ConsolePresenter;

fn prefix(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::Success => "ok",
        AlertKind::Error => "error",
        AlertKind::Warning => "warning",
        AlertKind::Info => "info",
        AlertKind::Confirm => "confirm",
    }
}

impl AlertPresenter for ConsolePresenter {
    fn show(&self, alert: &Alert) {
        match &alert.message {
            Some(message) => println!("[{}] {}: {}", prefix(alert.kind), alert.title, message),
            None => println!("[{}] {}", prefix(alert.kind), alert.title),
        }
    }

    fn confirm(&self, alert: &Alert) -> Choice {
        self.show(alert);
        print!("Proceed? [y/N] ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return Choice::Cancelled;
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Choice::Confirmed,
            _ => Choice::Cancelled,
        }
    }
}
