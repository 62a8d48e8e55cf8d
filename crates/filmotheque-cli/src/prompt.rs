//! Yes/no confirmation on the terminal.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use filmotheque::exchange::Confirm;

/// Asks on stdout and reads the answer from stdin. Anything but yes is no.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{} {} ", message, "[y/N]".dimmed());
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                log::warn!("Could not read confirmation: {}", e);
                false
            }
        }
    }
}

/// Always agrees, for `--yes`.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "o" | "oui"
    )
}
