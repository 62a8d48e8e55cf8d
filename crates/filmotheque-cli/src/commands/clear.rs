//! Clear command - delete every rating.

use std::path::Path;

use colored::Colorize;
use filmotheque::exchange::Confirm;

use super::open_store;
use crate::prompt::TerminalConfirm;

pub fn run(store_path: &Path, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(store_path);
    let count = store.snapshot().len();

    if count == 0 {
        println!("{}", "No ratings to delete.".dimmed());
        return Ok(());
    }

    let message = format!("Delete all {} ratings? This cannot be undone.", count);
    if !yes && !TerminalConfirm.confirm(&message) {
        println!("{}", "Cancelled, ratings unchanged.".yellow());
        return Ok(());
    }

    if !store.clear_all() {
        return Err(format!("Could not clear {}", store_path.display()).into());
    }
    println!("{} {} ratings", "Deleted".green().bold(), count);
    Ok(())
}
