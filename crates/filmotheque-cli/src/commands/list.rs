//! List command - every stored rating.

use std::path::Path;

use colored::Colorize;

use super::{open_store, stars};

pub fn run(store_path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(store_path);
    let ratings = store.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&ratings)?);
        return Ok(());
    }

    if ratings.is_empty() {
        println!("{}", "No ratings yet.".dimmed());
        return Ok(());
    }

    println!("{}", "Ratings".cyan().bold());
    println!();
    for (key, record) in &ratings {
        let id = record.imdb_id.as_deref().unwrap_or("-");
        println!(
            "  {} {:>2}  {}  {}",
            stars(record.rating.value()).yellow(),
            record.rating,
            record.title.bold(),
            id.dimmed()
        );
        if record.imdb_id.is_none() && key.as_str() != record.title {
            println!("      {} {}", "key:".dimmed(), key);
        }
    }
    println!();
    println!("{} {}", "Total:".dimmed(), ratings.len());
    Ok(())
}
