//! Stats command - how much of the list is rated.

use std::path::{Path, PathBuf};

use colored::Colorize;
use filmotheque::CatalogParser;

use super::open_store;

pub fn run(
    store_path: &Path,
    catalog: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(store_path);

    let stats = match &catalog {
        Some(path) => {
            let catalog = CatalogParser::new().parse_file(path)?;
            store.stats(&catalog.record_keys())
        }
        None => store.stored_stats(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Rating Statistics".cyan().bold());
    if let Some(path) = &catalog {
        println!("  {} {}", "Movie list:".dimmed(), path.display());
    }
    println!("  {} {}", "Movies:".dimmed(), stats.total);
    println!("  {} {}", "Rated:".dimmed(), stats.rated.to_string().green());
    println!("  {} {}", "Average:".dimmed(), stats.average_rating.yellow());
    Ok(())
}
