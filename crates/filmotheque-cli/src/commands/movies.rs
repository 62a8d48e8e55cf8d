//! Movies command - the movie list with each row's rating.

use std::path::{Path, PathBuf};

use colored::Colorize;
use filmotheque::{CatalogParser, SortOrder};

use super::{open_store, stars};

pub fn run(
    store_path: &Path,
    file: PathBuf,
    search: Option<String>,
    sort: Option<String>,
    asc: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = CatalogParser::new().parse_file(&file)?;
    let store = open_store(store_path);
    let ratings = store.snapshot();

    let mut rows = catalog.search(search.as_deref().unwrap_or(""));
    if let Some(column) = &sort {
        if !catalog.headers().iter().any(|h| h == column) {
            return Err(format!(
                "Unknown column '{}'. Available: {}",
                column,
                catalog.headers().join(", ")
            )
            .into());
        }
        let order = if asc {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        };
        rows = catalog.sorted_by(rows, column, order);
    }

    for row in &rows {
        let rating = ratings
            .get(&row.record_key())
            .map(|r| r.rating.value())
            .unwrap_or(0);
        let details: Vec<&str> = row
            .cells
            .values()
            .map(String::as_str)
            .filter(|v| !v.is_empty() && *v != row.title() && !v.starts_with("http"))
            .collect();

        let shown = if rating > 0 {
            stars(rating).yellow()
        } else {
            stars(rating).dimmed()
        };
        println!("{}  {}  {}", shown, row.title().bold(), details.join(" | ").dimmed());
    }

    println!();
    println!(
        "{} {} of {} movies",
        "Showing".dimmed(),
        rows.len(),
        catalog.len()
    );
    Ok(())
}
