//! Show command - one movie's stored record.

use std::path::Path;

use colored::Colorize;

use super::{movie_from_arg, open_store, stars};

pub fn run(store_path: &Path, movie: String) -> Result<(), Box<dyn std::error::Error>> {
    let movie = movie_from_arg(&movie, None, None);
    let key = movie.record_key();
    let store = open_store(store_path);

    match store.record(&key) {
        Some(record) => {
            println!("{}", record.title.cyan().bold());
            println!(
                "  {} {} ({}/10)",
                "Rating:".dimmed(),
                stars(record.rating.value()).yellow(),
                record.rating
            );
            if let Some(id) = &record.imdb_id {
                println!("  {} {}", "IMDb:".dimmed(), id);
            }
            if let Some(updated) = &record.last_updated {
                println!("  {} {}", "Updated:".dimmed(), updated);
            }
        }
        None => println!("{} {}", key.to_string().bold(), "is not rated".dimmed()),
    }
    Ok(())
}
