//! Rate command - set or reset one movie's rating.

use std::path::Path;

use colored::Colorize;
use filmotheque::Rating;

use super::{movie_from_arg, open_store, stars};

pub fn run(
    store_path: &Path,
    movie: String,
    rating: u8,
    title: Option<String>,
    imdb_id: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rating = Rating::new(rating)?;
    let movie = movie_from_arg(&movie, title, imdb_id);
    let key = movie.record_key();
    if key.is_empty() {
        return Err("Movie title or IMDb id must not be empty".into());
    }

    let mut store = open_store(store_path);
    if !store.set(&key, rating, &movie) {
        return Err(format!("Could not save the rating to {}", store_path.display()).into());
    }

    if rating.is_rated() {
        println!(
            "{} {} {} ({}/10)",
            "Rated".green().bold(),
            movie.title.bold(),
            stars(rating.value()).yellow(),
            rating
        );
    } else {
        println!("{} {}", "Cleared rating for".yellow(), movie.title.bold());
    }
    Ok(())
}
