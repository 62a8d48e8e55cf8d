//! Command implementations.

pub mod clear;
pub mod export;
pub mod gallery;
pub mod import;
pub mod list;
pub mod movies;
pub mod rate;
pub mod show;
pub mod stats;

use std::path::Path;

use filmotheque::catalog::extract_imdb_id;
use filmotheque::{FileBackend, MovieInfo, RatingStore};

/// Open the rating store kept in `path`.
pub fn open_store(path: &Path) -> RatingStore<FileBackend> {
    log::debug!("Using ratings store {}", path.display());
    RatingStore::new(FileBackend::new(path))
}

/// Interpret a MOVIE argument: an IMDb id, an IMDb link, or a title.
pub fn movie_from_arg(movie: &str, title: Option<String>, imdb_id: Option<String>) -> MovieInfo {
    let movie = movie.trim();
    let id_in_arg = if is_imdb_id(movie) {
        Some(movie)
    } else {
        extract_imdb_id(movie)
    };

    match id_in_arg {
        Some(id) => MovieInfo::new(title.unwrap_or_else(|| id.to_string())).with_imdb_id(id),
        None => {
            let info = MovieInfo::new(title.unwrap_or_else(|| movie.to_string()));
            match imdb_id {
                Some(id) => info.with_imdb_id(id),
                None => info,
            }
        }
    }
}

fn is_imdb_id(s: &str) -> bool {
    s.len() > 2 && s.starts_with("tt") && s[2..].bytes().all(|b| b.is_ascii_digit())
}

/// Stars for a 0-10 rating, e.g. `★★★★★★★★☆☆`.
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(10));
    format!("{}{}", "★".repeat(filled), "☆".repeat(10 - filled))
}
