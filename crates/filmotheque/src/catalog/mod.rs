//! The movie list.
//!
//! A catalog is a CSV/TSV file with a header row. One column holds the title
//! and, optionally, one holds the IMDb link; the IMDb id found in that link
//! becomes the movie's rating key.
//!
//! ```text
//! Titre       Annee   IMDb
//! Matrix      1999    https://www.imdb.com/title/tt0133093/
//! Heat        1995
//! ```

mod parser;
mod table;

pub use parser::{CatalogConfig, CatalogParser};
pub use table::{Catalog, MovieRow, SortOrder, extract_imdb_id};
