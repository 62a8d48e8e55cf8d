//! The movie table: rows, search filter and column sort.

use std::cmp::Ordering;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::ratings::{MovieInfo, RecordKey};

/// Matches the id in IMDb title links, e.g. `https://www.imdb.com/title/tt0133093/`.
static IMDB_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/title/(tt\d+)").expect("valid IMDb title pattern"));

/// Extract the `tt...` id from an IMDb title URL.
pub fn extract_imdb_id(url: &str) -> Option<&str> {
    IMDB_TITLE_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// One movie in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieRow {
    /// All cells, keyed by column header, in column order.
    pub cells: IndexMap<String, String>,
    title: String,
    imdb_id: Option<String>,
}

impl MovieRow {
    /// Build a row, reading the title and IMDb link from the named columns.
    pub fn new(cells: IndexMap<String, String>, title_column: &str, link_column: Option<&str>) -> Self {
        let title = cells.get(title_column).cloned().unwrap_or_default();
        let imdb_id = link_column
            .and_then(|column| cells.get(column))
            .and_then(|url| extract_imdb_id(url))
            .map(str::to_string);

        Self {
            cells,
            title,
            imdb_id,
        }
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// IMDb id from the row's link, if any.
    pub fn imdb_id(&self) -> Option<&str> {
        self.imdb_id.as_deref()
    }

    /// Cell value by column header.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(|s| s.as_str())
    }

    /// The movie as the rating store sees it.
    pub fn movie_info(&self) -> MovieInfo {
        MovieInfo {
            title: self.title.clone(),
            imdb_id: self.imdb_id.clone(),
        }
    }

    /// Key of this movie's rating.
    pub fn record_key(&self) -> RecordKey {
        RecordKey::for_movie(&self.title, self.imdb_id.as_deref())
    }

    /// Whether every whitespace-separated term of `query` occurs in some cell,
    /// ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        let cells: Vec<String> = self.cells.values().map(|c| c.to_lowercase()).collect();
        query
            .split_whitespace()
            .map(str::to_lowercase)
            .all(|term| cells.iter().any(|cell| cell.contains(&term)))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// A parsed movie list.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    headers: Vec<String>,
    rows: Vec<MovieRow>,
}

impl Catalog {
    /// Create a catalog from parsed rows.
    pub fn new(headers: Vec<String>, rows: Vec<MovieRow>) -> Self {
        Self { headers, rows }
    }

    /// Column headers in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows in file order.
    pub fn rows(&self) -> &[MovieRow] {
        &self.rows
    }

    /// Number of movies.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rating keys of every row, for [`RatingStore::stats`](crate::RatingStore::stats).
    pub fn record_keys(&self) -> Vec<RecordKey> {
        self.rows.iter().map(MovieRow::record_key).collect()
    }

    /// Rows matching a search query. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&MovieRow> {
        self.rows.iter().filter(|row| row.matches(query)).collect()
    }

    /// Rows sorted by a column. Numbers compare numerically, everything else
    /// case-insensitively; empty cells sort last. Ties keep file order.
    pub fn sorted_by<'a>(&'a self, rows: Vec<&'a MovieRow>, column: &str, order: SortOrder) -> Vec<&'a MovieRow> {
        let mut rows = rows;
        rows.sort_by(|a, b| {
            let a = a.get(column).unwrap_or("");
            let b = b.get(column).unwrap_or("");
            match (a.is_empty(), b.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let ord = compare_cells(a, b);
                    match order {
                        SortOrder::Ascending => ord,
                        SortOrder::Descending => ord.reverse(),
                    }
                }
            }
        });
        rows
    }
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}
