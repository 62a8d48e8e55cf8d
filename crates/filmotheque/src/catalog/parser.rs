//! CSV/TSV movie list parser with delimiter detection.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{FilmothequeError, Result};

use super::table::{Catalog, MovieRow};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Header names recognized as the title column (case-insensitive).
const TITLE_HEADERS: &[&str] = &["title", "titre", "film", "movie"];

/// Header names recognized as the IMDb link column (case-insensitive).
const LINK_HEADERS: &[&str] = &["imdb", "link", "lien", "url"];

/// Parser configuration.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Title column header (None = first recognized title header, else the
    /// first column).
    pub title_column: Option<String>,
    /// IMDb link column header (None = first recognized link header).
    pub link_column: Option<String>,
}

/// Parses movie list files.
pub struct CatalogParser {
    config: CatalogConfig,
}

impl CatalogParser {
    /// Create a parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: CatalogConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: CatalogConfig) -> Self {
        Self { config }
    }

    /// Parse a movie list file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Catalog> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| FilmothequeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse_bytes(&contents)
    }

    /// Parse movie list contents.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Catalog> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(FilmothequeError::EmptyData("No columns found".to_string()));
        }

        let title_column = self.resolve_title_column(&headers)?;
        let link_column = self.resolve_link_column(&headers)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let cells: IndexMap<String, String> = headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), record.get(i).unwrap_or("").trim().to_string()))
                .collect();

            let row = MovieRow::new(cells, &headers[title_column], link_column.map(|i| headers[i].as_str()));
            if row.title().is_empty() {
                log::debug!("Skipping movie row without a title");
                continue;
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(FilmothequeError::EmptyData("No movie rows found".to_string()));
        }

        Ok(Catalog::new(headers, rows))
    }

    fn resolve_title_column(&self, headers: &[String]) -> Result<usize> {
        match &self.config.title_column {
            Some(name) => find_header(headers, &[name.as_str()])
                .ok_or_else(|| FilmothequeError::Config(format!("No column named '{}'", name))),
            None => Ok(find_header(headers, TITLE_HEADERS).unwrap_or(0)),
        }
    }

    fn resolve_link_column(&self, headers: &[String]) -> Result<Option<usize>> {
        match &self.config.link_column {
            Some(name) => find_header(headers, &[name.as_str()])
                .map(Some)
                .ok_or_else(|| FilmothequeError::Config(format!("No column named '{}'", name))),
            None => Ok(find_header(headers, LINK_HEADERS)),
        }
    }
}

impl Default for CatalogParser {
    fn default() -> Self {
        Self::new()
    }
}

fn find_header(headers: &[String], names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(FilmothequeError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Consistent counts win; tabs get a small bonus since titles rarely contain them
        let score = if counts.iter().all(|&c| c == first_count) {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
