//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default location of the ratings storage file.
pub const DEFAULT_STORE_PATH: &str = ".filmotheque/storage.json";

/// Filmotheque: rate your movie list
#[derive(Parser)]
#[command(name = "filmotheque")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Ratings storage file
    #[arg(long, global = true, env = "FILMOTHEQUE_STORE", default_value = DEFAULT_STORE_PATH)]
    pub store: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rate a movie from 0 (unrated) to 10
    Rate {
        /// Movie title, IMDb id (tt...), or IMDb link
        #[arg(value_name = "MOVIE")]
        movie: String,

        /// Rating from 0 to 10
        #[arg(value_parser = clap::value_parser!(u8).range(0..=10))]
        rating: u8,

        /// Display title when MOVIE is an IMDb id
        #[arg(short, long)]
        title: Option<String>,

        /// IMDb id when MOVIE is a title
        #[arg(long)]
        imdb_id: Option<String>,
    },

    /// Show the rating of one movie
    Show {
        /// Movie title, IMDb id (tt...), or IMDb link
        #[arg(value_name = "MOVIE")]
        movie: String,
    },

    /// List every stored rating
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show rating statistics
    Stats {
        /// Movie list (CSV/TSV); counts are taken over its rows
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export all ratings to a checksummed JSON file
    Export {
        /// Directory to write the export into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// File name prefix (<prefix>-ratings-<date>.json)
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// Replace all ratings with an exported file
    Import {
        /// Exported ratings file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete every rating
    Clear {
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the movie list with ratings
    Movies {
        /// Movie list (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only rows containing every word of this query
        #[arg(short, long)]
        search: Option<String>,

        /// Column to sort by (default: file order)
        #[arg(long)]
        sort: Option<String>,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },

    /// Show a movie's poster and extra images
    Gallery {
        /// IMDb id (tt...)
        #[arg(value_name = "IMDB_ID")]
        imdb_id: String,

        /// Media directory with one folder per IMDb id
        #[arg(short, long, default_value = "media")]
        media: PathBuf,
    },
}
