//! Filmotheque CLI - rate the movie list and move ratings between machines.

mod cli;
mod commands;
mod prompt;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let store = cli.store;

    let result = match cli.command {
        Commands::Rate {
            movie,
            rating,
            title,
            imdb_id,
        } => commands::rate::run(&store, movie, rating, title, imdb_id),

        Commands::Show { movie } => commands::show::run(&store, movie),

        Commands::List { json } => commands::list::run(&store, json),

        Commands::Stats { catalog, json } => commands::stats::run(&store, catalog, json),

        Commands::Export { output, prefix } => commands::export::run(&store, output, prefix),

        Commands::Import { file, yes } => commands::import::run(&store, file, yes),

        Commands::Clear { yes } => commands::clear::run(&store, yes),

        Commands::Movies {
            file,
            search,
            sort,
            asc,
        } => commands::movies::run(&store, file, search, sort, asc),

        Commands::Gallery { imdb_id, media } => commands::gallery::run(imdb_id, media),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
