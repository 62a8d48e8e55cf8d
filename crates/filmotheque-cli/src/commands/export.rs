//! Export command - write all ratings to a checksummed JSON file.

use std::path::{Path, PathBuf};

use colored::Colorize;
use filmotheque::StoreConfig;
use filmotheque::exchange::{DirectorySink, export_ratings};

use super::open_store;

pub fn run(
    store_path: &Path,
    output: PathBuf,
    prefix: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StoreConfig::default();
    if let Some(prefix) = prefix {
        config = config.with_export_prefix(prefix);
    }

    let store = open_store(store_path);
    let mut sink = DirectorySink::new(&output);
    let receipt = export_ratings(&store, &mut sink, &config)?;

    println!(
        "{} {} ratings to {}",
        "Exported".green().bold(),
        receipt.records,
        sink.path_for(&receipt.filename).display()
    );
    println!("  {} {}", "Checksum:".dimmed(), receipt.checksum);
    Ok(())
}
