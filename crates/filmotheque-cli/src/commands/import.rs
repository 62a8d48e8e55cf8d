//! Import command - replace all ratings with an exported file.

use std::path::{Path, PathBuf};

use colored::Colorize;
use filmotheque::StoreConfig;
use filmotheque::exchange::{Confirm, ImportError, ImportFile, ImportOutcome, import_ratings};

use super::open_store;
use crate::prompt::{AssumeYes, TerminalConfirm};

pub fn run(store_path: &Path, file: PathBuf, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::default();
    let mime = mime_guess::from_path(&file).first_or_octet_stream();

    // Refuse big files before reading them into memory.
    let size = std::fs::metadata(&file)?.len();
    if size > config.max_import_bytes as u64 {
        return Err(ImportError::OversizeFile {
            size: usize::try_from(size).unwrap_or(usize::MAX),
            limit: config.max_import_bytes,
        }
        .into());
    }

    let import = ImportFile::read(&file, mime.essence_str())?;
    let mut confirm: Box<dyn Confirm> = if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirm)
    };

    let mut store = open_store(store_path);
    match import_ratings(&mut store, &import, confirm.as_mut(), &config)? {
        ImportOutcome::Applied { records } => {
            println!("{} {} ratings", "Imported".green().bold(), records);
        }
        ImportOutcome::Declined => {
            println!("{}", "Import cancelled, ratings unchanged.".yellow());
        }
    }
    Ok(())
}
