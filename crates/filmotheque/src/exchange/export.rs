//! Exporting the stored ratings to a file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::config::StoreConfig;
use crate::error::{FilmothequeError, Result};
use crate::ratings::{KeyValueBackend, RatingStore};

use super::envelope::{ExportEnvelope, ExportMetadata};

/// MIME type of export files.
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// Destination for a finished export, e.g. a browser download or a directory.
pub trait FileSink {
    /// Save `bytes` under `filename`.
    fn save(&mut self, filename: &str, bytes: &[u8], mime_type: &str) -> Result<()>;
}

impl<F: FnMut(&str, &[u8], &str) -> Result<()>> FileSink for F {
    fn save(&mut self, filename: &str, bytes: &[u8], mime_type: &str) -> Result<()> {
        self(filename, bytes, mime_type)
    }
}

/// Saves exports as files in a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Save into `dir`, created on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where a file named `filename` ends up.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl FileSink for DirectorySink {
    fn save(&mut self, filename: &str, bytes: &[u8], _mime_type: &str) -> Result<()> {
        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        }
        let path = self.path_for(filename);
        fs::write(&path, bytes).map_err(|e| io_error(&path, e))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> FilmothequeError {
    FilmothequeError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    /// Name the file was saved under.
    pub filename: String,
    /// Number of ratings exported.
    pub records: usize,
    /// Checksum embedded in the file.
    pub checksum: String,
}

/// `<prefix>-ratings-<YYYY-MM-DD>.json`
pub fn export_filename(prefix: &str, date: DateTime<Utc>) -> String {
    format!("{}-ratings-{}.json", prefix, date.format("%Y-%m-%d"))
}

/// Snapshot the store into a sealed envelope stamped with the store's clock.
pub fn build_envelope<B, C>(store: &RatingStore<B, C>, config: &StoreConfig) -> Result<ExportEnvelope>
where
    B: KeyValueBackend,
    C: Clock,
{
    let metadata = ExportMetadata {
        export_date: store.clock().timestamp(),
        version: config.format_version.clone(),
    };
    ExportEnvelope::seal(store.snapshot(), metadata)
}

/// Export every rating and hand the file to `sink`.
pub fn export_ratings<B, C>(
    store: &RatingStore<B, C>,
    sink: &mut dyn FileSink,
    config: &StoreConfig,
) -> Result<ExportReceipt>
where
    B: KeyValueBackend,
    C: Clock,
{
    let envelope = build_envelope(store, config)?;
    let filename = export_filename(&config.export_prefix, store.clock().now());
    let json = envelope.to_json_pretty()?;

    sink.save(&filename, json.as_bytes(), EXPORT_MIME_TYPE)?;
    log::info!("Exported {} ratings to {}", envelope.len(), filename);

    Ok(ExportReceipt {
        filename,
        records: envelope.len(),
        checksum: envelope.checksum,
    })
}
