//! Importing an exported ratings file.

use std::fs;
use std::path::Path;

use crate::clock::Clock;
use crate::config::StoreConfig;
use crate::error::{FilmothequeError, Result};
use crate::ratings::{KeyValueBackend, RatingStore};

use super::envelope::{ExportEnvelope, parse_envelope};
use super::error::ImportError;

/// A user-selected file, as handed over by a file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    /// File name, for messages.
    pub name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Raw contents.
    pub bytes: Vec<u8>,
}

impl ImportFile {
    /// Create an import file from memory.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk with the given MIME type.
    pub fn read(path: impl AsRef<Path>, mime_type: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| FilmothequeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, mime_type, bytes))
    }
}

/// Yes/no prompt shown before an import replaces the stored ratings.
pub trait Confirm {
    /// Ask the user; `true` means go ahead.
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// A validated import waiting for the user's go-ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPreview {
    /// Name of the imported file.
    pub file_name: String,
    /// The validated envelope.
    pub envelope: ExportEnvelope,
}

impl ImportPreview {
    /// Number of ratings in the file.
    pub fn record_count(&self) -> usize {
        self.envelope.len()
    }

    /// When the file was exported.
    pub fn export_date(&self) -> &str {
        &self.envelope.metadata.export_date
    }

    /// Prompt text for the confirmation step.
    pub fn confirmation_message(&self) -> String {
        format!(
            "Import {} ratings exported on {} from '{}'? This will replace all current ratings.",
            self.record_count(),
            self.export_date(),
            self.file_name
        )
    }
}

/// How an import ended when nothing went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The stored ratings were replaced.
    Applied { records: usize },
    /// The user said no; storage was not touched.
    Declined,
}

/// Check type and size, then parse and validate.
///
/// Type and size are checked before the contents are looked at.
pub fn prepare_import(
    file: &ImportFile,
    config: &StoreConfig,
) -> std::result::Result<ImportPreview, ImportError> {
    if !file.mime_type.to_ascii_lowercase().contains("json") {
        return Err(ImportError::WrongFileType(file.mime_type.clone()));
    }
    if file.bytes.len() > config.max_import_bytes {
        return Err(ImportError::OversizeFile {
            size: file.bytes.len(),
            limit: config.max_import_bytes,
        });
    }

    let text = std::str::from_utf8(&file.bytes)
        .map_err(|e| ImportError::MalformedImport(e.to_string()))?;
    let envelope = parse_envelope(text)?;

    Ok(ImportPreview {
        file_name: file.name.clone(),
        envelope,
    })
}

/// Validate `file`, ask for confirmation, and replace every stored rating.
///
/// Nothing is written unless validation passes and `confirm` agrees.
pub fn import_ratings<B, C>(
    store: &mut RatingStore<B, C>,
    file: &ImportFile,
    confirm: &mut dyn Confirm,
    config: &StoreConfig,
) -> std::result::Result<ImportOutcome, ImportError>
where
    B: KeyValueBackend,
    C: Clock,
{
    let preview = match prepare_import(file, config) {
        Ok(preview) => preview,
        Err(e) => {
            log::warn!("Rejected import of '{}': {}", file.name, e);
            return Err(e);
        }
    };

    if !confirm.confirm(&preview.confirmation_message()) {
        log::info!("Import of '{}' declined", file.name);
        return Ok(ImportOutcome::Declined);
    }

    let records = preview.record_count();
    store.replace_all(preview.envelope.ratings)?;
    Ok(ImportOutcome::Applied { records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_type_rejected() {
        let file = ImportFile::new("ratings.txt", "text/plain", b"{}".to_vec());
        assert!(matches!(
            prepare_import(&file, &StoreConfig::default()),
            Err(ImportError::WrongFileType(_))
        ));
    }

    #[test]
    fn test_oversize_rejected_before_parse() {
        // Not JSON at all: a parse attempt would report MalformedImport.
        let file = ImportFile::new("big.json", "application/json", vec![b'x'; 1_048_577]);
        assert!(matches!(
            prepare_import(&file, &StoreConfig::default()),
            Err(ImportError::OversizeFile { size: 1_048_577, limit: 1_048_576 })
        ));
    }

    #[test]
    fn test_limit_is_inclusive() {
        let config = StoreConfig::default().with_max_import_bytes(4);
        let file = ImportFile::new("a.json", "application/json", b"null".to_vec());
        assert!(matches!(
            prepare_import(&file, &config),
            Err(ImportError::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let file = ImportFile::new("a.json", "application/json", vec![0xff, 0xfe]);
        assert!(matches!(
            prepare_import(&file, &StoreConfig::default()),
            Err(ImportError::MalformedImport(_))
        ));
    }

    #[test]
    fn test_closure_confirm() {
        let mut asked = Vec::new();
        let mut confirm = |msg: &str| {
            asked.push(msg.to_string());
            false
        };
        assert!(!Confirm::confirm(&mut confirm, "sure?"));
        assert_eq!(asked, vec!["sure?".to_string()]);
    }
}
