//! Durable key-value storage behind the rating store.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::BackendError;

/// String key-value storage with get/set/remove, in the manner of a browser's
/// local storage.
pub trait KeyValueBackend {
    /// Read a value. `Ok(None)` when the key has never been written.
    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Write a value, replacing any previous one.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), BackendError>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for Box<B> {
    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), BackendError> {
        (**self).remove_item(key)
    }
}

/// In-process storage.
///
/// Can simulate a full or disabled storage, which is how the degraded paths
/// of the store get exercised.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    items: HashMap<String, String>,
    quota: Option<usize>,
    available: bool,
}

impl MemoryBackend {
    /// Empty, unlimited storage.
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            quota: None,
            available: true,
        }
    }

    /// Storage that refuses writes pushing its total size (keys plus values,
    /// in bytes) above `quota`.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::new()
        }
    }

    /// Storage that fails every operation.
    pub fn disabled() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Seed a raw value, bypassing quota checks.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    /// Total bytes held.
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn check_available(&self) -> Result<(), BackendError> {
        if self.available {
            Ok(())
        } else {
            Err(BackendError::Unavailable("storage is disabled".to_string()))
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.check_available()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        self.check_available()?;

        if let Some(quota) = self.quota {
            let current = self.items.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = self.used_bytes() - current + key.len() + value.len();
            if needed > quota {
                return Err(BackendError::QuotaExceeded { needed, quota });
            }
        }

        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), BackendError> {
        self.check_available()?;
        self.items.remove(key);
        Ok(())
    }
}

/// Storage kept in a JSON file mapping keys to string values.
///
/// ```text
/// .filmotheque/
/// └── storage.json      # {"movieRatings": "{\"tt0133093\": {...}}"}
/// ```
///
/// Every write rewrites the whole file through a sibling temp file and a
/// rename, so readers never see a half-written document.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Storage at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the storage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, BackendError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.unavailable("open", e)),
        };

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            BackendError::Unavailable(format!(
                "Failed to parse storage file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.unavailable("create directory for", e))?;
            }
        }

        let tmp_path = temp_path(&self.path);
        let file = File::create(&tmp_path).map_err(|e| self.unavailable("create", e))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, items).map_err(|e| {
            BackendError::Unavailable(format!("Failed to serialize storage: {}", e))
        })?;
        writer.flush().map_err(|e| self.unavailable("write", e))?;
        drop(writer);

        fs::rename(&tmp_path, &self.path).map_err(|e| self.unavailable("replace", e))
    }

    fn unavailable(&self, action: &str, e: std::io::Error) -> BackendError {
        BackendError::Unavailable(format!(
            "Failed to {} storage file '{}': {}",
            action,
            self.path.display(),
            e
        ))
    }
}

impl KeyValueBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), BackendError> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// `storage.json` -> `storage.json.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
