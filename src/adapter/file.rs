//! File Adapter Module
//!
//! Persists one JSON record per key inside a cache directory. Each file is
//! named by the lowercase hex SHA-256 digest of its key.
//!
//! There is no file locking and writes are not atomic: two processes writing
//! the same key race and the last writer wins, and `clear` may miss files
//! written while it scans.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::adapter::{check_return, StorageAdapter};
use crate::cache::{CacheEntry, CacheValue, Expiration};
use crate::error::{CacheError, Result};

/// Version written into every record.
pub const FORMAT_VERSION: u32 = 1;

/// Length of a hex SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

// == File Record ==
/// On-disk body of a cache file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub version: u32,
    pub entry: CacheEntry,
}

/// True for names following the digest convention: exactly 64 hex digits.
pub fn is_cache_file_name(name: &str) -> bool {
    name.len() == DIGEST_HEX_LEN && name.bytes().all(|b| b.is_ascii_hexdigit())
}

// == File Adapter ==
/// Filesystem backend rooted at a caller-supplied directory.
#[derive(Debug, Clone)]
pub struct FileAdapter {
    /// Directory holding the cache files
    cache_dir: PathBuf,
}

impl FileAdapter {
    // == Constructor ==
    /// Opens a file adapter on an existing, writable directory.
    ///
    /// # Errors
    /// `CacheError::Io` if `cache_dir` is not a directory or a file cannot be
    /// created in it.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();

        if !cache_dir.is_dir() {
            return Err(CacheError::Io(format!(
                "{} is not a valid directory",
                cache_dir.display()
            )));
        }

        tempfile::Builder::new()
            .prefix(".write-check-")
            .tempfile_in(&cache_dir)
            .map_err(|e| {
                CacheError::Io(format!(
                    "{} is not writable, check its permissions: {}",
                    cache_dir.display(),
                    e
                ))
            })?;

        info!(cache_dir = %cache_dir.display(), "File cache initialized");

        Ok(Self { cache_dir })
    }

    /// Directory holding the cache files.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    // == Path For ==
    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.cache_dir.join(hex::encode(digest))
    }

    /// Reads and decodes a record. Missing or empty files yield `None`;
    /// undecodable ones are removed.
    fn read_record(&self, path: &Path) -> Option<FileRecord> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(_) => return None,
        };

        if bytes.is_empty() {
            return None;
        }

        match serde_json::from_slice::<FileRecord>(&bytes) {
            Ok(record) if record.version == FORMAT_VERSION => Some(record),
            Ok(record) => {
                warn!(
                    path = %path.display(),
                    version = record.version,
                    "unsupported cache record version, removing"
                );
                remove_quietly(path);
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt cache record, removing");
                remove_quietly(path);
                None
            }
        }
    }
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "failed to remove cache file");
    }
}

impl StorageAdapter for FileAdapter {
    // == Get ==
    fn get(&mut self, key: &str) -> Option<CacheValue> {
        let path = self.path_for(key);
        if !path.is_file() {
            return None;
        }

        let record = self.read_record(&path)?;
        if !record.entry.is_expired() {
            debug!(key, ttl_remaining = ?record.entry.ttl_remaining(), "cache file hit");
            return Some(record.entry.into_value());
        }

        remove_quietly(&path);
        debug!(key, "purged expired cache file");
        None
    }

    // == Set ==
    /// Writes the record for `key`. Values that would not decode again (non-finite
    /// floats, nesting past the JSON reader's depth limit) are refused with `false`.
    fn set(&mut self, key: &str, value: CacheValue, expiration: Expiration) -> bool {
        let path = self.path_for(key);
        let record = FileRecord {
            version: FORMAT_VERSION,
            entry: CacheEntry::new(value, expiration),
        };

        let body = match serde_json::to_vec(&record) {
            Ok(body) => body,
            Err(e) => {
                warn!(key, error = %e, "failed to encode cache record");
                return false;
            }
        };

        if let Err(e) = serde_json::from_slice::<FileRecord>(&body) {
            warn!(key, error = %e, "cache record would not read back, refusing to write");
            return false;
        }

        if let Err(e) = fs::write(&path, body) {
            warn!(key, path = %path.display(), error = %e, "failed to write cache file");
            return false;
        }

        path.is_file()
    }

    // == Delete ==
    fn delete(&mut self, key: &str) -> bool {
        let path = self.path_for(key);
        if !path.is_file() {
            return false;
        }

        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "failed to delete cache file");
                false
            }
        }
    }

    // == Clear ==
    /// Deletes every digest-named regular file, leaving anything else alone.
    /// Symlinks to regular files count as cache files; the link is removed and
    /// its target is left in place.
    fn clear(&mut self) -> bool {
        let dir = match fs::read_dir(&self.cache_dir) {
            Ok(dir) => dir,
            Err(e) => {
                warn!(
                    cache_dir = %self.cache_dir.display(),
                    error = %e,
                    "failed to list cache directory"
                );
                return false;
            }
        };

        let cache_files: Vec<PathBuf> = dir
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter(|entry| entry.file_name().to_str().is_some_and(is_cache_file_name))
            .map(|entry| entry.path())
            .collect();

        debug!(count = cache_files.len(), "clearing cache files");

        check_return(cache_files.iter().map(|path| match fs::remove_file(path) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to delete cache file");
                false
            }
        }))
    }
}
