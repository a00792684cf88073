//! # File-Backed Store
//!
//! Persists the whole key space to a single binary file. Every batch rewrites
//! the file through a temp file + rename, so a crash leaves either the old or
//! the new contents on disk.
//!
//! An exclusive `fs2` lock on `{path}.lock` is held for the lifetime of the
//! store; a second process opening the same file gets `KVStoreError::Locked`.

use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type Data = BTreeMap<Vec<u8>, Vec<u8>>;

fn io_err(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

pub struct FileBackedKVStore {
    data: Data,
    path: PathBuf,
    /// Held open to keep the advisory lock.
    _lock: File,
}

impl FileBackedKVStore {
    /// Open (or create) the store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let lock_path = Self::lock_path(&path);
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(io_err)?;
        lock.try_lock_exclusive().map_err(|_| KVStoreError::Locked {
            message: format!("{} is in use by another process", path.display()),
        })?;

        let data = if path.exists() {
            let data = Self::load_from_file(&path)?;
            info!(keys = data.len(), path = %path.display(), "Loaded registry store");
            data
        } else {
            info!(path = %path.display(), "No existing registry store, starting empty");
            Data::new()
        };

        Ok(Self {
            data,
            path,
            _lock: lock,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    // Format: [key_len:u32 LE][key][value_len:u32 LE][value]...
    fn load_from_file(path: &Path) -> Result<Data, KVStoreError> {
        let mut bytes = Vec::new();
        File::open(path)
            .and_then(|mut f| f.read_to_end(&mut bytes))
            .map_err(io_err)?;

        let mut data = Data::new();
        let mut cursor = 0;
        while cursor < bytes.len() {
            let key = Self::read_chunk(&bytes, &mut cursor)?;
            let value = Self::read_chunk(&bytes, &mut cursor)?;
            data.insert(key, value);
        }
        Ok(data)
    }

    fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
        let truncated = || KVStoreError::CorruptionError {
            message: format!("truncated record at byte {}", *cursor),
        };
        let len_bytes: [u8; 4] = bytes
            .get(*cursor..*cursor + 4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(truncated)?;
        let len = u32::from_le_bytes(len_bytes) as usize;
        let start = *cursor + 4;
        let chunk = bytes.get(start..start + len).ok_or_else(truncated)?;
        *cursor = start + len;
        Ok(chunk.to_vec())
    }

    fn save_to_file(&self, data: &Data) -> Result<(), KVStoreError> {
        let mut bytes = Vec::new();
        for (key, value) in data {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        fs::rename(&temp_path, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Ok(self
            .data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    /// The in-memory view only changes after the file has been replaced.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        let count = operations.len();
        for BatchOperation { key, value } in operations {
            next.insert(key, value);
        }
        self.save_to_file(&next)?;
        self.data = next;
        debug!(operations = count, "Committed batch to registry store");
        Ok(())
    }
}
