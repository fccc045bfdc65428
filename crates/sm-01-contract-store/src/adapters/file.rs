use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::local_tx_hash;
use crate::domain::{ContractStoreError, TxReceipt};
use crate::ports::outbound::ContractStore;

/// File-backed contract store for local development without a chain.
///
/// Every call re-reads the file, so several CLI processes can share one
/// store. Each write goes through its own temp file and an atomic rename,
/// so the file always decodes. Concurrent writers in different processes
/// still race exactly like transactions against the real contract: last
/// rename wins.
pub struct FileBackedContractStore {
    path: PathBuf,
    write_lock: Mutex<()>,
    nonce: AtomicU64,
}

impl FileBackedContractStore {
    /// Open (or lazily create) a store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        if let Ok(metadata) = std::fs::metadata(&path) {
            info!(
                "[sm-01] 💾 Found existing store file: {} ({} bytes)",
                path.display(),
                metadata.len()
            );
        } else {
            info!("[sm-01] 📁 No existing store file at {}", path.display());
        }

        Self {
            path,
            write_lock: Mutex::new(()),
            nonce: AtomicU64::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, Vec<u8>>, ContractStoreError> {
        let mut file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(ContractStoreError::Io(e.to_string())),
        };
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| ContractStoreError::Io(e.to_string()))?;
        decode_entries(&bytes)
    }

    fn save(&self, data: &HashMap<String, Vec<u8>>) -> Result<(), ContractStoreError> {
        let io_err = |e: std::io::Error| ContractStoreError::Io(e.to_string());

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(io_err)?;

        let bytes = encode_entries(data);

        // Unique temp file per write, so writers sharing the path never
        // truncate each other's half-written file.
        let mut temp = NamedTempFile::new_in(dir).map_err(io_err)?;
        temp.write_all(&bytes).map_err(io_err)?;
        temp.as_file().sync_all().map_err(io_err)?;
        temp.persist(&self.path).map_err(|e| io_err(e.error))?;

        Ok(())
    }
}

/// Layout: `[key_len:u32][key][value_len:u32][value]...`, little endian.
fn encode_entries(data: &HashMap<String, Vec<u8>>) -> Vec<u8> {
    let mut entries: Vec<_> = data.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut bytes = Vec::new();
    for (key, value) in entries {
        bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
        bytes.extend_from_slice(key.as_bytes());
        bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
        bytes.extend_from_slice(value);
    }
    bytes
}

fn decode_entries(bytes: &[u8]) -> Result<HashMap<String, Vec<u8>>, ContractStoreError> {
    let mut data = HashMap::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let key = read_chunk(bytes, &mut cursor)?;
        let value = read_chunk(bytes, &mut cursor)?;
        let key = String::from_utf8(key.to_vec())
            .map_err(|_| ContractStoreError::Io("store file contains a non-UTF-8 key".into()))?;
        data.insert(key, value.to_vec());
    }

    Ok(data)
}

fn read_chunk<'a>(bytes: &'a [u8], cursor: &mut usize) -> Result<&'a [u8], ContractStoreError> {
    let truncated = || ContractStoreError::Io("store file truncated".into());

    let len_end = cursor.checked_add(4).ok_or_else(truncated)?;
    let len_bytes: [u8; 4] = bytes
        .get(*cursor..len_end)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(truncated)?;
    let len = u32::from_le_bytes(len_bytes) as usize;

    let end = len_end.checked_add(len).ok_or_else(truncated)?;
    let chunk = bytes.get(len_end..end).ok_or_else(truncated)?;
    *cursor = end;
    Ok(chunk)
}

#[async_trait]
impl ContractStore for FileBackedContractStore {
    async fn is_available(&self) -> Result<bool, ContractStoreError> {
        // Available as long as the file, if present, decodes.
        Ok(self.load().is_ok())
    }

    async fn get_data(&self, key: &str) -> Result<Vec<u8>, ContractStoreError> {
        Ok(self.load()?.remove(key).unwrap_or_default())
    }

    async fn set_data(&self, key: &str, value: &[u8]) -> Result<TxReceipt, ContractStoreError> {
        let _guard = self.write_lock.lock();
        let mut data = self.load()?;
        data.insert(key.to_string(), value.to_vec());
        self.save(&data)?;

        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(key, bytes = value.len(), "[sm-01] wrote key to store file");
        Ok(TxReceipt::new(local_tx_hash(key, value, nonce), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBackedContractStore::new(dir.path().join("store.bin"));
        assert!(store.is_available().await.unwrap());
        assert!(store.get_data("listing_keys").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_values_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.bin");

        let first = FileBackedContractStore::new(&path);
        first.set_data("listing_keys", br#"["1"]"#).await.unwrap();
        first.set_data("listing_1", b"{}").await.unwrap();

        let second = FileBackedContractStore::new(&path);
        assert_eq!(
            second.get_data("listing_keys").await.unwrap(),
            br#"["1"]"#.to_vec()
        );
        assert_eq!(second.get_data("listing_1").await.unwrap(), b"{}".to_vec());
    }

    #[tokio::test]
    async fn test_truncated_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.bin");
        std::fs::write(&path, [9u8, 0, 0, 0, b'a']).unwrap();

        let store = FileBackedContractStore::new(&path);
        assert!(!store.is_available().await.unwrap());
        assert!(matches!(
            store.get_data("a").await,
            Err(ContractStoreError::Io(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_writers_sharing_a_path_keep_file_decodable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.bin");

        let mut handles = Vec::new();
        for writer in 0..4u8 {
            let store = FileBackedContractStore::new(&path);
            handles.push(tokio::spawn(async move {
                for i in 0..50u32 {
                    let key = format!("listing_{}", writer);
                    store.set_data(&key, &i.to_le_bytes()).await?;
                }
                Ok::<_, ContractStoreError>(())
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // Writers overwrite each other's snapshots, but every snapshot is whole.
        let store = FileBackedContractStore::new(&path);
        assert!(store.is_available().await.unwrap());
        let bytes = std::fs::read(&path).unwrap();
        assert!(!decode_entries(&bytes).unwrap().is_empty());

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path() != path)
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind");
    }

    #[test]
    fn test_entry_codec_round_trip() {
        let mut data = HashMap::new();
        data.insert("a".to_string(), vec![]);
        data.insert("listing_x".to_string(), vec![1, 2, 3]);
        assert_eq!(decode_entries(&encode_entries(&data)).unwrap(), data);
    }
}
