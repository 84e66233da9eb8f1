use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use sha2::{Digest, Sha256};

/// Hidden ledger file at the destination root.
pub const LEDGER_FILENAME: &str = ".checksums.json";

const CHUNK_SIZE: usize = 64 * 1024;

/// Stream a file through SHA-256 in fixed-size chunks; lowercase hex digest.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file = fs::File::open(path)
        .with_context(|| format!("Could not open {} for hashing", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let read = file
            .read(&mut buffer)
            .with_context(|| format!("Read failed while hashing {}", path.display()))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Merge newly recorded checksums into the ledger at the destination root.
/// Read-modify-write: new entries overwrite same-key old ones, everything
/// else is preserved; entries are never removed or revalidated. Best-effort -
/// any I/O failure is logged and swallowed so it can never block a transfer
/// that already happened.
pub fn merge_ledger(destination: &Path, entries: &BTreeMap<String, String>) {
    if entries.is_empty() {
        return;
    }
    let path = destination.join(LEDGER_FILENAME);

    let mut ledger: BTreeMap<String, String> = match fs::read_to_string(&path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => BTreeMap::new(),
    };
    for (key, digest) in entries {
        ledger.insert(key.clone(), digest.clone());
    }

    let rendered = match serde_json::to_string_pretty(&ledger) {
        Ok(rendered) => rendered,
        Err(e) => {
            warn!("Could not serialize checksum ledger: {e}");
            return;
        }
    };
    if let Err(e) = fs::write(&path, rendered) {
        warn!("Could not save checksum ledger {}: {e}", path.display());
    }
}

/// Load the ledger at the destination root; empty on any failure.
pub fn load_ledger(destination: &Path) -> BTreeMap<String, String> {
    match fs::read_to_string(destination.join(LEDGER_FILENAME)) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_hash_known_vector() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();
        assert_eq!(
            hash_file(file.path()).unwrap(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_hash_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(
            hash_file(file.path()).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_missing_file_is_error() {
        assert!(hash_file(Path::new("/no/such/file.bin")).is_err());
    }

    #[test]
    fn test_merge_preserves_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = BTreeMap::new();
        first.insert("a/x.jpg".to_string(), "11".to_string());
        merge_ledger(dir.path(), &first);

        let mut second = BTreeMap::new();
        second.insert("b/y.jpg".to_string(), "22".to_string());
        merge_ledger(dir.path(), &second);

        let ledger = load_ledger(dir.path());
        assert_eq!(ledger.get("a/x.jpg").map(String::as_str), Some("11"));
        assert_eq!(ledger.get("b/y.jpg").map(String::as_str), Some("22"));
    }

    #[test]
    fn test_merge_overwrites_same_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut entries = BTreeMap::new();
        entries.insert("x.jpg".to_string(), "old".to_string());
        merge_ledger(dir.path(), &entries);
        entries.insert("x.jpg".to_string(), "new".to_string());
        merge_ledger(dir.path(), &entries);
        assert_eq!(
            load_ledger(dir.path()).get("x.jpg").map(String::as_str),
            Some("new")
        );
    }

    #[test]
    fn test_corrupt_ledger_is_replaced_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LEDGER_FILENAME), b"{ not json").unwrap();
        let mut entries = BTreeMap::new();
        entries.insert("x.jpg".to_string(), "11".to_string());
        merge_ledger(dir.path(), &entries);
        assert_eq!(load_ledger(dir.path()).len(), 1);
    }

    #[test]
    fn test_empty_entries_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        merge_ledger(dir.path(), &BTreeMap::new());
        assert!(!dir.path().join(LEDGER_FILENAME).exists());
    }
}
