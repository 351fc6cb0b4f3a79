//! Append-only candidate store: one JSON object per line.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::privacy::mask_contact;
use crate::screening::record::CandidateRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A finished screening as written to disk.
#[derive(Debug, Serialize)]
pub struct StoredRecord {
    pub session_id: Uuid,
    pub saved_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: CandidateRecord,
    pub email_masked: String,
    pub phone_masked: String,
}

impl StoredRecord {
    pub fn new(session_id: Uuid, record: CandidateRecord) -> Self {
        let email_masked = mask_contact(record.info.email.as_deref().unwrap_or_default());
        let phone_masked = mask_contact(record.info.phone.as_deref().unwrap_or_default());
        Self {
            session_id,
            saved_at: Utc::now(),
            record,
            email_masked,
            phone_masked,
        }
    }
}

#[derive(Clone)]
pub struct CandidateStore {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl CandidateStore {
    /// Creates the parent directory if needed. The file itself is created on first append.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        Ok(Self {
            path: Arc::new(path),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line. Concurrent appends never interleave.
    pub async fn append<T: Serialize>(&self, record: &T) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.to_path_buf(),
            source,
        };

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path.as_path())
            .await
            .map_err(io_err)?;
        file.write_all(line.as_bytes()).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::fields::ProfileInfo;
    use crate::screening::walker::RecordedAnswer;

    fn sample_record() -> CandidateRecord {
        CandidateRecord::build(
            &ProfileInfo {
                full_name: Some("Ada Lovelace".into()),
                email: Some("ada@example.com".into()),
                phone: Some("+44 20 7946 0958".into()),
                ..Default::default()
            },
            &["Rust".to_string()],
            &[RecordedAnswer {
                tech: "Rust".into(),
                index: 0,
                answer: "ownership".into(),
            }],
        )
    }

    #[test]
    fn test_stored_record_masks_contact_fields() {
        let stored = StoredRecord::new(Uuid::nil(), sample_record());
        let json = serde_json::to_value(&stored).unwrap();

        assert_eq!(json["email_masked"], "a***@example.com");
        assert_eq!(json["phone_masked"], "***0958");
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["answers"]["Rust_q1"], "ownership");
        assert_eq!(json["session_id"], Uuid::nil().to_string());
        assert!(json["saved_at"].is_string());
    }

    #[test]
    fn test_missing_contact_masks_to_empty() {
        let record = CandidateRecord::build(&ProfileInfo::default(), &[], &[]);
        let stored = StoredRecord::new(Uuid::new_v4(), record);
        assert_eq!(stored.email_masked, "");
        assert_eq!(stored.phone_masked, "");
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/candidates.jsonl");

        let store = CandidateStore::open(&path).unwrap();
        assert!(path.parent().unwrap().is_dir());
        assert_eq!(store.path(), path.as_path());
    }

    #[tokio::test]
    async fn test_append_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = CandidateStore::open(dir.path().join("candidates.jsonl")).unwrap();

        store.append(&StoredRecord::new(Uuid::new_v4(), sample_record())).await.unwrap();
        store.append(&StoredRecord::new(Uuid::new_v4(), sample_record())).await.unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["full_name"], "Ada Lovelace");
        }
    }

    #[tokio::test]
    async fn test_concurrent_appends_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let store = CandidateStore::open(dir.path().join("candidates.jsonl")).unwrap();

        let writes = (0..20).map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .append(&StoredRecord::new(Uuid::new_v4(), sample_record()))
                    .await
            })
        });
        for handle in writes.collect::<Vec<_>>() {
            handle.await.unwrap().unwrap();
        }

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.lines().count(), 20);
        assert!(contents
            .lines()
            .all(|l| serde_json::from_str::<serde_json::Value>(l).is_ok()));
    }

    #[tokio::test]
    async fn test_append_to_directory_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = CandidateStore::open(dir.path()).unwrap();

        let err = store.append(&serde_json::json!({"a": 1})).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
