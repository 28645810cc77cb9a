//! Flat-file JSON collections.
//!
//! Every collection lives in its own `<name>.json` file holding a JSON array. Writes replace the
//! whole file and there is no locking: concurrent writers lose updates, last writer wins.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;

use crate::store::StoreError;

/// Directory of JSON collection files.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create when missing) the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();

        fs::create_dir_all(&dir).await?;

        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn collection<T>(&self, name: &str) -> JsonCollection<T> {
        JsonCollection {
            path: self.dir.join(format!("{name}.json")),
            marker: PhantomData,
        }
    }
}

/// A single JSON array file of records.
pub struct JsonCollection<T> {
    path: PathBuf,
    marker: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Read every record; a missing or blank file is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or does not hold a JSON array of records.
    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(error.into()),
        }
    }

    /// Replace the file contents with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error when serialisation or the write fails.
    pub async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)?;

        fs::write(&self.path, bytes).await?;

        Ok(())
    }
}

impl<T> Clone for JsonCollection<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            marker: PhantomData,
        }
    }
}

impl<T> Debug for JsonCollection<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("JsonCollection")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: u64,
        name: String,
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() -> TestResult {
        let dir = TempDir::new()?;
        let store = JsonFileStore::open(dir.path()).await?;

        let rows = store.collection::<Row>("rows").load().await?;

        assert!(rows.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn saved_records_are_read_back_in_order() -> TestResult {
        let dir = TempDir::new()?;
        let store = JsonFileStore::open(dir.path().join("nested")).await?;
        let rows = store.collection::<Row>("rows");

        rows.save(&[
            Row {
                id: 2,
                name: "b".to_string(),
            },
            Row {
                id: 1,
                name: "a".to_string(),
            },
        ])
        .await?;

        let loaded = rows.load().await?;

        assert_eq!(loaded.iter().map(|row| row.id).collect::<Vec<_>>(), [2, 1]);

        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() -> TestResult {
        let dir = TempDir::new()?;
        let store = JsonFileStore::open(dir.path()).await?;

        fs::write(dir.path().join("rows.json"), b"{not json").await?;

        let result = store.collection::<Row>("rows").load().await;

        assert!(
            matches!(result, Err(StoreError::Json(_))),
            "expected Json error, got {result:?}"
        );

        Ok(())
    }
}
