use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;

/// Writes files relative to `base_path`; absolute paths are used as-is.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // 覆寫既有檔案
        fs::write(&full_path, data)?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parents_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("reports/out.pdf", b"first").await.unwrap();
        storage.write_file("reports/out.pdf", b"second").await.unwrap();

        let written = std::fs::read(temp_dir.path().join("reports/out.pdf")).unwrap();
        assert_eq!(written, b"second");
    }

    #[tokio::test]
    async fn test_absolute_path_ignores_base() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("abs.pdf");
        let storage = LocalStorage::new("/nonexistent-base");

        storage
            .write_file(target.to_str().unwrap(), b"pdf")
            .await
            .unwrap();

        assert!(target.exists());
    }

    #[tokio::test]
    async fn test_unwritable_destination_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();
        let storage = LocalStorage::new(&blocker);

        let err = storage.write_file("out.pdf", b"pdf").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::ScrapeError::IoError(_)));
    }
}
