use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_file_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/outputs/report.pdf");

        let storage = LocalStorage::new();
        storage.write_file(&path, b"%PDF").await.unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"%PDF");
    }

    #[tokio::test]
    async fn write_file_overwrites_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");

        let storage = LocalStorage::new();
        storage.write_file(&path, b"first").await.unwrap();
        storage.write_file(&path, b"second").await.unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
    }
}
