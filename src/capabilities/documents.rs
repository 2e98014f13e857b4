//! Document Store
//!
//! Where export documents are written and import documents are read from.
//! The chat manager only produces and validates bytes; file pickers,
//! downloads and paths live behind this trait.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Transport for export/import documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a document, returning a description of where it went
    async fn write_document(&self, bytes: &[u8], suggested_name: &str) -> io::Result<String>;

    /// Read the document chosen for import
    async fn read_document(&self) -> io::Result<Vec<u8>>;
}

/// Filesystem-backed store: writes into a directory, reads one chosen file
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    dir: PathBuf,
    source: Option<PathBuf>,
}

impl FsDocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            source: None,
        }
    }

    /// Builder method: file to read on import
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn write_document(&self, bytes: &[u8], suggested_name: &str) -> io::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;

        // Keep the document inside the export directory
        let file_name = Path::new(suggested_name)
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty file name"))?;
        let path = self.dir.join(file_name);

        tokio::fs::write(&path, bytes).await?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "Document written");

        Ok(path.display().to_string())
    }

    async fn read_document(&self) -> io::Result<Vec<u8>> {
        let path = self.source.as_ref().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no import file selected")
        })?;

        let bytes = tokio::fs::read(path).await?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Document read");
        Ok(bytes)
    }
}
