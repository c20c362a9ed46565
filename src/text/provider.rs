//! Word Stream Providers
//!
//! Defines the provider trait and the filesystem-backed ALTO implementation.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use super::alto::parse_alto;
use super::types::Word;
use super::TextError;

/// Source of page word streams and running text
#[async_trait]
pub trait WordStreamProvider: Send + Sync {
    /// Read and parse the ordered word stream of an ALTO file
    async fn read_words(&self, file_path: &str) -> Result<Vec<Word>, TextError>;

    /// Read a plain text file
    async fn read_plain(&self, file_path: &str) -> Result<String, TextError>;
}

/// Reads ALTO and plain text files below a data directory
pub struct AltoFileProvider {
    root: PathBuf,
}

impl AltoFileProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a relative path, refusing anything that escapes the root
    fn resolve(&self, file_path: &str) -> Result<PathBuf, TextError> {
        let relative = Path::new(file_path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if escapes {
            return Err(TextError::ResourceUnavailable(format!(
                "Refusing path outside data directory: {}",
                file_path
            )));
        }

        Ok(self.root.join(relative))
    }

    async fn read_file(&self, file_path: &str) -> Result<String, TextError> {
        let path = self.resolve(file_path)?;
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            TextError::ResourceUnavailable(format!("Failed to read {}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl WordStreamProvider for AltoFileProvider {
    async fn read_words(&self, file_path: &str) -> Result<Vec<Word>, TextError> {
        let xml = self.read_file(file_path).await?;
        let words = parse_alto(&xml)?;
        tracing::debug!("Parsed {} words from {}", words.len(), file_path);
        Ok(words)
    }

    async fn read_plain(&self, file_path: &str) -> Result<String, TextError> {
        self.read_file(file_path).await
    }
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    pub words: Vec<Word>,
    pub reads: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockProvider {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            reads: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl WordStreamProvider for MockProvider {
    async fn read_words(&self, _file_path: &str) -> Result<Vec<Word>, TextError> {
        self.reads.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.words.clone())
    }

    async fn read_plain(&self, _file_path: &str) -> Result<String, TextError> {
        Ok(super::alto::words_to_text(&self.words))
    }
}
