//! Word stream cache
//!
//! Parsed ALTO word streams keyed by file path, with LRU eviction. Search
//! and annotation pages hit the same pages repeatedly, so parsing once per
//! file keeps request latency flat.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use super::provider::WordStreamProvider;
use super::types::{Text, Word};
use super::TextError;

const DEFAULT_CAPACITY: usize = 64;

/// Thread-safe word stream cache in front of a provider
#[derive(Clone)]
pub struct WordStreamCache {
    provider: Arc<dyn WordStreamProvider>,
    streams: Arc<Mutex<LruCache<String, Arc<Vec<Word>>>>>,
}

impl WordStreamCache {
    pub fn new(provider: Arc<dyn WordStreamProvider>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or(NonZeroUsize::new(DEFAULT_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);

        Self {
            provider,
            streams: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// The underlying provider
    pub fn provider(&self) -> &dyn WordStreamProvider {
        self.provider.as_ref()
    }

    /// Word stream of a positional text
    pub async fn words(&self, text: &Text) -> Result<Arc<Vec<Word>>, TextError> {
        let file_path = text
            .file_path
            .as_deref()
            .ok_or_else(|| TextError::MissingFile(text.id.clone()))?;

        let key = file_path.to_string();

        let cached = self.streams.lock().get(&key).cloned();
        if let Some(words) = cached {
            return Ok(words);
        }

        // Lock is not held across the read; concurrent misses may parse twice
        let words = Arc::new(self.provider.read_words(file_path).await?);
        self.streams.lock().put(key, Arc::clone(&words));

        Ok(words)
    }

    /// Drop a cached stream, e.g. after the text was re-indexed
    pub fn invalidate(&self, file_path: &str) {
        self.streams.lock().pop(&file_path.to_string());
    }

    pub fn len(&self) -> usize {
        self.streams.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::provider::MockProvider;
    use crate::text::{TextSource, TextType, WordBox};
    use std::sync::atomic::Ordering;

    fn alto_text(id: &str, file_path: Option<&str>) -> Text {
        Text {
            id: id.to_string(),
            item_id: "item-1".to_string(),
            collection_id: "coll-1".to_string(),
            text_type: TextType::Transcription,
            language: None,
            source: TextSource::Alto,
            file_path: file_path.map(str::to_string),
            text: String::new(),
        }
    }

    #[tokio::test]
    async fn test_second_read_is_cached() {
        let provider = Arc::new(MockProvider::new(vec![Word::new(
            "word",
            0,
            WordBox::new(0, 0, 1, 1),
        )]));
        let cache = WordStreamCache::new(provider.clone(), 4);
        let text = alto_text("t1", Some("a.xml"));

        let first = cache.words(&text).await.unwrap();
        let second = cache.words(&text).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.reads.load(Ordering::SeqCst), 1);

        cache.invalidate("a.xml");
        assert!(cache.is_empty());
        cache.words(&text).await.unwrap();
        assert_eq!(provider.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_text_without_file() {
        let cache = WordStreamCache::new(Arc::new(MockProvider::new(vec![])), 4);
        let result = cache.words(&alto_text("t1", None)).await;
        assert!(matches!(result, Err(TextError::MissingFile(_))));
    }
}
