//! Text database operations

use sqlx::SqlitePool;

use crate::error::Result;
use crate::text::{Text, TextType};

/// Text repository
pub struct TextRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TextRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a specific text
    pub async fn get(&self, id: &str) -> Result<Option<Text>> {
        let text = sqlx::query_as::<_, Text>(
            r#"
            SELECT id, item_id, collection_id, text_type, language, source, file_path, text
            FROM texts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(text)
    }

    /// Texts of a parent document, optionally narrowed to a type and language
    pub async fn list_for_collection(
        &self,
        collection_id: &str,
        text_type: Option<TextType>,
        language: Option<&str>,
    ) -> Result<Vec<Text>> {
        let texts = sqlx::query_as::<_, Text>(
            r#"
            SELECT id, item_id, collection_id, text_type, language, source, file_path, text
            FROM texts
            WHERE collection_id = ?
              AND (? IS NULL OR text_type = ?)
              AND (? IS NULL OR language = ?)
            ORDER BY item_id ASC, id ASC
            "#,
        )
        .bind(collection_id)
        .bind(text_type)
        .bind(text_type)
        .bind(language)
        .bind(language)
        .fetch_all(self.pool)
        .await?;

        Ok(texts)
    }

    /// Texts of one resource sequence: exactly this type and language
    ///
    /// Unlike [`list_for_collection`](Self::list_for_collection), a missing
    /// language only matches texts without a language.
    pub async fn list_for_resource(
        &self,
        collection_id: &str,
        text_type: TextType,
        language: Option<&str>,
    ) -> Result<Vec<Text>> {
        let texts = sqlx::query_as::<_, Text>(
            r#"
            SELECT id, item_id, collection_id, text_type, language, source, file_path, text
            FROM texts
            WHERE collection_id = ?
              AND text_type = ?
              AND language IS ?
            ORDER BY item_id ASC, id ASC
            "#,
        )
        .bind(collection_id)
        .bind(text_type)
        .bind(language)
        .fetch_all(self.pool)
        .await?;

        Ok(texts)
    }

    /// Create or replace a text; the FTS index follows through triggers
    pub async fn upsert(&self, text: &Text) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO texts (id, item_id, collection_id, text_type, language, source, file_path, text)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                item_id = excluded.item_id,
                collection_id = excluded.collection_id,
                text_type = excluded.text_type,
                language = excluded.language,
                source = excluded.source,
                file_path = excluded.file_path,
                text = excluded.text,
                updated_at = datetime('now')
            "#,
        )
        .bind(&text.id)
        .bind(&text.item_id)
        .bind(&text.collection_id)
        .bind(text.text_type)
        .bind(&text.language)
        .bind(text.source)
        .bind(&text.file_path)
        .bind(&text.text)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::text::TextSource;

    fn text(id: &str, item_id: &str, text_type: TextType, language: Option<&str>) -> Text {
        Text {
            id: id.to_string(),
            item_id: item_id.to_string(),
            collection_id: "doc-1".to_string(),
            text_type,
            language: language.map(str::to_string),
            source: TextSource::Plain,
            file_path: None,
            text: format!("text of {}", id),
        }
    }

    #[tokio::test]
    async fn test_filter_by_type_and_language() {
        let pool = memory_pool().await;
        let repo = TextRepository::new(&pool);

        repo.upsert(&text("t1", "p1", TextType::Transcription, None)).await.unwrap();
        repo.upsert(&text("t2", "p1", TextType::Translation, Some("en"))).await.unwrap();
        repo.upsert(&text("t3", "p2", TextType::Translation, Some("de"))).await.unwrap();

        let all = repo.list_for_collection("doc-1", None, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let translations = repo
            .list_for_collection("doc-1", Some(TextType::Translation), None)
            .await
            .unwrap();
        assert_eq!(translations.len(), 2);

        let english = repo
            .list_for_collection("doc-1", Some(TextType::Translation), Some("en"))
            .await
            .unwrap();
        assert_eq!(english.len(), 1);
        assert_eq!(english[0].id, "t2");
    }

    #[tokio::test]
    async fn test_resource_sequence_matches_language_exactly() {
        let pool = memory_pool().await;
        let repo = TextRepository::new(&pool);

        repo.upsert(&text("t1", "p1", TextType::Translation, None)).await.unwrap();
        repo.upsert(&text("t2", "p2", TextType::Translation, Some("de"))).await.unwrap();
        repo.upsert(&text("t3", "p3", TextType::Translation, Some("en"))).await.unwrap();
        repo.upsert(&text("t4", "p1", TextType::Transcription, None)).await.unwrap();

        let untagged = repo
            .list_for_resource("doc-1", TextType::Translation, None)
            .await
            .unwrap();
        let ids: Vec<&str> = untagged.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1"]);

        let german = repo
            .list_for_resource("doc-1", TextType::Translation, Some("de"))
            .await
            .unwrap();
        assert_eq!(german.len(), 1);
        assert_eq!(german[0].id, "t2");
    }

    #[tokio::test]
    async fn test_upsert_roundtrip() {
        let pool = memory_pool().await;
        let repo = TextRepository::new(&pool);

        let mut original = text("t1", "p1", TextType::Transcription, None);
        repo.upsert(&original).await.unwrap();

        original.text = "updated".to_string();
        repo.upsert(&original).await.unwrap();

        assert_eq!(repo.get("t1").await.unwrap(), Some(original));
    }
}
