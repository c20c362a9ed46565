//! FTS5 full-text index over page texts
//!
//! `texts_fts` is an external-content FTS5 table over `texts`, kept in sync
//! with triggers. Queries narrow candidate texts; the exact match positions
//! and context are extracted afterwards by [`super::extract_matches`].

use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::text::{Text, TextType};

/// Filter applied to a text search
#[derive(Debug, Clone, Default)]
pub struct TextFilter<'q> {
    pub text_type: Option<TextType>,
    pub language: Option<&'q str>,
}

/// FTS5 text index
pub struct TextIndex<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TextIndex<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the FTS5 virtual table and its triggers
    pub async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE VIRTUAL TABLE IF NOT EXISTS texts_fts USING fts5(
                text,
                content='texts',
                content_rowid='rowid',
                tokenize='unicode61 remove_diacritics 2'
            )
            "#,
        )
        .execute(self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TRIGGER IF NOT EXISTS texts_fts_delete AFTER DELETE ON texts BEGIN
                INSERT INTO texts_fts(texts_fts, rowid, text)
                VALUES('delete', old.rowid, old.text);
            END
            "#,
        )
        .execute(self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TRIGGER IF NOT EXISTS texts_fts_insert AFTER INSERT ON texts BEGIN
                INSERT INTO texts_fts(rowid, text)
                VALUES(new.rowid, new.text);
            END
            "#,
        )
        .execute(self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TRIGGER IF NOT EXISTS texts_fts_update AFTER UPDATE ON texts BEGIN
                INSERT INTO texts_fts(texts_fts, rowid, text)
                VALUES('delete', old.rowid, old.text);
                INSERT INTO texts_fts(rowid, text)
                VALUES(new.rowid, new.text);
            END
            "#,
        )
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Rebuild the FTS index from the texts table
    pub async fn rebuild(&self) -> Result<usize> {
        sqlx::query("INSERT INTO texts_fts(texts_fts) VALUES('rebuild')")
            .execute(self.pool)
            .await?;

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM texts")
            .fetch_one(self.pool)
            .await?;

        Ok(count.0 as usize)
    }

    /// Texts of a collection containing the query phrase, best match first
    pub async fn search(
        &self,
        collection_id: &str,
        query: &str,
        filter: &TextFilter<'_>,
        limit: i32,
    ) -> Result<Vec<Text>> {
        self.run(collection_id, &sanitize_fts5_query(query), filter, limit)
            .await
    }

    /// Texts of a collection containing a word starting with the query
    pub async fn search_prefix(
        &self,
        collection_id: &str,
        query: &str,
        filter: &TextFilter<'_>,
        limit: i32,
    ) -> Result<Vec<Text>> {
        let sanitized = sanitize_fts5_query(query);
        if sanitized.is_empty() {
            return Ok(Vec::new());
        }

        self.run(collection_id, &format!("{}*", sanitized), filter, limit)
            .await
    }

    async fn run(
        &self,
        collection_id: &str,
        fts_query: &str,
        filter: &TextFilter<'_>,
        limit: i32,
    ) -> Result<Vec<Text>> {
        if fts_query.is_empty() {
            return Ok(Vec::new());
        }

        let texts = sqlx::query_as::<_, Text>(
            r#"
            SELECT t.id, t.item_id, t.collection_id, t.text_type, t.language,
                   t.source, t.file_path, t.text
            FROM texts t
            INNER JOIN texts_fts ON t.rowid = texts_fts.rowid
            WHERE texts_fts MATCH ?
              AND t.collection_id = ?
              AND (? IS NULL OR t.text_type = ?)
              AND (? IS NULL OR t.language = ?)
            ORDER BY texts_fts.rank
            LIMIT ?
            "#,
        )
        .bind(fts_query)
        .bind(collection_id)
        .bind(filter.text_type)
        .bind(filter.text_type)
        .bind(filter.language)
        .bind(filter.language)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(texts)
    }

    /// Get FTS5 index statistics
    pub async fn get_stats(&self) -> Result<IndexStats> {
        let texts_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM texts")
            .fetch_one(self.pool)
            .await?;

        let collections_count: (i64,) =
            sqlx::query_as("SELECT COUNT(DISTINCT collection_id) FROM texts")
                .fetch_one(self.pool)
                .await?;

        Ok(IndexStats {
            texts_indexed: texts_count.0 as usize,
            collections: collections_count.0 as usize,
        })
    }
}

/// FTS5 index statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub texts_indexed: usize,
    pub collections: usize,
}

/// Sanitize a query string for FTS5
///
/// The whole query is matched as one quoted phrase, so FTS5 operators in
/// user input are treated as text.
fn sanitize_fts5_query(query: &str) -> String {
    let mut result = String::with_capacity(query.len());

    for ch in query.chars() {
        match ch {
            '"' => result.push_str("\"\""),
            '*' | '(' | ')' | ':' | '^' | '+' => {}
            _ => result.push(ch),
        }
    }

    let trimmed = result.split_whitespace().collect::<Vec<_>>().join(" ");
    if trimmed.is_empty() {
        trimmed
    } else {
        format!("\"{}\"", trimmed)
    }
}
