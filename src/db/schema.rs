//! Database schema initialization

use sqlx::SqlitePool;

use crate::error::Result;

/// Initialize the database schema
pub async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA_SQL).execute(pool).await?;

    crate::search::TextIndex::new(pool).initialize().await?;

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Items: the pages (canvases) of a parent document
CREATE TABLE IF NOT EXISTS items (
    id TEXT PRIMARY KEY,
    parent_id TEXT NOT NULL,
    label TEXT,
    -- 1-based position within the parent; NULL when unknown
    item_order INTEGER,
    width INTEGER NOT NULL DEFAULT 0,
    height INTEGER NOT NULL DEFAULT 0,
    -- Image path relative to the image server root
    image_path TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_items_parent_id ON items(parent_id);
CREATE INDEX IF NOT EXISTS idx_items_order ON items(parent_id, item_order);

-- Texts: transcriptions and translations attached to items
CREATE TABLE IF NOT EXISTS texts (
    id TEXT PRIMARY KEY,
    item_id TEXT NOT NULL,
    collection_id TEXT NOT NULL,
    -- 'transcription' or 'translation'
    text_type TEXT NOT NULL,
    language TEXT,
    -- 'plain' or 'alto'
    source TEXT NOT NULL,
    file_path TEXT,
    text TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_texts_item_id ON texts(item_id);
CREATE INDEX IF NOT EXISTS idx_texts_collection ON texts(collection_id, text_type, language);

-- Access tokens for restricted collections
CREATE TABLE IF NOT EXISTS tokens (
    token TEXT PRIMARY KEY,
    collection_id TEXT NOT NULL,
    valid_from TEXT,
    valid_to TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_tokens_collection ON tokens(collection_id);
"#;
