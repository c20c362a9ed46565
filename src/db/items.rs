//! Item (page) database operations

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::Result;

/// Item record: one page of a parent document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: String,
    pub parent_id: String,
    pub label: Option<String>,
    pub item_order: Option<i64>,
    pub width: i64,
    pub height: i64,
    pub image_path: Option<String>,
}

impl Item {
    /// Order usable for navigation and canvas ids
    pub fn order(&self) -> Option<u32> {
        self.item_order
            .and_then(|order| u32::try_from(order).ok())
            .filter(|order| *order > 0)
    }
}

/// Create or replace item request
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertItem {
    pub id: String,
    pub parent_id: String,
    pub label: Option<String>,
    pub order: Option<i64>,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
    pub image_path: Option<String>,
}

/// Item repository
pub struct ItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a specific item
    pub async fn get(&self, id: &str) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, parent_id, label, item_order, width, height, image_path
            FROM items
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Pages of a parent document in collection order (unordered pages last)
    pub async fn children(&self, parent_id: &str) -> Result<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, parent_id, label, item_order, width, height, image_path
            FROM items
            WHERE parent_id = ?
            ORDER BY item_order IS NULL, item_order ASC, id ASC
            "#,
        )
        .bind(parent_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Create or replace an item
    pub async fn upsert(&self, data: &UpsertItem) -> Result<Item> {
        sqlx::query(
            r#"
            INSERT INTO items (id, parent_id, label, item_order, width, height, image_path)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                parent_id = excluded.parent_id,
                label = excluded.label,
                item_order = excluded.item_order,
                width = excluded.width,
                height = excluded.height,
                image_path = excluded.image_path,
                updated_at = datetime('now')
            "#,
        )
        .bind(&data.id)
        .bind(&data.parent_id)
        .bind(&data.label)
        .bind(data.order)
        .bind(data.width)
        .bind(data.height)
        .bind(&data.image_path)
        .execute(self.pool)
        .await?;

        Ok(Item {
            id: data.id.clone(),
            parent_id: data.parent_id.clone(),
            label: data.label.clone(),
            item_order: data.order,
            width: data.width,
            height: data.height,
            image_path: data.image_path.clone(),
        })
    }
}
