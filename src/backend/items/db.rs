/**
 * Item Database Operations
 *
 * Plain keyed-record storage for inventory items. No business rules live
 * here beyond what the schema enforces.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Item struct representing a row in the `items` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    /// Unique item ID (UUID)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Create a new item
pub async fn create_item(
    pool: &SqlitePool,
    name: &str,
    description: &str,
) -> Result<Item, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Item>(
        r#"
        INSERT INTO items (id, name, description, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, name, description, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// List all items, newest first
pub async fn list_items(pool: &SqlitePool) -> Result<Vec<Item>, sqlx::Error> {
    sqlx::query_as::<_, Item>(
        r#"
        SELECT id, name, description, created_at, updated_at
        FROM items
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Get item by ID
///
/// # Returns
/// Item or None if not found
pub async fn get_item(pool: &SqlitePool, id: Uuid) -> Result<Option<Item>, sqlx::Error> {
    sqlx::query_as::<_, Item>(
        r#"
        SELECT id, name, description, created_at, updated_at
        FROM items
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Replace an item's name and description
///
/// # Returns
/// Updated item or None if not found
pub async fn update_item(
    pool: &SqlitePool,
    id: Uuid,
    name: &str,
    description: &str,
) -> Result<Option<Item>, sqlx::Error> {
    sqlx::query_as::<_, Item>(
        r#"
        UPDATE items
        SET name = ?, description = ?, updated_at = ?
        WHERE id = ?
        RETURNING id, name, description, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete an item
///
/// # Returns
/// `true` if a row was removed
pub async fn delete_item(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
