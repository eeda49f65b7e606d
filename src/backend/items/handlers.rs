/**
 * Item Handlers
 *
 * CRUD handlers for `/api/items`. Every route here sits behind
 * `require_session`; the handlers themselves only log who acted.
 */

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::error::BackendError;
use crate::backend::items::db::{self, Item};
use crate::backend::middleware::AuthUser;

const MAX_NAME_CHARS: usize = 200;

/// Body of create and update requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ItemRequest {
    fn validate(&self) -> Result<(), BackendError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(BackendError::validation("name", "Item name is required"));
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(BackendError::validation(
                "name",
                format!("Item name must be at most {} characters", MAX_NAME_CHARS),
            ));
        }
        Ok(())
    }
}

fn item_request(payload: Result<Json<ItemRequest>, JsonRejection>) -> Result<ItemRequest, BackendError> {
    let Json(request) = payload.map_err(|rejection| {
        BackendError::handler(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;
    request.validate()?;
    Ok(request)
}

fn parse_id(raw: &str) -> Result<Uuid, BackendError> {
    // An unparseable id cannot name an existing item.
    Uuid::parse_str(raw).map_err(|_| BackendError::not_found("item", raw))
}

/// GET /api/items
pub async fn list_items(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Item>>, BackendError> {
    let items = db::list_items(&pool).await?;
    tracing::debug!("{} listed {} items", user.subject, items.len());
    Ok(Json(items))
}

/// POST /api/items
pub async fn create_item(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), BackendError> {
    let request = item_request(payload)?;

    let item = db::create_item(&pool, request.name.trim(), &request.description).await?;
    tracing::info!("{} created item {}", user.subject, item.id);

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/items/{id}
pub async fn get_item(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Item>, BackendError> {
    let id = parse_id(&id)?;
    let item = db::get_item(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("item", id.to_string()))?;
    Ok(Json(item))
}

/// PUT /api/items/{id}
pub async fn update_item(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<Json<Item>, BackendError> {
    let id = parse_id(&id)?;
    let request = item_request(payload)?;

    let item = db::update_item(&pool, id, request.name.trim(), &request.description)
        .await?
        .ok_or_else(|| BackendError::not_found("item", id.to_string()))?;
    tracing::info!("{} updated item {}", user.subject, item.id);

    Ok(Json(item))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, BackendError> {
    let id = parse_id(&id)?;

    if !db::delete_item(&pool, id).await? {
        return Err(BackendError::not_found("item", id.to_string()));
    }
    tracing::info!("{} deleted item {}", user.subject, id);

    Ok(Json(MessageResponse::new("Item deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_request_validation() {
        let ok = ItemRequest {
            name: "Widget".to_string(),
            description: String::new(),
        };
        assert!(ok.validate().is_ok());

        let blank = ItemRequest {
            name: "   ".to_string(),
            description: "x".to_string(),
        };
        assert!(matches!(
            blank.validate(),
            Err(BackendError::Validation { field: "name", .. })
        ));

        let long = ItemRequest {
            name: "n".repeat(MAX_NAME_CHARS + 1),
            description: String::new(),
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert_eq!(
            parse_id("not-a-uuid").unwrap_err().status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
