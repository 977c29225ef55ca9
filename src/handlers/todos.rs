use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::Category;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: String,
    pub category: Category,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: String,
    pub description: String,
}

/// An id that does not parse as a UUID cannot address any record.
fn parse_todo_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::not_found("Todo not found"))
}

/// GET /todos - all todo records, unfiltered.
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let todos = state.todos.select_all().await?;
    Ok(Json(json!({ "todos": todos })))
}

/// GET /todos/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_todo_id(&id)?;
    match state.todos.select_one(id).await? {
        Some(todo) => Ok(Json(json!({ "todo": todo }))),
        None => Err(ApiError::not_found("Todo not found")),
    }
}

/// POST /todos/create - body validated upstream by the middleware.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let todo = state
        .todos
        .insert(&payload.title, &payload.description, payload.category)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Todo created successfully", "todo": todo })),
    ))
}

/// PUT /todos/update/:id - title and description only; category is
/// immutable after creation.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTodoRequest>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_todo_id(&id)?;
    match state.todos.update(id, &payload.title, &payload.description).await? {
        Some(todo) => Ok(Json(json!({ "message": "Todo updated successfully", "todo": todo }))),
        None => Err(ApiError::not_found("Todo not found")),
    }
}

/// DELETE /todos/delete/:id - confirmation message only, no body echo.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_todo_id(&id)?;
    if state.todos.delete(id).await? {
        Ok(Json(json!({ "message": "Todo deleted successfully" })))
    } else {
        Err(ApiError::not_found("Todo not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_maps_to_not_found() {
        let err = parse_todo_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Todo not found");
    }

    #[test]
    fn well_formed_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(parse_todo_id(&id.to_string()).unwrap(), id);
    }
}
