//! Request validation middleware. Runs before the controllers and
//! short-circuits with 400 on malformed input, so storage failures are
//! the only error class the controllers have to map.

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Query, Request},
    middleware::Next,
    response::Response,
};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

use crate::database::models::Category;
use crate::error::ApiError;

// Matches the framework default so the validator never rejects a body
// the extractor would have accepted.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Body validator for POST /todos/create: title, description, and a
/// category from the fixed set are required.
pub async fn validate_create_body(request: Request, next: Next) -> Result<Response, ApiError> {
    let (parts, bytes, payload) = buffer_json(request).await?;

    if let Some(error) = check_create_body(&payload) {
        return Err(ApiError::bad_request(error));
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Body validator for PUT /todos/update/:id: title and description are
/// required. Category is immutable after creation and not accepted.
pub async fn validate_update_body(request: Request, next: Next) -> Result<Response, ApiError> {
    let (parts, bytes, payload) = buffer_json(request).await?;

    if let Some(error) = check_update_body(&payload) {
        return Err(ApiError::bad_request(error));
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Query validator: a `category` parameter, when present, must come from
/// the fixed set. Absent or valid continues the chain; invalid responds
/// 400 and stops. Strictly either/or.
pub async fn validate_category_query(
    Query(params): Query<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(category) = params.get("category") {
        if Category::from_str(category).is_err() {
            return Err(ApiError::bad_request("Invalid category parameter"));
        }
    }
    Ok(next.run(request).await)
}

/// Buffer the request body and parse it as JSON so it can be inspected
/// here and replayed for the controller's extractor.
async fn buffer_json(request: Request) -> Result<(axum::http::request::Parts, Bytes, Value), ApiError> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|_| ApiError::bad_request("Invalid request body"))?;
    let payload = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok((parts, bytes, payload))
}

fn check_create_body(payload: &Value) -> Option<&'static str> {
    if field_text(payload, "title").is_none() || field_text(payload, "description").is_none() {
        return Some("Title, description and category are required");
    }
    match field_text(payload, "category") {
        None => Some("Title, description and category are required"),
        Some(category) if Category::from_str(category).is_err() => {
            Some("Category must be one of personal, work, or shopping")
        }
        Some(_) => None,
    }
}

fn check_update_body(payload: &Value) -> Option<&'static str> {
    if field_text(payload, "title").is_none() || field_text(payload, "description").is_none() {
        return Some("Title and description are required");
    }
    None
}

/// A field counts as present only when it is a non-empty string.
/// Shared with the auth controllers, which validate in-handler.
pub(crate) fn field_text<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_body_requires_all_three_fields() {
        assert!(check_create_body(&json!({
            "title": "Buy milk", "description": "2%", "category": "personal"
        }))
        .is_none());

        assert!(check_create_body(&json!({ "description": "2%", "category": "personal" })).is_some());
        assert!(check_create_body(&json!({ "title": "Buy milk", "category": "personal" })).is_some());
        assert!(check_create_body(&json!({ "title": "Buy milk", "description": "2%" })).is_some());
        assert!(check_create_body(&json!(null)).is_some());
    }

    #[test]
    fn create_body_rejects_empty_and_non_string_fields() {
        assert!(check_create_body(&json!({
            "title": "", "description": "2%", "category": "personal"
        }))
        .is_some());
        assert!(check_create_body(&json!({
            "title": "   ", "description": "2%", "category": "personal"
        }))
        .is_some());
        assert!(check_create_body(&json!({
            "title": 7, "description": "2%", "category": "personal"
        }))
        .is_some());
    }

    #[test]
    fn create_body_rejects_category_outside_the_fixed_set() {
        assert_eq!(
            check_create_body(&json!({
                "title": "t", "description": "d", "category": "chores"
            })),
            Some("Category must be one of personal, work, or shopping")
        );
    }

    #[test]
    fn update_body_requires_title_and_description_only() {
        assert!(check_update_body(&json!({ "title": "t", "description": "d" })).is_none());
        assert!(check_update_body(&json!({ "title": "t" })).is_some());
        assert!(check_update_body(&json!({ "description": "d" })).is_some());
        assert!(check_update_body(&json!(null)).is_some());
    }
}
