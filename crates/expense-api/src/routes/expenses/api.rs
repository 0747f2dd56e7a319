//! Expense API endpoints - JSON API
//!
//! Endpoints:
//! - create_expense: POST /expenses
//! - list_expenses: GET /expenses
//! - get_expense: GET /expenses/:id
//! - update_expense: PUT /expenses/:id
//! - delete_expense: DELETE /expenses/:id

use crate::error::ApiError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use expense_core::{CoreError, Expense};
use log::{debug, info};
use serde_json::Value;

/// `application/json` or any `+json` media type, parameters ignored
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Parse a request body as JSON
///
/// Bodies that are empty or not declared as JSON count as `{}`.
fn parse_body(headers: &HeaderMap, body: &Bytes) -> Result<Value, ApiError> {
    if !is_json(headers) {
        if !body.is_empty() {
            debug!("Ignoring {} byte body without a JSON content type", body.len());
        }
        return Ok(Value::Object(Default::default()));
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))
}

/// Log a service failure and convert it for the response
fn failed(operation: &'static str) -> impl FnOnce(CoreError) -> ApiError {
    move |error| {
        error.log(operation);
        ApiError::from(error)
    }
}

pub async fn create_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let payload = parse_body(&headers, &body)?;

    let expense = state
        .service
        .create(payload)
        .await
        .map_err(failed("create_expense"))?;

    info!("Created expense {}", expense.id);
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn list_expenses(State(state): State<AppState>) -> Json<Vec<Expense>> {
    let expenses = state.service.list().await;
    debug!("Listing {} expenses", expenses.len());
    Json(expenses)
}

pub async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Expense>, ApiError> {
    let expense = state.service.get(&id).await.map_err(failed("get_expense"))?;
    Ok(Json(expense))
}

pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Expense>, ApiError> {
    let payload = parse_body(&headers, &body)?;

    let expense = state
        .service
        .update(&id, payload)
        .await
        .map_err(failed("update_expense"))?;

    info!("Updated expense {}", expense.id);
    Ok(Json(expense))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(&id).await.map_err(failed("delete_expense"))?;

    info!("Expense {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_parse_body_empty_is_object() {
        let headers = json_headers("application/json");
        assert_eq!(parse_body(&headers, &Bytes::new()).unwrap(), serde_json::json!({}));
        assert_eq!(parse_body(&headers, &Bytes::from_static(b" \n")).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_parse_body_rejects_malformed() {
        let headers = json_headers("application/json; charset=utf-8");
        let err = parse_body(&headers, &Bytes::from_static(b"{\"amount\": ")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }));
        assert!(err.to_string().starts_with("Invalid JSON body"));
    }

    #[test]
    fn test_parse_body_requires_json_content_type() {
        let body = Bytes::from_static(b"{\"description\": \"Groceries\"}");

        let parsed = parse_body(&json_headers("application/merge-patch+json"), &body).unwrap();
        assert_eq!(parsed["description"], "Groceries");

        assert_eq!(parse_body(&json_headers("text/plain"), &body).unwrap(), serde_json::json!({}));
        assert_eq!(parse_body(&HeaderMap::new(), &body).unwrap(), serde_json::json!({}));
    }
}
