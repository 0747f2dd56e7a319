//! Expense routes - CRUD over the in-memory store

pub mod api;

pub use api::{create_expense, delete_expense, get_expense, list_expenses, update_expense};

use crate::{method_not_allowed, AppState};
use axum::routing::{get, post};
use axum::Router;

/// Routes relative to the API base path
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/expenses",
            post(create_expense)
                .get(list_expenses)
                .fallback(method_not_allowed),
        )
        .route(
            "/expenses/:id",
            get(get_expense)
                .put(update_expense)
                .delete(delete_expense)
                .fallback(method_not_allowed),
        )
}
