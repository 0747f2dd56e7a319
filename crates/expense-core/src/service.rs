//! Expense service
//!
//! Orchestrates validation and store access. The store sits behind a
//! `tokio::sync::RwLock`: mutations take the write half so that id
//! assignment and find-then-replace run without interleaving.

use crate::error::{CoreError, CoreResult};
use crate::models::Expense;
use crate::store::ExpenseStore;
use crate::validation::{validate_new_expense, ValidationRule};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

const NO_UPDATE_FIELDS: &str = "No fields provided for update.";

/// Create, list, update and delete expenses
#[derive(Clone, Default)]
pub struct ExpenseService {
    store: Arc<RwLock<ExpenseStore>>,
}

impl ExpenseService {
    pub fn new(store: ExpenseStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Validate `payload` and store it as a new expense
    pub async fn create(&self, payload: Value) -> CoreResult<Expense> {
        validate_new_expense(&payload).map_err(|rule| CoreError::validation(rule.message()))?;

        let Value::Object(data) = payload else {
            return Err(CoreError::validation(ValidationRule::Description.message()));
        };

        let mut store = self.store.write().await;
        store.create(data)
    }

    /// Every stored expense, in creation order, regardless of owner
    pub async fn list(&self) -> Vec<Expense> {
        let store = self.store.read().await;
        store.find_all().to_vec()
    }

    pub async fn get(&self, id: &str) -> CoreResult<Expense> {
        let store = self.store.read().await;
        store
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found(id))
    }

    /// Merge the fields of `payload` into an existing expense
    ///
    /// Only emptiness is checked; field values are not re-validated.
    pub async fn update(&self, id: &str, payload: Value) -> CoreResult<Expense> {
        let partial = match payload {
            Value::Object(map) if !map.is_empty() => map,
            _ => return Err(CoreError::validation(NO_UPDATE_FIELDS)),
        };

        let mut store = self.store.write().await;
        store
            .update(id, &partial)?
            .ok_or_else(|| CoreError::not_found(id))
    }

    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        let mut store = self.store.write().await;
        if store.remove(id) {
            Ok(())
        } else {
            Err(CoreError::not_found(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn groceries() -> Value {
        json!({
            "description": "Groceries",
            "amount": 200,
            "category": "Food",
            "user_id": "user123"
        })
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let service = ExpenseService::default();
        let created = service.create(groceries()).await.unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.description(), Some("Groceries"));
        assert_eq!(service.list().await, vec![created]);
    }

    #[tokio::test]
    async fn test_create_validation_error() {
        let service = ExpenseService::default();
        let err = service
            .create(json!({"description": "Taxi", "amount": -3, "category": "Travel", "user_id": "u"}))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "Amount is required and must be a positive number.");
        assert!(service.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_unscoped_and_ordered() {
        let service = ExpenseService::default();
        let mut other = groceries();
        other["user_id"] = json!("someone-else");

        let a = service.create(groceries()).await.unwrap();
        let b = service.create(other).await.unwrap();

        let ids: Vec<String> = service.list().await.into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn test_get() {
        let service = ExpenseService::default();
        let created = service.create(groceries()).await.unwrap();

        assert_eq!(service.get(&created.id).await.unwrap(), created);
        assert_eq!(service.get("nope").await.unwrap_err(), CoreError::not_found("nope"));
    }

    #[tokio::test]
    async fn test_update() {
        let service = ExpenseService::default();
        let created = service.create(groceries()).await.unwrap();

        let updated = service.update(&created.id, json!({"amount": 600})).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount(), Some(600.0));
        assert_eq!(updated.category(), Some("Food"));
    }

    #[tokio::test]
    async fn test_update_empty_payload_checked_first() {
        let service = ExpenseService::default();

        let err = service.update("9999", json!({})).await.unwrap_err();
        assert_eq!(err, CoreError::validation("No fields provided for update."));

        let err = service.update("9999", json!(["amount"])).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let service = ExpenseService::default();
        let err = service.update("9999", json!({"amount": 100})).await.unwrap_err();
        assert_eq!(err.to_string(), "Expense with ID 9999 not found.");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = ExpenseService::default();
        let created = service.create(groceries()).await.unwrap();

        assert!(service.delete(&created.id).await.is_ok());
        assert_eq!(service.delete(&created.id).await.unwrap_err().code(), ErrorCode::NotFound);
        assert!(service.list().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_unique_ids() {
        let service = ExpenseService::default();
        let mut handles = Vec::new();
        for _ in 0..50 {
            let service = service.clone();
            handles.push(tokio::spawn(async move { service.create(groceries()).await }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }
}
