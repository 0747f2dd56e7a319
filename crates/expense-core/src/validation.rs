//! Field checks for new expenses
//!
//! Rules run in a fixed order and only the first failure is reported.
//! Updates are not re-validated.

use crate::models::is_truthy;
use serde_json::Value;

/// Minimum number of characters in a description
pub const MIN_DESCRIPTION_LEN: usize = 3;

/// The rule a create payload failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    Description,
    Amount,
    Category,
    UserId,
}

impl ValidationRule {
    /// Message returned to the client
    pub fn message(&self) -> &'static str {
        match self {
            ValidationRule::Description => {
                "Description is required and must be at least 3 characters long."
            }
            ValidationRule::Amount => "Amount is required and must be a positive number.",
            ValidationRule::Category => "Category is required.",
            ValidationRule::UserId => "User ID is required for ownership tracking.",
        }
    }
}

impl std::fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Check a create payload, returning the first rule it breaks
pub fn validate_new_expense(payload: &Value) -> Result<(), ValidationRule> {
    let description_ok = matches!(
        payload.get("description"),
        Some(Value::String(s)) if s.chars().count() >= MIN_DESCRIPTION_LEN
    );
    if !description_ok {
        return Err(ValidationRule::Description);
    }

    let amount_ok = payload.get("amount")
        .and_then(Value::as_f64)
        .map(|amount| amount > 0.0)
        .unwrap_or(false);
    if !amount_ok {
        return Err(ValidationRule::Amount);
    }

    if !matches!(payload.get("category"), Some(Value::String(s)) if !s.is_empty()) {
        return Err(ValidationRule::Category);
    }

    if !payload.get("user_id").map(is_truthy).unwrap_or(false) {
        return Err(ValidationRule::UserId);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "description": "Groceries",
            "amount": 200,
            "category": "Food",
            "user_id": "user123"
        })
    }

    fn with(key: &str, value: Value) -> Value {
        let mut payload = valid();
        payload[key] = value;
        payload
    }

    fn without(key: &str) -> Value {
        let mut payload = valid();
        payload.as_object_mut().unwrap().remove(key);
        payload
    }

    #[test]
    fn test_valid_payload() {
        assert_eq!(validate_new_expense(&valid()), Ok(()));
        assert_eq!(validate_new_expense(&with("amount", json!(0.01))), Ok(()));
        assert_eq!(validate_new_expense(&with("user_id", json!(7))), Ok(()));
    }

    #[test]
    fn test_description_rule() {
        assert_eq!(validate_new_expense(&without("description")), Err(ValidationRule::Description));
        assert_eq!(validate_new_expense(&with("description", json!("ab"))), Err(ValidationRule::Description));
        assert_eq!(validate_new_expense(&with("description", json!(123))), Err(ValidationRule::Description));
        assert_eq!(validate_new_expense(&with("description", json!("abc"))), Ok(()));
    }

    #[test]
    fn test_amount_rule() {
        assert_eq!(validate_new_expense(&without("amount")), Err(ValidationRule::Amount));
        assert_eq!(validate_new_expense(&with("amount", json!(0))), Err(ValidationRule::Amount));
        assert_eq!(validate_new_expense(&with("amount", json!(-5))), Err(ValidationRule::Amount));
        assert_eq!(validate_new_expense(&with("amount", json!("200"))), Err(ValidationRule::Amount));
    }

    #[test]
    fn test_category_rule() {
        assert_eq!(validate_new_expense(&without("category")), Err(ValidationRule::Category));
        assert_eq!(validate_new_expense(&with("category", json!(""))), Err(ValidationRule::Category));
        assert_eq!(validate_new_expense(&with("category", json!(["Food"]))), Err(ValidationRule::Category));
    }

    #[test]
    fn test_user_id_rule() {
        assert_eq!(validate_new_expense(&without("user_id")), Err(ValidationRule::UserId));
        assert_eq!(validate_new_expense(&with("user_id", json!(""))), Err(ValidationRule::UserId));
        assert_eq!(validate_new_expense(&with("user_id", json!(null))), Err(ValidationRule::UserId));
    }

    #[test]
    fn test_first_failure_wins() {
        assert_eq!(validate_new_expense(&json!({})), Err(ValidationRule::Description));
        assert_eq!(
            validate_new_expense(&json!({"description": "Taxi", "category": ""})),
            Err(ValidationRule::Amount)
        );
        assert_eq!(validate_new_expense(&json!([1, 2, 3])), Err(ValidationRule::Description));
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationRule::Category.to_string(), "Category is required.");
        assert!(ValidationRule::Description.message().contains("at least 3 characters"));
    }
}
