//! Add and edit form state

use expense_core::Expense;
use serde_json::{Number, Value};

pub const MISSING_FIELDS: &str = "Please fill in all required fields.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Inline message shown above a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub text: String,
    pub severity: Severity,
}

impl FormMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Success }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Warning }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Error }
    }
}

/// Parse user-typed amount text; unparseable input becomes `null`
pub fn parse_amount(raw: &str) -> Value {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// The "add expense" form
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    pub description: String,
    /// Raw text as typed
    pub amount: String,
    pub category: String,
    pub user_id: String,
    pub submitting: bool,
    pub message: Option<FormMessage>,
}

impl ExpenseForm {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            category: String::new(),
            user_id: user_id.into(),
            submitting: false,
            message: None,
        }
    }

    /// Set a field by name; any pending message is cleared
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match name {
            "description" => self.description = value,
            "amount" => self.amount = value,
            "category" => self.category = value,
            "user_id" => self.user_id = value,
            other => log::debug!("Ignoring unknown form field '{}'", other),
        }
        self.message = None;
    }

    /// Request body for the current input, or a warning when required fields are blank
    pub fn payload(&self) -> Result<Value, FormMessage> {
        if self.description.is_empty() || self.amount.is_empty() || self.category.is_empty() {
            return Err(FormMessage::warning(MISSING_FIELDS));
        }

        Ok(serde_json::json!({
            "description": self.description,
            "amount": parse_amount(&self.amount),
            "category": self.category,
            "user_id": self.user_id,
        }))
    }

    /// Clear the inputs after a successful submit, keeping the owner
    pub fn reset(&mut self) {
        self.description.clear();
        self.amount.clear();
        self.category.clear();
    }
}

/// The "edit expense" form, prefilled from an existing record
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub user_id: Value,
}

impl EditForm {
    pub fn from_expense(expense: &Expense) -> Self {
        let amount = match expense.field("amount") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        Self {
            description: expense.description().unwrap_or_default().to_string(),
            amount,
            category: expense.category().unwrap_or_default().to_string(),
            user_id: expense.user_id().cloned().unwrap_or(Value::Null),
        }
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match name {
            "description" => self.description = value,
            "amount" => self.amount = value,
            "category" => self.category = value,
            other => log::debug!("Ignoring unknown edit field '{}'", other),
        }
    }

    /// Full set of editable fields, amount converted back to a number
    pub fn payload(&self) -> Value {
        serde_json::json!({
            "description": self.description,
            "amount": parse_amount(&self.amount),
            "category": self.category,
            "user_id": self.user_id,
        })
    }
}
