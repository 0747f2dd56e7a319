//! In-memory expense store
//!
//! The store is a plain owned collection; callers that share it across
//! requests wrap it in a lock (see [`crate::ExpenseService`]), which makes
//! every mutation below a single critical section.

use crate::error::CoreResult;
use crate::models::{parse_timestamp, resolve_date, Expense, Fields};
use chrono::Utc;
use serde_json::Value;

const ID_FIELD: &str = "id";
const DATE_FIELD: &str = "date";

/// Authoritative collection of expenses for the lifetime of the process
#[derive(Debug)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    next_id: u64,
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
            next_id: 1,
        }
    }

    /// All expenses in insertion order
    pub fn find_all(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Append a new expense built from `data`
    ///
    /// A fresh id is always assigned; an `id` in `data` is ignored. The
    /// `date` defaults to now when absent or falsy.
    pub fn create(&mut self, data: Fields) -> CoreResult<Expense> {
        let id = self.generate_id();
        let date = resolve_date(data.get(DATE_FIELD), || Ok(Utc::now()))?;

        let fields = data
            .into_iter()
            .filter(|(key, _)| key != ID_FIELD && key != DATE_FIELD)
            .collect();

        let expense = Expense { id, fields, date };
        self.expenses.push(expense.clone());
        log::debug!("Stored expense {} ({} total)", expense.id, self.len());
        Ok(expense)
    }

    /// Merge `partial` into the expense with `id`
    ///
    /// Returns `Ok(None)` when no such expense exists. The id never changes
    /// and the record keeps its position.
    pub fn update(&mut self, id: &str, partial: &Fields) -> CoreResult<Option<Expense>> {
        let index = match self.expenses.iter().position(|e| e.id == id) {
            Some(index) => index,
            None => return Ok(None),
        };

        let existing = &self.expenses[index];
        let date = resolve_date(partial.get(DATE_FIELD), || {
            parse_timestamp(&Value::String(existing.date.clone()))
        })?;

        let mut fields = existing.fields.clone();
        for (key, value) in partial {
            if key != ID_FIELD && key != DATE_FIELD {
                fields.insert(key.clone(), value.clone());
            }
        }

        let updated = Expense {
            id: existing.id.clone(),
            fields,
            date,
        };
        log::debug!("Updated expense {}", updated.id);
        self.expenses[index] = updated.clone();
        Ok(Some(updated))
    }

    /// Drop the expense with `id`; true if one was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        let removed = self.expenses.len() < before;
        if removed {
            log::debug!("Removed expense {}", id);
        }
        removed
    }

    fn generate_id(&mut self) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        id
    }
}
