//! Client state manager
//!
//! Holds a local copy of the server's expense list and keeps it in step
//! with the service:
//! - refresh replaces the list wholesale
//! - create appends the server-confirmed record
//! - delete is optimistic and rolls back on failure
//! - update waits for the server and then swaps in its response
//!
//! State lives behind a lock that is never held across a network call, so
//! a renderer can read it while a request is in flight.

use crate::api::ExpenseApi;
use crate::form::{EditForm, ExpenseForm, FormMessage};
use expense_core::Expense;
use log::{error, info};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const LOAD_FAILED: &str = "Failed to load expenses. Is the backend running?";
pub const DELETE_FAILED: &str = "Failed to delete expense. Please check the backend log.";
pub const UPDATE_FAILED: &str = "Failed to update expense. Check network connection.";
pub const CREATE_FAILED: &str = "Could not connect to the microservice or a server error occurred.";

/// Edit dialog state
#[derive(Debug, Clone, PartialEq)]
pub struct EditState {
    pub expense: Expense,
    pub form: EditForm,
    pub saving: bool,
    pub error: Option<String>,
}

/// Everything a renderer needs
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub expenses: Vec<Expense>,
    pub loading: bool,
    pub error: Option<String>,
    /// One-shot notification (e.g. a failed delete)
    pub alert: Option<String>,
    pub editing: Option<EditState>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            expenses: Vec::new(),
            loading: true,
            error: None,
            alert: None,
            editing: None,
        }
    }
}

impl BoardState {
    /// The list is only shown once loaded and while no error is pending
    pub fn visible_list(&self) -> Option<&[Expense]> {
        if self.loading || self.error.is_some() {
            None
        } else {
            Some(&self.expenses)
        }
    }
}

#[derive(Clone)]
pub struct ExpenseBoard {
    api: Arc<dyn ExpenseApi>,
    state: Arc<RwLock<BoardState>>,
}

impl ExpenseBoard {
    pub fn new(api: Arc<dyn ExpenseApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(BoardState::default())),
        }
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> BoardState {
        self.state.read().await.clone()
    }

    pub async fn expenses(&self) -> Vec<Expense> {
        self.state.read().await.expenses.clone()
    }

    pub async fn take_alert(&self) -> Option<String> {
        self.state.write().await.alert.take()
    }

    /// Fetch the full list from the server
    ///
    /// On failure the previously loaded expenses are kept and an error is set.
    pub async fn refresh(&self) {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let result = self.api.list().await;

        let mut state = self.state.write().await;
        match result {
            Ok(expenses) => {
                info!("Loaded {} expenses", expenses.len());
                state.expenses = expenses;
            }
            Err(e) => {
                error!("Error fetching expenses: {}", e);
                state.error = Some(LOAD_FAILED.to_string());
            }
        }
        state.loading = false;
    }

    /// Append an expense the server has already created
    pub async fn expense_added(&self, expense: Expense) {
        self.state.write().await.expenses.push(expense);
    }

    /// Submit the add form; on success the created expense is appended
    pub async fn submit(&self, form: &mut ExpenseForm) -> Option<Expense> {
        form.submitting = true;
        form.message = None;

        let payload = match form.payload() {
            Ok(payload) => payload,
            Err(warning) => {
                form.message = Some(warning);
                form.submitting = false;
                return None;
            }
        };

        let created = match self.api.create(payload).await {
            Ok(expense) => {
                let description = expense.description().unwrap_or_default();
                form.message = Some(FormMessage::success(format!(
                    "Expense \"{}\" recorded successfully!",
                    description
                )));
                form.reset();
                self.expense_added(expense.clone()).await;
                Some(expense)
            }
            Err(e) => {
                error!("Error creating expense: {}", e);
                form.message = Some(FormMessage::error(e.user_message(CREATE_FAILED)));
                None
            }
        };

        form.submitting = false;
        created
    }

    /// Remove an expense locally, then on the server
    ///
    /// The local removal happens before the request is sent. If the request
    /// fails the list is restored to what it was and an alert is raised.
    /// Returns whether the server confirmed the delete.
    pub async fn delete(&self, id: &str) -> bool {
        let snapshot = {
            let mut state = self.state.write().await;
            let snapshot = state.expenses.clone();
            state.expenses.retain(|e| e.id != id);
            snapshot
        };

        match self.api.delete(id).await {
            Ok(()) => {
                info!("Expense {} deleted successfully.", id);
                true
            }
            Err(e) => {
                error!("Error deleting expense {}: {}", id, e);
                let mut state = self.state.write().await;
                state.expenses = snapshot;
                state.alert = Some(DELETE_FAILED.to_string());
                false
            }
        }
    }

    pub async fn open_edit(&self, expense: &Expense) {
        self.state.write().await.editing = Some(EditState {
            expense: expense.clone(),
            form: EditForm::from_expense(expense),
            saving: false,
            error: None,
        });
    }

    pub async fn close_edit(&self) {
        self.state.write().await.editing = None;
    }

    /// Change a field of the open edit form; no-op when nothing is being edited
    pub async fn edit_field(&self, name: &str, value: impl Into<String>) {
        if let Some(editing) = self.state.write().await.editing.as_mut() {
            editing.form.set_field(name, value);
        }
    }

    /// Send the edit form to the server
    ///
    /// Local state changes only after the server confirms: the matching
    /// record is replaced with the response and the dialog closes. On
    /// failure the dialog stays open with an error.
    pub async fn save_edit(&self) -> Option<Expense> {
        let (id, payload) = {
            let mut state = self.state.write().await;
            let editing = state.editing.as_mut()?;
            editing.saving = true;
            editing.error = None;
            (editing.expense.id.clone(), editing.form.payload())
        };

        let result = self.api.update(&id, payload).await;

        let mut state = self.state.write().await;
        match result {
            Ok(updated) => {
                for expense in state.expenses.iter_mut() {
                    if expense.id == updated.id {
                        *expense = updated.clone();
                    }
                }
                state.editing = None;
                Some(updated)
            }
            Err(e) => {
                error!("Error updating expense {}: {}", id, e);
                if let Some(editing) = state.editing.as_mut() {
                    editing.saving = false;
                    editing.error = Some(e.user_message(UPDATE_FAILED));
                }
                None
            }
        }
    }
}
