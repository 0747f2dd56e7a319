//! Plain-text rendering of board state

use crate::board::BoardState;
use chrono::{DateTime, Utc};
use expense_core::Expense;

pub const EMPTY_LIST: &str = "No expenses recorded yet. Time to add one!";
pub const LOADING: &str = "Loading expenses...";

/// Calendar day of a stored timestamp, as shown in list rows
pub fn format_day(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// One row: description, amount, then category and date
pub fn render_expense(expense: &Expense) -> String {
    let amount = match expense.amount() {
        Some(amount) => format!("${:.2}", amount),
        None => "$-".to_string(),
    };
    let date = expense
        .timestamp()
        .map(|ts| format_day(&ts))
        .unwrap_or_else(|| expense.date.clone());

    format!(
        "[{}] {}  {}\n    Category: {} | Date: {}",
        expense.id,
        expense.description().unwrap_or_default(),
        amount,
        expense.category().unwrap_or_default(),
        date
    )
}

pub fn render_list(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return EMPTY_LIST.to_string();
    }
    expenses.iter().map(render_expense).collect::<Vec<_>>().join("\n")
}

/// Whole board: loading indicator, error, or list, followed by any alert
/// and the open edit dialog
pub fn render_board(state: &BoardState) -> String {
    let mut out = match (state.loading, &state.error) {
        (true, _) => LOADING.to_string(),
        (false, Some(error)) => format!("Error: {}", error),
        (false, None) => render_list(&state.expenses),
    };

    if let Some(alert) = &state.alert {
        out.push_str(&format!("\n! {}", alert));
    }

    if let Some(editing) = &state.editing {
        out.push_str(&format!(
            "\nEditing expense {}: {} / {} / {}",
            editing.expense.id, editing.form.description, editing.form.amount, editing.form.category
        ));
        if editing.saving {
            out.push_str(" (saving...)");
        }
        if let Some(error) = &editing.error {
            out.push_str(&format!("\n  {}", error));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::EditState;
    use crate::form::EditForm;
    use serde_json::json;

    fn expense(amount: serde_json::Value) -> Expense {
        Expense {
            id: "1".to_string(),
            fields: json!({
                "description": "Groceries",
                "amount": amount,
                "category": "Food",
                "user_id": "user123"
            })
            .as_object()
            .cloned()
            .unwrap(),
            date: "2024-03-05T14:30:00.000Z".to_string(),
        }
    }

    fn loaded(expenses: Vec<Expense>) -> BoardState {
        BoardState { expenses, loading: false, ..BoardState::default() }
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_list(&[]), "No expenses recorded yet. Time to add one!");
    }

    #[test]
    fn test_render_row() {
        let row = render_expense(&expense(json!(200)));
        assert_eq!(row, "[1] Groceries  $200.00\n    Category: Food | Date: 2024-03-05");
    }

    #[test]
    fn test_format_day() {
        let late = DateTime::parse_from_rfc3339("2024-12-31T23:59:59.999Z").unwrap().with_timezone(&Utc);
        assert_eq!(format_day(&late), "2024-12-31");
    }

    #[test]
    fn test_unparseable_date_rendered_verbatim() {
        let mut odd = expense(json!(1));
        odd.date = "sometime".to_string();
        assert!(render_expense(&odd).ends_with("Date: sometime"));
    }

    #[test]
    fn test_render_non_numeric_amount() {
        let row = render_expense(&expense(json!("lots")));
        assert!(row.contains("$-"));
    }

    #[test]
    fn test_render_board_states() {
        assert_eq!(render_board(&BoardState::default()), LOADING);

        let mut state = loaded(vec![expense(json!(12.5))]);
        assert!(render_board(&state).contains("$12.50"));

        state.error = Some("Failed to load expenses. Is the backend running?".to_string());
        assert_eq!(
            render_board(&state),
            "Error: Failed to load expenses. Is the backend running?"
        );
    }

    #[test]
    fn test_render_alert_and_edit() {
        let target = expense(json!(200));
        let mut state = loaded(vec![target.clone()]);
        state.alert = Some("Failed to delete expense. Please check the backend log.".to_string());
        state.editing = Some(EditState {
            form: EditForm::from_expense(&target),
            expense: target,
            saving: true,
            error: None,
        });

        let out = render_board(&state);
        assert!(out.contains("! Failed to delete expense."));
        assert!(out.contains("Editing expense 1: Groceries / 200 / Food (saving...)"));
    }
}
