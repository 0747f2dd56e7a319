//! Client side of the expense tracker
//!
//! - api: the `ExpenseApi` seam and its HTTP implementation
//! - board: local mirror of the server's expenses (optimistic delete,
//!   confirmed update, create append)
//! - form: add/edit form state
//! - render: plain-text rendering of board state

pub mod api;
pub mod board;
pub mod error;
pub mod form;
pub mod render;

pub use api::{ExpenseApi, HttpExpenseApi};
pub use board::{BoardState, EditState, ExpenseBoard};
pub use error::{ClientError, ClientResult};
pub use form::{EditForm, ExpenseForm, FormMessage, Severity};
