//! Core expense processing and business logic
//!
//! - models: the open `Expense` record and timestamp normalization
//! - validation: field checks applied when an expense is created
//! - store: the in-memory authoritative collection
//! - service: validation + store orchestration behind an async lock

pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{CoreError, CoreResult, ErrorBody, ErrorCode, ErrorSeverity};
pub use models::{Expense, Fields};
pub use service::ExpenseService;
pub use store::ExpenseStore;
pub use validation::{validate_new_expense, ValidationRule};
