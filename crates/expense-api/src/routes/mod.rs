//! Route modules for the API server
//!
//! - expenses: CRUD endpoints under the configured base path
//! - health: service liveness at `/`

pub mod expenses;
pub mod health;
