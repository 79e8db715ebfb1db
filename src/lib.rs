// Expense Tracker - Core Library
// In-memory expense store, list filters and spending analysis, plus the
// HTTP API used by the server binary

pub mod error;
pub mod expense;
pub mod query;
pub mod analysis;
pub mod store;
pub mod config;
pub mod logging;

// Only compile the HTTP layer when the server feature is enabled
#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use error::ExpenseError;
pub use expense::{Category, Expense, NewExpense, ValidExpense, parse_date};
pub use query::{ExpenseQuery, DateRange, filter_expenses};
pub use analysis::{CategoryTotal, SpendingAnalysis, analyze};
pub use store::{ExpenseRepository, InMemoryExpenseStore};
pub use config::ServerConfig;

#[cfg(feature = "server")]
pub use api::{router, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
