//! Timeline assembly and running-balance projection for a single account.

pub mod account;
pub mod obligation;
pub mod project;
pub mod transaction;
pub mod window;

pub use account::Account;
pub use obligation::{PostedTransaction, RecurringObligation, SourceKind};
pub use project::{expand_obligations, project, project_account};
pub use transaction::GeneratedTransaction;
pub use window::ProjectionWindow;
