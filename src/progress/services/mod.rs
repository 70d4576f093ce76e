//! Progress rules shared by the project and task services.

mod ledger;

pub use ledger::ProgressLedger;
