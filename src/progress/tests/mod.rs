//! Unit tests for progress records and the ledger.
