//! Unit tests for identity types.
