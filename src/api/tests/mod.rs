//! Unit tests for the request facade.
