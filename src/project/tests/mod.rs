//! Unit tests for the project module.

mod domain_tests;
