//! Property-based tests for the record store.
