//! Unit tests for PIN gateway implementations
