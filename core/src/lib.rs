//! # PhoneVerify Core
//!
//! Core business logic and domain layer for the PhoneVerify backend.
//! This crate contains the verification session entity, phone number and
//! PIN id value objects, the verification service with its gateway trait,
//! and error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
