//! Value objects representing immutable domain concepts.

pub mod phone_number;
pub mod pin_id;

// Re-export commonly used types
pub use phone_number::PhoneNumber;
pub use pin_id::PinId;
