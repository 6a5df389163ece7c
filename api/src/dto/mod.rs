pub mod error;
pub mod verification;

pub use error::*;
pub use verification::*;
