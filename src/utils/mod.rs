// Utility functions
pub mod config;
pub mod error;
pub mod password;
pub mod validation;

pub use config::*;
pub use error::*;
