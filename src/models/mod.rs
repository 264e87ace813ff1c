pub mod auth;
pub mod bookmark;
pub mod user;

pub use auth::*;
pub use bookmark::*;
pub use user::*;
