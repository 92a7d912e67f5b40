pub mod auth;
pub mod logistics;

pub use auth::*;
pub use logistics::*;
