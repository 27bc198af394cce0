pub mod auth_mode;
pub mod authenticated_user;

pub use auth_mode::*;
pub use authenticated_user::*;
