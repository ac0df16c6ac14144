pub mod auth;
pub mod response;

pub use auth::{admin_auth_middleware, Principal};
pub use response::{ApiResponse, ApiResult};
