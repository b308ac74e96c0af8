//! Slotter Auth — password authentication and JWT issuance/validation.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use password::check_password;
pub use service::{AuthService, LoginOutput, RegisterInput};
pub use token::AccessTokenClaims;
