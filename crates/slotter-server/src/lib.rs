//! Slotter Server — HTTP layer, configuration, and bootstrap.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use config::{load_config, AppConfig};
pub use routes::router;
pub use state::AppState;
