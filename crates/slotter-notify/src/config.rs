//! SMTP configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the SMTP mail transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// SMTP relay hostname (e.g. `smtp.example.com`).
    pub host: String,
    /// Submission port (default: 587, STARTTLS).
    #[serde(default = "default_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender address used in the `From` header.
    pub from_address: String,
    /// Display name for the `From` header.
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

fn default_port() -> u16 {
    587
}

fn default_from_name() -> String {
    "Slotter".into()
}
