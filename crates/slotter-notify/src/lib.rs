//! Slotter Notify — SMTP booking notifications.

pub mod config;
pub mod smtp;
pub mod templates;

pub use config::SmtpConfig;
pub use smtp::Notifier;
