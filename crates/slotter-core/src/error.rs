//! Error types for the Slotter system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlotterError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Slot is already booked: {id}")]
    AlreadyBooked { id: String },

    #[error("Booking policy violation: {message}")]
    PolicyViolation { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Authorization denied: {reason}")]
    Forbidden { reason: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Notification dispatch failed: {0}")]
    Notification(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SlotterResult<T> = Result<T, SlotterError>;
