//! Slotter Core — domain models, repository trait definitions, and
//! shared error types for the multi-tenant appointment booking
//! service.
//!
//! This crate has no I/O dependencies. Storage and notification
//! backends implement the traits defined here.

pub mod error;
pub mod models;
pub mod notify;
pub mod repository;

pub use error::{SlotterError, SlotterResult};
