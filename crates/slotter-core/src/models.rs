//! Domain models for Slotter.
//!
//! These are the core types shared across all crates.

pub mod slot;
pub mod tenant;
pub mod user;
