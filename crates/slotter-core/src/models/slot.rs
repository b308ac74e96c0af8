//! Slot domain model.
//!
//! A slot is a single bookable time window belonging to exactly one
//! tenant. Slots are created unbooked; the booking transaction flips
//! `is_booked` exactly once and the flag never reverts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable time window.
///
/// Invariant: `is_booked == false` iff all client fields and
/// `booked_at` are unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// Scheduled start instant, compared against the same clock that
    /// provides "now" to the availability and booking checks.
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub is_booked: bool,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub booked_at: Option<DateTime<Utc>>,
}

/// Fields required to create a new (unbooked) slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlot {
    pub tenant_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// Client details submitted with a public booking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSlot {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_message: Option<String>,
}
