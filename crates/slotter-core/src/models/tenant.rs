//! Tenant domain model.
//!
//! A tenant is an independent business account with its own public
//! booking page (addressed by its username slug) and its own pool of
//! bookable slots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{SlotterError, SlotterResult};

/// An independent business account with a public booking page.
///
/// The `username` is the URL slug of the tenant's page and is unique
/// across the whole system when lower-cased. `booking_lead_time_hours`
/// and `max_advance_days` bound the publicly bookable time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    /// Globally unique, lower-cased URL slug (e.g. `acme`).
    pub username: String,
    pub display_name: String,
    pub email: String,
    /// Heading shown on the public booking page.
    pub title: String,
    pub description: Option<String>,
    /// Hex color (`#RRGGBB`) used for page theming.
    pub primary_color: String,
    pub logo_url: Option<String>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub business_phone: Option<String>,
    pub business_email: Option<String>,
    pub is_active: bool,
    pub allow_public_booking: bool,
    /// Minimum notice in hours between "now" and a bookable slot.
    pub booking_lead_time_hours: u32,
    /// How far into the future slots may be booked, in days.
    pub max_advance_days: u32,
    /// The user who owns this tenant.
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenant {
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub primary_color: Option<String>,
    pub logo_url: Option<String>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub business_phone: Option<String>,
    pub business_email: Option<String>,
    pub allow_public_booking: Option<bool>,
    pub booking_lead_time_hours: Option<u32>,
    pub max_advance_days: Option<u32>,
    pub owner_id: Uuid,
}

/// Fields that can be updated on an existing tenant.
///
/// `None` means "leave unchanged"; unset fields are never written.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateTenant {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub primary_color: Option<String>,
    pub logo_url: Option<String>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub business_phone: Option<String>,
    pub business_email: Option<String>,
    pub allow_public_booking: Option<bool>,
    pub booking_lead_time_hours: Option<u32>,
    pub max_advance_days: Option<u32>,
}

/// Validate a tenant username slug: 3–50 characters, ASCII letters,
/// digits, underscores, and hyphens only.
///
/// Callers lower-case the slug before storage; validation accepts
/// mixed case.
pub fn validate_username(username: &str) -> SlotterResult<()> {
    if username.len() < 3 || username.len() > 50 {
        return Err(SlotterError::Validation {
            message: "username must be between 3 and 50 characters".into(),
        });
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(SlotterError::Validation {
            message: "username may only contain letters, digits, underscores, and hyphens".into(),
        });
    }
    Ok(())
}

/// Validate a page theme color: `#` followed by six hex digits.
pub fn validate_color(color: &str) -> SlotterResult<()> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(SlotterError::Validation {
            message: "primary color must be a hex color code like #7F7FFF".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_usernames() {
        for name in ["acme", "acme-berlin", "dr_who", "Studio42"] {
            assert!(validate_username(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_short_long_and_invalid_usernames() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"x".repeat(51)).is_err());
        assert!(validate_username("no spaces").is_err());
        assert!(validate_username("umlaut-ü").is_err());
    }

    #[test]
    fn validates_hex_colors() {
        assert!(validate_color("#7F7FFF").is_ok());
        assert!(validate_color("#abcdef").is_ok());
        assert!(validate_color("7F7FFF").is_err());
        assert!(validate_color("#7F7FF").is_err());
        assert!(validate_color("#7F7FFG").is_err());
    }
}
