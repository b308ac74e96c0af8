//! Public booking page endpoints (no authentication).

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slotter_core::error::SlotterError;
use slotter_core::models::slot::{BookSlot, Slot};
use slotter_core::models::tenant::Tenant;
use surrealdb::Connection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Public view of a tenant: no id, owner, or account email.
#[derive(Debug, Serialize)]
pub struct TenantPublic {
    pub username: String,
    pub display_name: String,
    pub title: String,
    pub description: Option<String>,
    pub primary_color: String,
    pub logo_url: Option<String>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub business_phone: Option<String>,
    pub business_email: Option<String>,
    pub allow_public_booking: bool,
    pub booking_lead_time_hours: u32,
    pub max_advance_days: u32,
}

impl From<Tenant> for TenantPublic {
    fn from(t: Tenant) -> Self {
        Self {
            username: t.username,
            display_name: t.display_name,
            title: t.title,
            description: t.description,
            primary_color: t.primary_color,
            logo_url: t.logo_url,
            business_name: t.business_name,
            business_address: t.business_address,
            business_phone: t.business_phone,
            business_email: t.business_email,
            allow_public_booking: t.allow_public_booking,
            booking_lead_time_hours: t.booking_lead_time_hours,
            max_advance_days: t.max_advance_days,
        }
    }
}

/// Public view of an available slot: no client details.
#[derive(Debug, Serialize)]
pub struct SlotPublic {
    pub id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

impl From<Slot> for SlotPublic {
    fn from(s: Slot) -> Self {
        Self {
            id: s.id,
            scheduled_at: s.scheduled_at,
            duration_minutes: s.duration_minutes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_message: Option<String>,
}

impl BookingRequest {
    fn into_book_slot(self) -> Result<BookSlot, SlotterError> {
        if self.client_name.trim().is_empty() {
            return Err(SlotterError::Validation {
                message: "client name must not be empty".into(),
            });
        }
        if !self.client_email.contains('@') {
            return Err(SlotterError::Validation {
                message: "client email is not a valid address".into(),
            });
        }
        Ok(BookSlot {
            client_name: self.client_name,
            client_email: self.client_email,
            client_phone: self.client_phone,
            client_message: self.client_message,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct BookingConfirmation {
    pub message: String,
    pub slot_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub tenant_username: String,
}

pub async fn tenant_profile<C: Connection>(
    State(state): State<AppState<C>>,
    Path(username): Path<String>,
) -> Result<Json<TenantPublic>, ApiError> {
    let tenant = state.tenants.public_profile(&username).await?;
    Ok(Json(tenant.into()))
}

pub async fn book_slot<C: Connection>(
    State(state): State<AppState<C>>,
    Path((username, slot_id)): Path<(String, Uuid)>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookingConfirmation>, ApiError> {
    let details = request.into_book_slot()?;
    let booked = state
        .booking
        .book(&username, slot_id, details, Utc::now())
        .await?;

    Ok(Json(BookingConfirmation {
        message: "Termin erfolgreich gebucht".into(),
        slot_id: booked.id,
        scheduled_at: booked.scheduled_at,
        tenant_username: username,
    }))
}
