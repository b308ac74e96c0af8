//! Tenant and slot management endpoints for owners and admins.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slotter_core::models::slot::{CreateSlot, Slot};
use slotter_core::models::tenant::{CreateTenant, Tenant, UpdateTenant};
use surrealdb::Connection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::routes::public::SlotPublic;
use crate::state::AppState;

/// Owner view of a tenant.
#[derive(Debug, Serialize)]
pub struct TenantResponse {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub title: String,
    pub description: Option<String>,
    pub primary_color: String,
    pub logo_url: Option<String>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub business_phone: Option<String>,
    pub business_email: Option<String>,
    pub is_active: bool,
    pub allow_public_booking: bool,
    pub booking_lead_time_hours: u32,
    pub max_advance_days: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tenant> for TenantResponse {
    fn from(t: Tenant) -> Self {
        Self {
            id: t.id,
            username: t.username,
            display_name: t.display_name,
            email: t.email,
            title: t.title,
            description: t.description,
            primary_color: t.primary_color,
            logo_url: t.logo_url,
            business_name: t.business_name,
            business_address: t.business_address,
            business_phone: t.business_phone,
            business_email: t.business_email,
            is_active: t.is_active,
            allow_public_booking: t.allow_public_booking,
            booking_lead_time_hours: t.booking_lead_time_hours,
            max_advance_days: t.max_advance_days,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Owner/admin view of a slot, including booking details.
#[derive(Debug, Serialize)]
pub struct SlotDetailResponse {
    pub id: Uuid,
    pub tenant_id: Uuid,
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

impl From<Slot> for SlotDetailResponse {
    fn from(s: Slot) -> Self {
        Self {
            id: s.id,
            tenant_id: s.tenant_id,
            scheduled_at: s.scheduled_at,
            duration_minutes: s.duration_minutes,
            is_booked: s.is_booked,
            client_name: s.client_name,
            client_email: s.client_email,
            client_phone: s.client_phone,
            client_message: s.client_message,
            created_at: s.created_at,
            booked_at: s.booked_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTenantRequest {
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
}

#[derive(Debug, Deserialize)]
pub struct CreateSlotRequest {
    pub scheduled_at: DateTime<Utc>,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
}

fn default_duration() -> u32 {
    60
}

pub async fn list_own<C: Connection>(
    State(state): State<AppState<C>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<TenantResponse>>, ApiError> {
    let tenants = state.tenants.list_for_owner(&user).await?;
    Ok(Json(tenants.into_iter().map(Into::into).collect()))
}

pub async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateTenantRequest>,
) -> Result<Json<TenantResponse>, ApiError> {
    let tenant = state
        .tenants
        .create(
            &user,
            CreateTenant {
                username: request.username,
                display_name: request.display_name,
                email: request.email,
                title: request.title,
                description: request.description,
                primary_color: request.primary_color,
                logo_url: request.logo_url,
                business_name: request.business_name,
                business_address: request.business_address,
                business_phone: request.business_phone,
                business_email: request.business_email,
                allow_public_booking: request.allow_public_booking,
                booking_lead_time_hours: request.booking_lead_time_hours,
                max_advance_days: request.max_advance_days,
                // Overwritten by the service with the acting user.
                owner_id: user.id,
            },
        )
        .await?;
    Ok(Json(tenant.into()))
}

pub async fn update<C: Connection>(
    State(state): State<AppState<C>>,
    AuthUser(user): AuthUser,
    Path(tenant_id): Path<Uuid>,
    Json(request): Json<UpdateTenant>,
) -> Result<Json<TenantResponse>, ApiError> {
    let tenant = state.tenants.update(&user, tenant_id, request).await?;
    Ok(Json(tenant.into()))
}

pub async fn remove<C: Connection>(
    State(state): State<AppState<C>>,
    AuthUser(user): AuthUser,
    Path(tenant_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.tenants.delete(&user, tenant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Slot listing shared between the public page and the owner view.
///
/// The path parameter is a tenant UUID for the authenticated owner
/// view (full slot details) and a username for the public view
/// (available slots only). An unauthenticated request always gets the
/// public interpretation.
pub async fn tenant_slots<C: Connection>(
    State(state): State<AppState<C>>,
    user: Option<AuthUser>,
    Path(tenant): Path<String>,
) -> Result<Response, ApiError> {
    if let (Ok(tenant_id), Some(AuthUser(user))) = (Uuid::parse_str(&tenant), &user) {
        let slots = state.slots.tenant_slots(user, tenant_id).await?;
        let body: Vec<SlotDetailResponse> = slots.into_iter().map(Into::into).collect();
        return Ok(Json(body).into_response());
    }

    let slots = state.booking.available_slots(&tenant, Utc::now()).await?;
    let body: Vec<SlotPublic> = slots.into_iter().map(Into::into).collect();
    Ok(Json(body).into_response())
}

pub async fn create_slot<C: Connection>(
    State(state): State<AppState<C>>,
    AuthUser(user): AuthUser,
    Path(tenant_id): Path<Uuid>,
    Json(request): Json<CreateSlotRequest>,
) -> Result<Json<SlotDetailResponse>, ApiError> {
    let slot = state
        .slots
        .create_slot(
            &user,
            CreateSlot {
                tenant_id,
                scheduled_at: request.scheduled_at,
                duration_minutes: request.duration_minutes,
            },
        )
        .await?;
    Ok(Json(slot.into()))
}

pub async fn delete_slot<C: Connection>(
    State(state): State<AppState<C>>,
    AuthUser(user): AuthUser,
    Path(slot_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.slots.delete_slot(&user, slot_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
