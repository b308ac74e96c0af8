//! Platform administration endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use slotter_core::models::user::CreateUser;
use surrealdb::Connection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::AdminUser;
use crate::routes::auth::UserResponse;
use crate::routes::tenants::{SlotDetailResponse, TenantResponse};
use crate::state::AppState;

/// Admin view of a tenant: owner included.
#[derive(Debug, Serialize)]
pub struct TenantAdminResponse {
    #[serde(flatten)]
    pub tenant: TenantResponse,
    pub owner_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Platform counters.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_users: usize,
    pub active_users: usize,
    pub admin_users: usize,
    pub total_tenants: usize,
    pub active_tenants: usize,
    pub total_slots: usize,
    pub booked_slots: usize,
    pub available_slots: usize,
}

pub async fn list_users<C: Connection>(
    State(state): State<AppState<C>>,
    _admin: AdminUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

pub async fn create_user<C: Connection>(
    State(state): State<AppState<C>>,
    _admin: AdminUser,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .create(CreateUser {
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            is_admin: request.is_admin,
        })
        .await?;
    Ok(Json(user.into()))
}

pub async fn toggle_user_status<C: Connection>(
    State(state): State<AppState<C>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.toggle_active(&admin, user_id).await?;
    Ok(Json(user.into()))
}

pub async fn toggle_user_admin<C: Connection>(
    State(state): State<AppState<C>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.toggle_admin(&admin, user_id).await?;
    Ok(Json(user.into()))
}

pub async fn delete_user<C: Connection>(
    State(state): State<AppState<C>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.users.delete(&admin, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_tenants<C: Connection>(
    State(state): State<AppState<C>>,
    _admin: AdminUser,
) -> Result<Json<Vec<TenantAdminResponse>>, ApiError> {
    let tenants = state.tenants.list_all().await?;
    Ok(Json(
        tenants
            .into_iter()
            .map(|t| {
                let owner_id = t.owner_id;
                TenantAdminResponse {
                    tenant: t.into(),
                    owner_id,
                }
            })
            .collect(),
    ))
}

pub async fn toggle_tenant_status<C: Connection>(
    State(state): State<AppState<C>>,
    _admin: AdminUser,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<TenantResponse>, ApiError> {
    let tenant = state.tenants.toggle_active(tenant_id).await?;
    Ok(Json(tenant.into()))
}

pub async fn list_slots<C: Connection>(
    State(state): State<AppState<C>>,
    _admin: AdminUser,
) -> Result<Json<Vec<SlotDetailResponse>>, ApiError> {
    let slots = state.slots.all_slots().await?;
    Ok(Json(slots.into_iter().map(Into::into).collect()))
}

pub async fn stats<C: Connection>(
    State(state): State<AppState<C>>,
    _admin: AdminUser,
) -> Result<Json<StatsResponse>, ApiError> {
    let users = state.users.list().await?;
    let tenants = state.tenants.list_all().await?;
    let slots = state.slots.all_slots().await?;

    let booked_slots = slots.iter().filter(|s| s.is_booked).count();

    Ok(Json(StatsResponse {
        total_users: users.len(),
        active_users: users.iter().filter(|u| u.is_active).count(),
        admin_users: users.iter().filter(|u| u.is_admin).count(),
        total_tenants: tenants.len(),
        active_tenants: tenants.iter().filter(|t| t.is_active).count(),
        total_slots: slots.len(),
        booked_slots,
        available_slots: slots.len() - booked_slots,
    }))
}
