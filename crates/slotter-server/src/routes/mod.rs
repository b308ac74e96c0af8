//! HTTP route table.

use axum::routing::{delete, get, patch, post};
use axum::Router;
use surrealdb::Connection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod public;
pub mod tenants;

/// Build the full application router.
///
/// `/api/tenants/{tenant}` carries both the public surface (the
/// parameter is a username) and the management surface (the parameter
/// is a tenant UUID); the route table uses one parameter name because
/// overlapping routes must agree on it.
pub fn router<C: Connection>(state: AppState<C>) -> Router {
    Router::new()
        .route("/api/auth/register", post(auth::register::<C>))
        .route("/api/auth/login", post(auth::login::<C>))
        .route("/api/auth/me", get(auth::me).put(auth::update_me::<C>))
        .route(
            "/api/tenants",
            get(tenants::list_own::<C>).post(tenants::create::<C>),
        )
        .route(
            "/api/tenants/{tenant}",
            get(public::tenant_profile::<C>)
                .put(tenants::update::<C>)
                .delete(tenants::remove::<C>),
        )
        .route(
            "/api/tenants/{tenant}/slots",
            get(tenants::tenant_slots::<C>).post(tenants::create_slot::<C>),
        )
        .route(
            "/api/tenants/{tenant}/slots/{slot_id}/book",
            post(public::book_slot::<C>),
        )
        .route("/api/slots/{slot_id}", delete(tenants::delete_slot::<C>))
        .route(
            "/api/admin/users",
            get(admin::list_users::<C>).post(admin::create_user::<C>),
        )
        .route(
            "/api/admin/users/{user_id}/toggle-status",
            patch(admin::toggle_user_status::<C>),
        )
        .route(
            "/api/admin/users/{user_id}/toggle-admin",
            patch(admin::toggle_user_admin::<C>),
        )
        .route("/api/admin/users/{user_id}", delete(admin::delete_user::<C>))
        .route("/api/admin/tenants", get(admin::list_tenants::<C>))
        .route(
            "/api/admin/tenants/{tenant_id}/toggle-status",
            patch(admin::toggle_tenant_status::<C>),
        )
        .route("/api/admin/slots", get(admin::list_slots::<C>))
        .route("/api/admin/stats", get(admin::stats::<C>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
