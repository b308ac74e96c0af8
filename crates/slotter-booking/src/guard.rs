//! Tenant ownership authorization.

use slotter_core::error::{SlotterError, SlotterResult};
use slotter_core::models::{tenant::Tenant, user::User};
use slotter_core::repository::TenantRepository;
use uuid::Uuid;

/// Authorization check for tenant-scoped management operations.
///
/// Ownership is always re-derived from the stored tenant record;
/// caller-supplied ownership claims are never trusted.
#[derive(Clone)]
pub struct OwnershipGuard<T: TenantRepository> {
    tenants: T,
}

impl<T: TenantRepository> OwnershipGuard<T> {
    pub fn new(tenants: T) -> Self {
        Self { tenants }
    }

    /// Pass iff `user` is a platform admin or owns the tenant.
    ///
    /// Returns the fetched tenant on success so callers do not load it
    /// twice. A missing tenant reports `NotFound` before any ownership
    /// decision is made.
    pub async fn require_owner_or_admin(
        &self,
        user: &User,
        tenant_id: Uuid,
    ) -> SlotterResult<Tenant> {
        let tenant = self.tenants.get_by_id(tenant_id).await?;

        if user.is_admin || tenant.owner_id == user.id {
            Ok(tenant)
        } else {
            Err(SlotterError::Forbidden {
                reason: "not the owner of this tenant".into(),
            })
        }
    }
}
