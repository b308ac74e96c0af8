//! Tenant lifecycle management.

use slotter_core::error::SlotterResult;
use slotter_core::models::tenant::{
    validate_color, validate_username, CreateTenant, Tenant, UpdateTenant,
};
use slotter_core::models::user::User;
use slotter_core::repository::TenantRepository;
use uuid::Uuid;

use crate::guard::OwnershipGuard;

pub struct TenantService<T: TenantRepository> {
    tenants: T,
    guard: OwnershipGuard<T>,
}

impl<T: TenantRepository + Clone> TenantService<T> {
    pub fn new(tenants: T) -> Self {
        let guard = OwnershipGuard::new(tenants.clone());
        Self { tenants, guard }
    }
}

impl<T: TenantRepository> TenantService<T> {
    /// Create a tenant owned by `user`.
    ///
    /// The username slug and theme color are validated before any
    /// write; the uniqueness check is the repository's.
    pub async fn create(&self, user: &User, mut input: CreateTenant) -> SlotterResult<Tenant> {
        validate_username(&input.username)?;
        if let Some(ref color) = input.primary_color {
            validate_color(color)?;
        }
        input.owner_id = user.id;
        self.tenants.create(input).await
    }

    /// Public profile resolution (active, booking enabled).
    pub async fn public_profile(&self, username: &str) -> SlotterResult<Tenant> {
        self.tenants.get_public_by_username(username).await
    }

    pub async fn update(
        &self,
        user: &User,
        tenant_id: Uuid,
        input: UpdateTenant,
    ) -> SlotterResult<Tenant> {
        if let Some(ref color) = input.primary_color {
            validate_color(color)?;
        }
        self.guard.require_owner_or_admin(user, tenant_id).await?;
        self.tenants.update(tenant_id, input).await
    }

    pub async fn delete(&self, user: &User, tenant_id: Uuid) -> SlotterResult<()> {
        self.guard.require_owner_or_admin(user, tenant_id).await?;
        self.tenants.delete(tenant_id).await
    }

    /// Flip the activation flag. Admin-gated at the HTTP layer.
    pub async fn toggle_active(&self, tenant_id: Uuid) -> SlotterResult<Tenant> {
        let tenant = self.tenants.get_by_id(tenant_id).await?;
        self.tenants.set_active(tenant_id, !tenant.is_active).await
    }

    pub async fn list_all(&self) -> SlotterResult<Vec<Tenant>> {
        self.tenants.list_all().await
    }

    pub async fn list_for_owner(&self, user: &User) -> SlotterResult<Vec<Tenant>> {
        self.tenants.list_by_owner(user.id).await
    }
}
