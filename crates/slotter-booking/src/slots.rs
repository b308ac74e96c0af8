//! Guarded slot management for tenant owners and admins.

use slotter_core::error::SlotterResult;
use slotter_core::models::slot::{CreateSlot, Slot};
use slotter_core::models::user::User;
use slotter_core::repository::{SlotRepository, TenantRepository};
use uuid::Uuid;

use crate::guard::OwnershipGuard;

pub struct SlotService<T: TenantRepository, S: SlotRepository> {
    guard: OwnershipGuard<T>,
    slots: S,
}

impl<T: TenantRepository, S: SlotRepository> SlotService<T, S> {
    pub fn new(guard: OwnershipGuard<T>, slots: S) -> Self {
        Self { guard, slots }
    }

    /// Create an unbooked slot for a tenant the user controls.
    pub async fn create_slot(&self, user: &User, input: CreateSlot) -> SlotterResult<Slot> {
        self.guard
            .require_owner_or_admin(user, input.tenant_id)
            .await?;
        self.slots.create(input).await
    }

    /// Delete a slot the user controls, booked or not.
    ///
    /// The ownership check runs against the slot's stored tenant, not
    /// any id the caller supplies.
    pub async fn delete_slot(&self, user: &User, slot_id: Uuid) -> SlotterResult<()> {
        let slot = self.slots.get(slot_id).await?;
        self.guard
            .require_owner_or_admin(user, slot.tenant_id)
            .await?;
        self.slots.delete(slot_id).await
    }

    /// All slots of a tenant the user controls, including booked ones
    /// and their client details.
    pub async fn tenant_slots(&self, user: &User, tenant_id: Uuid) -> SlotterResult<Vec<Slot>> {
        self.guard.require_owner_or_admin(user, tenant_id).await?;
        self.slots.list_by_tenant(tenant_id).await
    }

    /// Every slot in the system. Admin-gated at the HTTP layer.
    pub async fn all_slots(&self) -> SlotterResult<Vec<Slot>> {
        self.slots.list_all().await
    }
}
