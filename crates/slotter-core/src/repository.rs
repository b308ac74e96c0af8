//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Slot operations that serve the
//! public booking page take a `tenant_id` parameter so that a slot id
//! belonging to a different tenant is indistinguishable from a missing
//! one.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::SlotterResult;
use crate::models::{
    slot::{BookSlot, CreateSlot, Slot},
    tenant::{CreateTenant, Tenant, UpdateTenant},
    user::{CreateUser, UpdateUser, User},
};

// ---------------------------------------------------------------------------
// Users (global scope)
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    /// Insert a new user. The raw password in `input` is hashed before
    /// storage. Fails with `AlreadyExists` on a duplicate email.
    fn create(&self, input: CreateUser) -> impl Future<Output = SlotterResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SlotterResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = SlotterResult<User>> + Send;
    /// Apply only the fields present in `input`; unset fields are
    /// never written. A password, when present, is re-hashed.
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = SlotterResult<User>> + Send;
    fn set_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> impl Future<Output = SlotterResult<User>> + Send;
    fn set_admin(&self, id: Uuid, admin: bool)
    -> impl Future<Output = SlotterResult<User>> + Send;
    /// Stamp `last_login`.
    fn record_login(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> impl Future<Output = SlotterResult<()>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = SlotterResult<()>> + Send;
    /// All users, newest first.
    fn list(&self) -> impl Future<Output = SlotterResult<Vec<User>>> + Send;
}

// ---------------------------------------------------------------------------
// Tenants (global scope)
// ---------------------------------------------------------------------------

pub trait TenantRepository: Send + Sync {
    /// Insert a new tenant. The username is lower-cased before storage
    /// and must be globally unique; fails with `AlreadyExists` on a
    /// collision.
    fn create(&self, input: CreateTenant) -> impl Future<Output = SlotterResult<Tenant>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SlotterResult<Tenant>> + Send;
    /// Case-insensitive lookup regardless of activation state.
    fn get_by_username(&self, username: &str)
    -> impl Future<Output = SlotterResult<Tenant>> + Send;
    /// Public resolution: returns the tenant only if it is active and
    /// allows public booking. Missing, inactive, and booking-disabled
    /// tenants all report `NotFound` — callers cannot distinguish
    /// them, which keeps tenant existence unenumerable.
    fn get_public_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = SlotterResult<Tenant>> + Send;
    /// Apply only the fields present in `input`.
    fn update(
        &self,
        id: Uuid,
        input: UpdateTenant,
    ) -> impl Future<Output = SlotterResult<Tenant>> + Send;
    fn set_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> impl Future<Output = SlotterResult<Tenant>> + Send;
    /// Hard delete. Cascades deletion of all the tenant's slots.
    fn delete(&self, id: Uuid) -> impl Future<Output = SlotterResult<()>> + Send;
    /// All tenants, newest first (admin view).
    fn list_all(&self) -> impl Future<Output = SlotterResult<Vec<Tenant>>> + Send;
    fn list_by_owner(
        &self,
        owner_id: Uuid,
    ) -> impl Future<Output = SlotterResult<Vec<Tenant>>> + Send;
}

// ---------------------------------------------------------------------------
// Slots (tenant-owned)
// ---------------------------------------------------------------------------

pub trait SlotRepository: Send + Sync {
    /// Insert a new unbooked slot. No validation that the instant is
    /// in the future and no overlap prevention — intentional scope
    /// limits.
    fn create(&self, input: CreateSlot) -> impl Future<Output = SlotterResult<Slot>> + Send;
    fn get(&self, id: Uuid) -> impl Future<Output = SlotterResult<Slot>> + Send;
    /// Lookup scoped to a tenant: a slot id owned by a different
    /// tenant reports `NotFound`.
    fn get_scoped(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = SlotterResult<Slot>> + Send;
    /// All of a tenant's slots, newest scheduled first (owner/admin
    /// view, includes client details).
    fn list_by_tenant(
        &self,
        tenant_id: Uuid,
    ) -> impl Future<Output = SlotterResult<Vec<Slot>>> + Send;
    /// Every slot in the system, newest scheduled first (admin view).
    fn list_all(&self) -> impl Future<Output = SlotterResult<Vec<Slot>>> + Send;
    /// Unbooked slots with `after < scheduled_at <= until`, ascending
    /// by scheduled time. The strict lower bound matches the
    /// booking-time lead-time check.
    fn list_available(
        &self,
        tenant_id: Uuid,
        after: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> impl Future<Output = SlotterResult<Vec<Slot>>> + Send;
    /// Atomic check-and-set: marks the slot booked and copies the
    /// client details in a single conditional write that only applies
    /// while `is_booked` is still false. Returns `None` when the write
    /// did not apply (slot absent, owned by another tenant, or already
    /// booked) — of two concurrent bookings, exactly one gets `Some`.
    fn book(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        details: BookSlot,
        booked_at: DateTime<Utc>,
    ) -> impl Future<Output = SlotterResult<Option<Slot>>> + Send;
    /// Hard delete regardless of booked state.
    fn delete(&self, id: Uuid) -> impl Future<Output = SlotterResult<()>> + Send;
}
