//! Shared application state.

use std::sync::Arc;

use slotter_auth::{AuthConfig, AuthService};
use slotter_booking::{BookingService, OwnershipGuard, SlotService, TenantService, UserService};
use slotter_db::repository::{
    SurrealSlotRepository, SurrealTenantRepository, SurrealUserRepository,
};
use slotter_notify::Notifier;
use surrealdb::{Connection, Surreal};

type Users<C> = SurrealUserRepository<C>;
type Tenants<C> = SurrealTenantRepository<C>;
type Slots<C> = SurrealSlotRepository<C>;

/// Everything the handlers need, generic over the storage engine so
/// tests can run against the in-memory one.
pub struct AppState<C: Connection> {
    pub auth: Arc<AuthService<Users<C>>>,
    pub booking: Arc<BookingService<Tenants<C>, Slots<C>, Notifier>>,
    pub slots: Arc<SlotService<Tenants<C>, Slots<C>>>,
    pub tenants: Arc<TenantService<Tenants<C>>>,
    pub users: Arc<UserService<Users<C>, Tenants<C>>>,
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
            booking: Arc::clone(&self.booking),
            slots: Arc::clone(&self.slots),
            tenants: Arc::clone(&self.tenants),
            users: Arc::clone(&self.users),
        }
    }
}

impl<C: Connection> AppState<C> {
    pub fn new(db: Surreal<C>, auth_config: AuthConfig, notifier: Notifier) -> Self {
        let user_repo = match auth_config.pepper.clone() {
            Some(pepper) => SurrealUserRepository::with_pepper(db.clone(), pepper),
            None => SurrealUserRepository::new(db.clone()),
        };
        let tenant_repo = SurrealTenantRepository::new(db.clone());
        let slot_repo = SurrealSlotRepository::new(db.clone());

        Self {
            auth: Arc::new(AuthService::new(user_repo.clone(), auth_config)),
            booking: Arc::new(BookingService::new(
                tenant_repo.clone(),
                slot_repo.clone(),
                notifier,
            )),
            slots: Arc::new(SlotService::new(
                OwnershipGuard::new(tenant_repo.clone()),
                slot_repo,
            )),
            tenants: Arc::new(TenantService::new(tenant_repo.clone())),
            users: Arc::new(UserService::new(user_repo, tenant_repo)),
        }
    }
}
