//! Slotter Booking — availability arithmetic, the atomic booking flow,
//! and the guarded management services.

pub mod guard;
pub mod service;
pub mod slots;
pub mod tenants;
pub mod users;
pub mod window;

pub use guard::OwnershipGuard;
pub use service::BookingService;
pub use slots::SlotService;
pub use tenants::TenantService;
pub use users::UserService;
pub use window::BookingWindow;
