//! SurrealDB repository implementations.

mod slot;
mod tenant;
mod user;

pub use slot::SurrealSlotRepository;
pub use tenant::SurrealTenantRepository;
pub use user::SurrealUserRepository;
