//! Platform user administration.
//!
//! Admin gating happens at the HTTP layer; the acting user is passed
//! in here only for the self-protection rules.

use slotter_core::error::{SlotterError, SlotterResult};
use slotter_core::models::user::{CreateUser, UpdateUser, User};
use slotter_core::repository::{TenantRepository, UserRepository};
use uuid::Uuid;

pub struct UserService<U: UserRepository, T: TenantRepository> {
    users: U,
    tenants: T,
}

impl<U: UserRepository, T: TenantRepository> UserService<U, T> {
    pub fn new(users: U, tenants: T) -> Self {
        Self { users, tenants }
    }

    pub async fn list(&self) -> SlotterResult<Vec<User>> {
        self.users.list().await
    }

    pub async fn create(&self, input: CreateUser) -> SlotterResult<User> {
        self.users.create(input).await
    }

    pub async fn update_profile(&self, user_id: Uuid, input: UpdateUser) -> SlotterResult<User> {
        self.users.update(user_id, input).await
    }

    /// Flip the activation flag. Admins cannot deactivate themselves.
    pub async fn toggle_active(&self, acting: &User, user_id: Uuid) -> SlotterResult<User> {
        if acting.id == user_id {
            return Err(SlotterError::Forbidden {
                reason: "cannot change your own account status".into(),
            });
        }
        let user = self.users.get_by_id(user_id).await?;
        self.users.set_active(user_id, !user.is_active).await
    }

    /// Flip the admin flag. Admins cannot demote themselves.
    pub async fn toggle_admin(&self, acting: &User, user_id: Uuid) -> SlotterResult<User> {
        if acting.id == user_id {
            return Err(SlotterError::Forbidden {
                reason: "cannot change your own admin status".into(),
            });
        }
        let user = self.users.get_by_id(user_id).await?;
        self.users.set_admin(user_id, !user.is_admin).await
    }

    /// Delete a user account.
    ///
    /// Refused while the user still owns tenants, so no tenant is ever
    /// left with a dangling owner. Admins cannot delete themselves.
    pub async fn delete(&self, acting: &User, user_id: Uuid) -> SlotterResult<()> {
        if acting.id == user_id {
            return Err(SlotterError::Forbidden {
                reason: "cannot delete your own account".into(),
            });
        }

        let owned = self.tenants.list_by_owner(user_id).await?;
        if !owned.is_empty() {
            return Err(SlotterError::PolicyViolation {
                message: format!(
                    "user still owns {} tenant(s); delete or reassign them first",
                    owned.len(),
                ),
            });
        }

        self.users.delete(user_id).await
    }
}
