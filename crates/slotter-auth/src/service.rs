//! Authentication service — login, registration, and token-to-user
//! resolution.

use chrono::Utc;
use slotter_core::error::{SlotterError, SlotterResult};
use slotter_core::models::user::{CreateUser, User};
use slotter_core::repository::UserRepository;
use tracing::info;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed JWT access token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Input for self-service registration.
#[derive(Debug)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Authentication service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authenticate a user with email + password and issue a token.
    ///
    /// An unknown email and a wrong password produce the same error so
    /// that login attempts cannot probe which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> SlotterResult<LoginOutput> {
        let user = match self.user_repo.get_by_email(email).await {
            Ok(u) => u,
            Err(SlotterError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        password::check_password(password, &user.password_hash, self.config.pepper.as_deref())?;

        if !user.is_active {
            return Err(AuthError::AccountInactive.into());
        }

        self.user_repo.record_login(user.id, Utc::now()).await?;

        let access_token = token::issue_access_token(user.id, &self.config)?;

        Ok(LoginOutput {
            access_token,
            token_type: "bearer",
            expires_in: self.config.access_token_lifetime_secs,
        })
    }

    /// Register a new (non-admin) user account.
    pub async fn register(&self, input: RegisterInput) -> SlotterResult<User> {
        if input.password.len() < self.config.min_password_length {
            return Err(SlotterError::Validation {
                message: format!(
                    "password must be at least {} characters",
                    self.config.min_password_length,
                ),
            });
        }

        self.user_repo
            .create(CreateUser {
                email: input.email,
                password: input.password,
                first_name: input.first_name,
                last_name: input.last_name,
                is_admin: false,
            })
            .await
    }

    /// Resolve a bearer token to its active user.
    ///
    /// Verifies the token, then re-fetches the user so that
    /// deactivation and deletion take effect immediately rather than
    /// at token expiry.
    pub async fn current_user(&self, bearer_token: &str) -> SlotterResult<User> {
        let claims = token::decode_access_token(bearer_token, &self.config)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AuthError::TokenInvalid("malformed subject".into()))?;

        let user = match self.user_repo.get_by_id(user_id).await {
            Ok(u) => u,
            Err(SlotterError::NotFound { .. }) => {
                return Err(AuthError::TokenInvalid("unknown subject".into()).into());
            }
            Err(e) => return Err(e),
        };

        if !user.is_active {
            return Err(AuthError::AccountInactive.into());
        }

        Ok(user)
    }

    /// Ensure an admin account exists, creating it if necessary.
    ///
    /// Called once at startup. Relies on the unique email index: if the
    /// account already exists the insert is skipped, and a concurrent
    /// replica losing the race is treated the same way.
    pub async fn provision_admin(&self, email: &str, password: &str) -> SlotterResult<()> {
        match self
            .user_repo
            .create(CreateUser {
                email: email.to_string(),
                password: password.to_string(),
                first_name: None,
                last_name: None,
                is_admin: true,
            })
            .await
        {
            Ok(user) => {
                info!(email = %user.email, "Provisioned admin account");
                Ok(())
            }
            Err(SlotterError::AlreadyExists { .. }) => {
                info!(%email, "Admin account already present, skipping provisioning");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
