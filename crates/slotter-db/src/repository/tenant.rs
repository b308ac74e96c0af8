//! SurrealDB implementation of [`TenantRepository`].
//!
//! Usernames are lower-cased before storage and lookup, which makes
//! the unique `idx_tenant_username` index case-insensitive in effect.

use chrono::{DateTime, Utc};
use slotter_core::error::SlotterResult;
use slotter_core::models::tenant::{CreateTenant, Tenant, UpdateTenant};
use slotter_core::repository::TenantRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

const DEFAULT_TITLE: &str = "Terminbuchung";
const DEFAULT_COLOR: &str = "#7F7FFF";

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct TenantRow {
    username: String,
    display_name: String,
    email: String,
    title: String,
    description: Option<String>,
    primary_color: String,
    logo_url: Option<String>,
    business_name: Option<String>,
    business_address: Option<String>,
    business_phone: Option<String>,
    business_email: Option<String>,
    is_active: bool,
    allow_public_booking: bool,
    booking_lead_time_hours: u32,
    max_advance_days: u32,
    owner_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct TenantRowWithId {
    record_id: String,
    username: String,
    display_name: String,
    email: String,
    title: String,
    description: Option<String>,
    primary_color: String,
    logo_url: Option<String>,
    business_name: Option<String>,
    business_address: Option<String>,
    business_phone: Option<String>,
    business_email: Option<String>,
    is_active: bool,
    allow_public_booking: bool,
    booking_lead_time_hours: u32,
    max_advance_days: u32,
    owner_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TenantRow {
    fn into_tenant(self, id: Uuid) -> Result<Tenant, DbError> {
        let owner_id = Uuid::parse_str(&self.owner_id)
            .map_err(|e| DbError::Migration(format!("invalid owner UUID: {e}")))?;
        Ok(Tenant {
            id,
            username: self.username,
            display_name: self.display_name,
            email: self.email,
            title: self.title,
            description: self.description,
            primary_color: self.primary_color,
            logo_url: self.logo_url,
            business_name: self.business_name,
            business_address: self.business_address,
            business_phone: self.business_phone,
            business_email: self.business_email,
            is_active: self.is_active,
            allow_public_booking: self.allow_public_booking,
            booking_lead_time_hours: self.booking_lead_time_hours,
            max_advance_days: self.max_advance_days,
            owner_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl TenantRowWithId {
    fn try_into_tenant(self) -> Result<Tenant, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        let owner_id = Uuid::parse_str(&self.owner_id)
            .map_err(|e| DbError::Migration(format!("invalid owner UUID: {e}")))?;
        Ok(Tenant {
            id,
            username: self.username,
            display_name: self.display_name,
            email: self.email,
            title: self.title,
            description: self.description,
            primary_color: self.primary_color,
            logo_url: self.logo_url,
            business_name: self.business_name,
            business_address: self.business_address,
            business_phone: self.business_phone,
            business_email: self.business_email,
            is_active: self.is_active,
            allow_public_booking: self.allow_public_booking,
            booking_lead_time_hours: self.booking_lead_time_hours,
            max_advance_days: self.max_advance_days,
            owner_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Tenant repository.
pub struct SurrealTenantRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> Clone for SurrealTenantRepository<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<C: Connection> SurrealTenantRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn fetch_by_username(&self, username: &str) -> Result<Option<Tenant>, DbError> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM tenant \
                 WHERE username = $username",
            )
            .bind(("username", username.to_lowercase()))
            .await?;

        let rows: Vec<TenantRowWithId> = result.take(0)?;
        rows.into_iter().next().map(|r| r.try_into_tenant()).transpose()
    }
}

impl<C: Connection> TenantRepository for SurrealTenantRepository<C> {
    async fn create(&self, input: CreateTenant) -> SlotterResult<Tenant> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let username = input.username.to_lowercase();

        if self.fetch_by_username(&username).await?.is_some() {
            return Err(DbError::AlreadyExists {
                entity: "tenant".into(),
            }
            .into());
        }

        let result = self
            .db
            .query(
                "CREATE type::record('tenant', $id) SET \
                 username = $username, \
                 display_name = $display_name, \
                 email = $email, \
                 title = $title, \
                 description = $description, \
                 primary_color = $primary_color, \
                 logo_url = $logo_url, \
                 business_name = $business_name, \
                 business_address = $business_address, \
                 business_phone = $business_phone, \
                 business_email = $business_email, \
                 is_active = true, \
                 allow_public_booking = $allow_public_booking, \
                 booking_lead_time_hours = $booking_lead_time_hours, \
                 max_advance_days = $max_advance_days, \
                 owner_id = $owner_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("username", username))
            .bind(("display_name", input.display_name))
            .bind(("email", input.email))
            .bind(("title", input.title.unwrap_or_else(|| DEFAULT_TITLE.into())))
            .bind(("description", input.description))
            .bind((
                "primary_color",
                input.primary_color.unwrap_or_else(|| DEFAULT_COLOR.into()),
            ))
            .bind(("logo_url", input.logo_url))
            .bind(("business_name", input.business_name))
            .bind(("business_address", input.business_address))
            .bind(("business_phone", input.business_phone))
            .bind(("business_email", input.business_email))
            .bind((
                "allow_public_booking",
                input.allow_public_booking.unwrap_or(true),
            ))
            .bind((
                "booking_lead_time_hours",
                input.booking_lead_time_hours.unwrap_or(24),
            ))
            .bind(("max_advance_days", input.max_advance_days.unwrap_or(30)))
            .bind(("owner_id", input.owner_id.to_string()))
            .await
            .map_err(DbError::from)?;

        // A losing concurrent insert fails the unique username index.
        let mut result = result.check().map_err(|_| DbError::AlreadyExists {
            entity: "tenant".into(),
        })?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        Ok(row.into_tenant(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> SlotterResult<Tenant> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('tenant', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        Ok(row.into_tenant(id)?)
    }

    async fn get_by_username(&self, username: &str) -> SlotterResult<Tenant> {
        self.fetch_by_username(username)
            .await?
            .ok_or_else(|| {
                DbError::NotFound {
                    entity: "tenant".into(),
                    id: format!("username={username}"),
                }
                .into()
            })
    }

    async fn get_public_by_username(&self, username: &str) -> SlotterResult<Tenant> {
        // Missing, inactive, and booking-disabled tenants all report
        // NotFound so that public callers cannot enumerate tenants.
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM tenant \
                 WHERE username = $username \
                 AND is_active = true \
                 AND allow_public_booking = true",
            )
            .bind(("username", username.to_lowercase()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: format!("username={username}"),
        })?;

        Ok(row.try_into_tenant()?)
    }

    async fn update(&self, id: Uuid, input: UpdateTenant) -> SlotterResult<Tenant> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.display_name.is_some() {
            sets.push("display_name = $display_name");
        }
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.title.is_some() {
            sets.push("title = $title");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.primary_color.is_some() {
            sets.push("primary_color = $primary_color");
        }
        if input.logo_url.is_some() {
            sets.push("logo_url = $logo_url");
        }
        if input.business_name.is_some() {
            sets.push("business_name = $business_name");
        }
        if input.business_address.is_some() {
            sets.push("business_address = $business_address");
        }
        if input.business_phone.is_some() {
            sets.push("business_phone = $business_phone");
        }
        if input.business_email.is_some() {
            sets.push("business_email = $business_email");
        }
        if input.allow_public_booking.is_some() {
            sets.push("allow_public_booking = $allow_public_booking");
        }
        if input.booking_lead_time_hours.is_some() {
            sets.push("booking_lead_time_hours = $booking_lead_time_hours");
        }
        if input.max_advance_days.is_some() {
            sets.push("max_advance_days = $max_advance_days");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('tenant', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(display_name) = input.display_name {
            builder = builder.bind(("display_name", display_name));
        }
        if let Some(email) = input.email {
            builder = builder.bind(("email", email));
        }
        if let Some(title) = input.title {
            builder = builder.bind(("title", title));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(primary_color) = input.primary_color {
            builder = builder.bind(("primary_color", primary_color));
        }
        if let Some(logo_url) = input.logo_url {
            builder = builder.bind(("logo_url", logo_url));
        }
        if let Some(business_name) = input.business_name {
            builder = builder.bind(("business_name", business_name));
        }
        if let Some(business_address) = input.business_address {
            builder = builder.bind(("business_address", business_address));
        }
        if let Some(business_phone) = input.business_phone {
            builder = builder.bind(("business_phone", business_phone));
        }
        if let Some(business_email) = input.business_email {
            builder = builder.bind(("business_email", business_email));
        }
        if let Some(allow_public_booking) = input.allow_public_booking {
            builder = builder.bind(("allow_public_booking", allow_public_booking));
        }
        if let Some(booking_lead_time_hours) = input.booking_lead_time_hours {
            builder = builder.bind(("booking_lead_time_hours", booking_lead_time_hours));
        }
        if let Some(max_advance_days) = input.max_advance_days {
            builder = builder.bind(("max_advance_days", max_advance_days));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        Ok(row.into_tenant(id)?)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> SlotterResult<Tenant> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "UPDATE type::record('tenant', $id) SET \
                 is_active = $active, updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("active", active))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        Ok(row.into_tenant(id)?)
    }

    async fn delete(&self, id: Uuid) -> SlotterResult<()> {
        let id_str = id.to_string();

        // Cascade: a tenant exclusively owns its slots.
        let mut result = self
            .db
            .query(
                "DELETE slot WHERE tenant_id = $tenant_id; \
                 DELETE type::record('tenant', $id) RETURN BEFORE",
            )
            .bind(("tenant_id", id_str.clone()))
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(1).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "tenant".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn list_all(&self) -> SlotterResult<Vec<Tenant>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM tenant \
                 ORDER BY created_at DESC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRowWithId> = result.take(0).map_err(DbError::from)?;

        let tenants = rows
            .into_iter()
            .map(|row| row.try_into_tenant())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(tenants)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> SlotterResult<Vec<Tenant>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM tenant \
                 WHERE owner_id = $owner_id \
                 ORDER BY created_at DESC",
            )
            .bind(("owner_id", owner_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRowWithId> = result.take(0).map_err(DbError::from)?;

        let tenants = rows
            .into_iter()
            .map(|row| row.try_into_tenant())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(tenants)
    }
}
