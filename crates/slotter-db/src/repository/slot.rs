//! SurrealDB implementation of [`SlotRepository`].
//!
//! The `book` method is the only mutating path that competes with
//! itself: it issues a single conditional UPDATE whose WHERE clause
//! re-checks `is_booked` inside the write, so of two concurrent
//! bookings for the same slot exactly one sees the updated row.

use chrono::{DateTime, Utc};
use slotter_core::error::SlotterResult;
use slotter_core::models::slot::{BookSlot, CreateSlot, Slot};
use slotter_core::repository::SlotRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct SlotRow {
    tenant_id: String,
    scheduled_at: DateTime<Utc>,
    duration_minutes: u32,
    is_booked: bool,
    client_name: Option<String>,
    client_email: Option<String>,
    client_phone: Option<String>,
    client_message: Option<String>,
    created_at: DateTime<Utc>,
    booked_at: Option<DateTime<Utc>>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct SlotRowWithId {
    record_id: String,
    tenant_id: String,
    scheduled_at: DateTime<Utc>,
    duration_minutes: u32,
    is_booked: bool,
    client_name: Option<String>,
    client_email: Option<String>,
    client_phone: Option<String>,
    client_message: Option<String>,
    created_at: DateTime<Utc>,
    booked_at: Option<DateTime<Utc>>,
}

impl SlotRow {
    fn into_slot(self, id: Uuid) -> Result<Slot, DbError> {
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Migration(format!("invalid tenant UUID: {e}")))?;
        Ok(Slot {
            id,
            tenant_id,
            scheduled_at: self.scheduled_at,
            duration_minutes: self.duration_minutes,
            is_booked: self.is_booked,
            client_name: self.client_name,
            client_email: self.client_email,
            client_phone: self.client_phone,
            client_message: self.client_message,
            created_at: self.created_at,
            booked_at: self.booked_at,
        })
    }
}

impl SlotRowWithId {
    fn try_into_slot(self) -> Result<Slot, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Migration(format!("invalid tenant UUID: {e}")))?;
        Ok(Slot {
            id,
            tenant_id,
            scheduled_at: self.scheduled_at,
            duration_minutes: self.duration_minutes,
            is_booked: self.is_booked,
            client_name: self.client_name,
            client_email: self.client_email,
            client_phone: self.client_phone,
            client_message: self.client_message,
            created_at: self.created_at,
            booked_at: self.booked_at,
        })
    }
}

fn rows_to_slots(rows: Vec<SlotRowWithId>) -> Result<Vec<Slot>, DbError> {
    rows.into_iter()
        .map(|row| row.try_into_slot())
        .collect::<Result<Vec<_>, DbError>>()
}

/// SurrealDB implementation of the Slot repository.
pub struct SurrealSlotRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> Clone for SurrealSlotRepository<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<C: Connection> SurrealSlotRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SlotRepository for SurrealSlotRepository<C> {
    async fn create(&self, input: CreateSlot) -> SlotterResult<Slot> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('slot', $id) SET \
                 tenant_id = $tenant_id, \
                 scheduled_at = $scheduled_at, \
                 duration_minutes = $duration_minutes, \
                 is_booked = false, \
                 client_name = NONE, \
                 client_email = NONE, \
                 client_phone = NONE, \
                 client_message = NONE, \
                 booked_at = NONE",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", input.tenant_id.to_string()))
            .bind(("scheduled_at", input.scheduled_at))
            .bind(("duration_minutes", input.duration_minutes))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<SlotRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "slot".into(),
            id: id_str,
        })?;

        Ok(row.into_slot(id)?)
    }

    async fn get(&self, id: Uuid) -> SlotterResult<Slot> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('slot', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SlotRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "slot".into(),
            id: id_str,
        })?;

        Ok(row.into_slot(id)?)
    }

    async fn get_scoped(&self, tenant_id: Uuid, id: Uuid) -> SlotterResult<Slot> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('slot', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SlotRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "slot".into(),
            id: id_str,
        })?;

        Ok(row.into_slot(id)?)
    }

    async fn list_by_tenant(&self, tenant_id: Uuid) -> SlotterResult<Vec<Slot>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM slot \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY scheduled_at DESC",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SlotRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows_to_slots(rows)?)
    }

    async fn list_all(&self) -> SlotterResult<Vec<Slot>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM slot \
                 ORDER BY scheduled_at DESC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SlotRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows_to_slots(rows)?)
    }

    async fn list_available(
        &self,
        tenant_id: Uuid,
        after: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> SlotterResult<Vec<Slot>> {
        // Strict lower bound: a slot exactly at the lead-time boundary
        // is not offered, matching the booking-time check.
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM slot \
                 WHERE tenant_id = $tenant_id \
                 AND is_booked = false \
                 AND scheduled_at > $after \
                 AND scheduled_at <= $until \
                 ORDER BY scheduled_at ASC",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("after", after))
            .bind(("until", until))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SlotRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows_to_slots(rows)?)
    }

    async fn book(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        details: BookSlot,
        booked_at: DateTime<Utc>,
    ) -> SlotterResult<Option<Slot>> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "UPDATE type::record('slot', $id) SET \
                 is_booked = true, \
                 client_name = $client_name, \
                 client_email = $client_email, \
                 client_phone = $client_phone, \
                 client_message = $client_message, \
                 booked_at = $booked_at \
                 WHERE tenant_id = $tenant_id \
                 AND is_booked = false",
            )
            .bind(("id", id_str))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("client_name", details.client_name))
            .bind(("client_email", details.client_email))
            .bind(("client_phone", details.client_phone))
            .bind(("client_message", details.client_message))
            .bind(("booked_at", booked_at))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SlotRow> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .next()
            .map(|row| Ok(row.into_slot(id)?))
            .transpose()
    }

    async fn delete(&self, id: Uuid) -> SlotterResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('slot', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SlotRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "slot".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }
}
