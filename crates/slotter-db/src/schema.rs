//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. The unique indexes on `user.email`
//! and `tenant.username` back the duplicate checks in the
//! repositories and the insert-or-skip admin provisioning at startup.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users (global scope)
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD first_name ON TABLE user TYPE option<string>;
DEFINE FIELD last_name ON TABLE user TYPE option<string>;
DEFINE FIELD is_admin ON TABLE user TYPE bool DEFAULT false;
DEFINE FIELD is_active ON TABLE user TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD last_login ON TABLE user TYPE option<datetime>;
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Tenants (global scope, owned by a user)
-- =======================================================================
DEFINE TABLE tenant SCHEMAFULL;
DEFINE FIELD username ON TABLE tenant TYPE string;
DEFINE FIELD display_name ON TABLE tenant TYPE string;
DEFINE FIELD email ON TABLE tenant TYPE string;
DEFINE FIELD title ON TABLE tenant TYPE string \
    DEFAULT 'Terminbuchung';
DEFINE FIELD description ON TABLE tenant TYPE option<string>;
DEFINE FIELD primary_color ON TABLE tenant TYPE string \
    DEFAULT '#7F7FFF';
DEFINE FIELD logo_url ON TABLE tenant TYPE option<string>;
DEFINE FIELD business_name ON TABLE tenant TYPE option<string>;
DEFINE FIELD business_address ON TABLE tenant TYPE option<string>;
DEFINE FIELD business_phone ON TABLE tenant TYPE option<string>;
DEFINE FIELD business_email ON TABLE tenant TYPE option<string>;
DEFINE FIELD is_active ON TABLE tenant TYPE bool DEFAULT true;
DEFINE FIELD allow_public_booking ON TABLE tenant TYPE bool \
    DEFAULT true;
DEFINE FIELD booking_lead_time_hours ON TABLE tenant TYPE int \
    DEFAULT 24 ASSERT $value >= 0;
DEFINE FIELD max_advance_days ON TABLE tenant TYPE int \
    DEFAULT 30 ASSERT $value >= 0;
DEFINE FIELD owner_id ON TABLE tenant TYPE string;
DEFINE FIELD created_at ON TABLE tenant TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE tenant TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_tenant_username ON TABLE tenant \
    COLUMNS username UNIQUE;
DEFINE INDEX idx_tenant_owner ON TABLE tenant COLUMNS owner_id;

-- =======================================================================
-- Slots (owned by a tenant; deleted with it)
-- =======================================================================
DEFINE TABLE slot SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE slot TYPE string;
DEFINE FIELD scheduled_at ON TABLE slot TYPE datetime;
DEFINE FIELD duration_minutes ON TABLE slot TYPE int DEFAULT 60;
DEFINE FIELD is_booked ON TABLE slot TYPE bool DEFAULT false;
DEFINE FIELD client_name ON TABLE slot TYPE option<string>;
DEFINE FIELD client_email ON TABLE slot TYPE option<string>;
DEFINE FIELD client_phone ON TABLE slot TYPE option<string>;
DEFINE FIELD client_message ON TABLE slot TYPE option<string>;
DEFINE FIELD created_at ON TABLE slot TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD booked_at ON TABLE slot TYPE option<datetime>;
DEFINE INDEX idx_slot_tenant ON TABLE slot COLUMNS tenant_id;
DEFINE INDEX idx_slot_tenant_time ON TABLE slot \
    COLUMNS tenant_id, scheduled_at;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}
