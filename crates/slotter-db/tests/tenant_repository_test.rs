//! Integration tests for the Tenant repository using in-memory SurrealDB.

use slotter_core::error::SlotterError;
use slotter_core::models::slot::CreateSlot;
use slotter_core::models::tenant::{CreateTenant, UpdateTenant};
use slotter_core::models::user::CreateUser;
use slotter_core::repository::{SlotRepository, TenantRepository, UserRepository};
use slotter_db::repository::{SurrealSlotRepository, SurrealTenantRepository, SurrealUserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up an in-memory DB, run migrations, create an owner.
async fn setup() -> (Surreal<surrealdb::engine::local::Db>, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    slotter_db::run_migrations(&db).await.unwrap();

    let users = SurrealUserRepository::new(db.clone());
    let owner = users
        .create(CreateUser {
            email: "owner@example.com".into(),
            password: "Password1!".into(),
            first_name: None,
            last_name: None,
            is_admin: false,
        })
        .await
        .unwrap();

    (db, owner.id)
}

fn acme(owner_id: Uuid) -> CreateTenant {
    CreateTenant {
        username: "acme".into(),
        display_name: "Acme Corp".into(),
        email: "info@acme.example".into(),
        title: None,
        description: None,
        primary_color: None,
        logo_url: None,
        business_name: None,
        business_address: None,
        business_phone: None,
        business_email: None,
        allow_public_booking: None,
        booking_lead_time_hours: None,
        max_advance_days: None,
        owner_id,
    }
}

#[tokio::test]
async fn create_applies_defaults() {
    let (db, owner_id) = setup().await;
    let repo = SurrealTenantRepository::new(db);

    let tenant = repo.create(acme(owner_id)).await.unwrap();

    assert_eq!(tenant.username, "acme");
    assert_eq!(tenant.title, "Terminbuchung");
    assert_eq!(tenant.primary_color, "#7F7FFF");
    assert!(tenant.is_active);
    assert!(tenant.allow_public_booking);
    assert_eq!(tenant.booking_lead_time_hours, 24);
    assert_eq!(tenant.max_advance_days, 30);
    assert_eq!(tenant.owner_id, owner_id);
}

#[tokio::test]
async fn username_is_lowercased_and_unique() {
    let (db, owner_id) = setup().await;
    let repo = SurrealTenantRepository::new(db);

    let tenant = repo
        .create(CreateTenant {
            username: "AcMe".into(),
            ..acme(owner_id)
        })
        .await
        .unwrap();
    assert_eq!(tenant.username, "acme");

    // A differently-cased duplicate collides.
    let err = repo
        .create(CreateTenant {
            username: "ACME".into(),
            ..acme(owner_id)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SlotterError::AlreadyExists { .. }));

    // Lookup is case-insensitive too.
    let fetched = repo.get_by_username("Acme").await.unwrap();
    assert_eq!(fetched.id, tenant.id);
}

#[tokio::test]
async fn public_lookup_hides_inactive_and_disabled_tenants() {
    let (db, owner_id) = setup().await;
    let repo = SurrealTenantRepository::new(db);

    let tenant = repo.create(acme(owner_id)).await.unwrap();
    assert!(repo.get_public_by_username("acme").await.is_ok());

    // Deactivated: hidden from public resolution, still owner-visible.
    repo.set_active(tenant.id, false).await.unwrap();
    let err = repo.get_public_by_username("acme").await.unwrap_err();
    assert!(matches!(err, SlotterError::NotFound { .. }));
    assert!(repo.get_by_username("acme").await.is_ok());

    // Reactivated but booking disabled: still hidden.
    repo.set_active(tenant.id, true).await.unwrap();
    repo.update(
        tenant.id,
        UpdateTenant {
            allow_public_booking: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let err = repo.get_public_by_username("acme").await.unwrap_err();
    assert!(matches!(err, SlotterError::NotFound { .. }));

    // An unknown username reports the same error shape.
    let err = repo.get_public_by_username("nope").await.unwrap_err();
    assert!(matches!(err, SlotterError::NotFound { .. }));
}

#[tokio::test]
async fn update_applies_only_present_fields() {
    let (db, owner_id) = setup().await;
    let repo = SurrealTenantRepository::new(db);

    let tenant = repo.create(acme(owner_id)).await.unwrap();

    let updated = repo
        .update(
            tenant.id,
            UpdateTenant {
                title: Some("Sprechstunde".into()),
                booking_lead_time_hours: Some(48),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Sprechstunde");
    assert_eq!(updated.booking_lead_time_hours, 48);
    assert_eq!(updated.display_name, "Acme Corp");
    assert_eq!(updated.primary_color, "#7F7FFF");
    assert!(updated.updated_at >= tenant.updated_at);
}

#[tokio::test]
async fn delete_cascades_to_slots() {
    let (db, owner_id) = setup().await;
    let tenants = SurrealTenantRepository::new(db.clone());
    let slots = SurrealSlotRepository::new(db);

    let tenant = tenants.create(acme(owner_id)).await.unwrap();
    let slot = slots
        .create(CreateSlot {
            tenant_id: tenant.id,
            scheduled_at: chrono::Utc::now() + chrono::Duration::days(2),
            duration_minutes: 60,
        })
        .await
        .unwrap();

    tenants.delete(tenant.id).await.unwrap();

    let err = tenants.get_by_id(tenant.id).await.unwrap_err();
    assert!(matches!(err, SlotterError::NotFound { .. }));
    let err = slots.get(slot.id).await.unwrap_err();
    assert!(matches!(err, SlotterError::NotFound { .. }));
}

#[tokio::test]
async fn list_by_owner_filters() {
    let (db, owner_id) = setup().await;
    let users = SurrealUserRepository::new(db.clone());
    let repo = SurrealTenantRepository::new(db);

    let other = users
        .create(CreateUser {
            email: "other@example.com".into(),
            password: "Password1!".into(),
            first_name: None,
            last_name: None,
            is_admin: false,
        })
        .await
        .unwrap();

    repo.create(acme(owner_id)).await.unwrap();
    repo.create(CreateTenant {
        username: "globex".into(),
        ..acme(other.id)
    })
    .await
    .unwrap();

    let mine = repo.list_by_owner(owner_id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].username, "acme");

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
}
