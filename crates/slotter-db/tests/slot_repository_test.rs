//! Integration tests for the Slot repository using in-memory SurrealDB.
//!
//! The concurrency test here exercises the conditional-UPDATE booking
//! path directly: many tasks race on one slot and exactly one must win.

use chrono::{Duration, Utc};
use slotter_core::error::SlotterError;
use slotter_core::models::slot::{BookSlot, CreateSlot};
use slotter_core::models::tenant::CreateTenant;
use slotter_core::models::user::CreateUser;
use slotter_core::repository::{SlotRepository, TenantRepository, UserRepository};
use slotter_db::repository::{SurrealSlotRepository, SurrealTenantRepository, SurrealUserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: in-memory DB with migrations, one owner and one tenant.
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

    let tenants = SurrealTenantRepository::new(db.clone());
    let tenant = tenants
        .create(CreateTenant {
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
            owner_id: owner.id,
        })
        .await
        .unwrap();

    (db, tenant.id)
}

fn client() -> BookSlot {
    BookSlot {
        client_name: "Max Mustermann".into(),
        client_email: "max@example.com".into(),
        client_phone: Some("+49 30 1234567".into()),
        client_message: None,
    }
}

#[tokio::test]
async fn create_and_get_slot() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealSlotRepository::new(db);

    let at = Utc::now() + Duration::days(3);
    let slot = repo
        .create(CreateSlot {
            tenant_id,
            scheduled_at: at,
            duration_minutes: 45,
        })
        .await
        .unwrap();

    assert_eq!(slot.tenant_id, tenant_id);
    assert_eq!(slot.duration_minutes, 45);
    assert!(!slot.is_booked);
    assert!(slot.client_name.is_none());
    assert!(slot.booked_at.is_none());

    let fetched = repo.get(slot.id).await.unwrap();
    assert_eq!(fetched.id, slot.id);

    let scoped = repo.get_scoped(tenant_id, slot.id).await.unwrap();
    assert_eq!(scoped.id, slot.id);

    // A foreign tenant id makes the slot invisible.
    let err = repo.get_scoped(Uuid::new_v4(), slot.id).await.unwrap_err();
    assert!(matches!(err, SlotterError::NotFound { .. }));
}

#[tokio::test]
async fn list_available_applies_window_bounds() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealSlotRepository::new(db);

    let now = Utc::now();
    let after = now + Duration::hours(24);
    let until = now + Duration::days(30);

    // Exactly at the lower bound: excluded (strict).
    repo.create(CreateSlot {
        tenant_id,
        scheduled_at: after,
        duration_minutes: 60,
    })
    .await
    .unwrap();
    // Just inside.
    let inside = repo
        .create(CreateSlot {
            tenant_id,
            scheduled_at: after + Duration::minutes(1),
            duration_minutes: 60,
        })
        .await
        .unwrap();
    // Exactly at the upper bound: included (inclusive).
    let boundary = repo
        .create(CreateSlot {
            tenant_id,
            scheduled_at: until,
            duration_minutes: 60,
        })
        .await
        .unwrap();
    // Past the upper bound.
    repo.create(CreateSlot {
        tenant_id,
        scheduled_at: until + Duration::minutes(1),
        duration_minutes: 60,
    })
    .await
    .unwrap();

    let available = repo.list_available(tenant_id, after, until).await.unwrap();
    let ids: Vec<Uuid> = available.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![inside.id, boundary.id]);

    // Booked slots drop out.
    repo.book(tenant_id, inside.id, client(), Utc::now())
        .await
        .unwrap()
        .unwrap();
    let available = repo.list_available(tenant_id, after, until).await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, boundary.id);
}

#[tokio::test]
async fn book_sets_client_details_once() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealSlotRepository::new(db);

    let slot = repo
        .create(CreateSlot {
            tenant_id,
            scheduled_at: Utc::now() + Duration::days(2),
            duration_minutes: 60,
        })
        .await
        .unwrap();

    let booked_at = Utc::now();
    let booked = repo
        .book(tenant_id, slot.id, client(), booked_at)
        .await
        .unwrap()
        .expect("first booking should apply");

    assert!(booked.is_booked);
    assert_eq!(booked.client_name.as_deref(), Some("Max Mustermann"));
    assert_eq!(booked.client_email.as_deref(), Some("max@example.com"));
    assert!(booked.booked_at.is_some());

    // Second attempt does not apply.
    let second = repo
        .book(tenant_id, slot.id, client(), Utc::now())
        .await
        .unwrap();
    assert!(second.is_none());

    // Client details survive the failed attempt.
    let fetched = repo.get(slot.id).await.unwrap();
    assert_eq!(fetched.client_name.as_deref(), Some("Max Mustermann"));
}

#[tokio::test]
async fn book_is_tenant_scoped() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealSlotRepository::new(db);

    let slot = repo
        .create(CreateSlot {
            tenant_id,
            scheduled_at: Utc::now() + Duration::days(2),
            duration_minutes: 60,
        })
        .await
        .unwrap();

    // Booking through a foreign tenant id does not apply.
    let result = repo
        .book(Uuid::new_v4(), slot.id, client(), Utc::now())
        .await
        .unwrap();
    assert!(result.is_none());

    let fetched = repo.get(slot.id).await.unwrap();
    assert!(!fetched.is_booked);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bookings_have_exactly_one_winner() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealSlotRepository::new(db);

    let slot = repo
        .create(CreateSlot {
            tenant_id,
            scheduled_at: Utc::now() + Duration::days(2),
            duration_minutes: 60,
        })
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..10 {
        let repo = repo.clone();
        let slot_id = slot.id;
        handles.push(tokio::spawn(async move {
            repo.book(
                tenant_id,
                slot_id,
                BookSlot {
                    client_name: format!("Client {i}"),
                    client_email: format!("client{i}@example.com"),
                    client_phone: None,
                    client_message: None,
                },
                Utc::now(),
            )
            .await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().is_some() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);

    let fetched = repo.get(slot.id).await.unwrap();
    assert!(fetched.is_booked);
    assert!(fetched.client_name.is_some());
}

#[tokio::test]
async fn delete_slot() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealSlotRepository::new(db);

    let slot = repo
        .create(CreateSlot {
            tenant_id,
            scheduled_at: Utc::now() + Duration::days(2),
            duration_minutes: 60,
        })
        .await
        .unwrap();

    repo.delete(slot.id).await.unwrap();
    let err = repo.get(slot.id).await.unwrap_err();
    assert!(matches!(err, SlotterError::NotFound { .. }));

    let err = repo.delete(slot.id).await.unwrap_err();
    assert!(matches!(err, SlotterError::NotFound { .. }));
}
