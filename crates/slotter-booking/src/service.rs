//! Public booking flow — availability listing and the atomic booking
//! transaction.

use chrono::{DateTime, Utc};
use slotter_core::error::{SlotterError, SlotterResult};
use slotter_core::models::slot::{BookSlot, Slot};
use slotter_core::notify::NotificationDispatcher;
use slotter_core::repository::{SlotRepository, TenantRepository};
use tracing::warn;
use uuid::Uuid;

use crate::window::BookingWindow;

/// Public-facing booking engine.
///
/// Every operation starts from a tenant username and resolves it
/// through the public lookup, so inactive and booking-disabled tenants
/// are indistinguishable from missing ones.
pub struct BookingService<T, S, N>
where
    T: TenantRepository,
    S: SlotRepository,
    N: NotificationDispatcher,
{
    tenants: T,
    slots: S,
    notifier: N,
}

impl<T, S, N> BookingService<T, S, N>
where
    T: TenantRepository,
    S: SlotRepository,
    N: NotificationDispatcher,
{
    pub fn new(tenants: T, slots: S, notifier: N) -> Self {
        Self {
            tenants,
            slots,
            notifier,
        }
    }

    /// Available slots of a tenant's public page, ascending by
    /// scheduled time, restricted to the tenant's booking window at
    /// `now`.
    pub async fn available_slots(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> SlotterResult<Vec<Slot>> {
        let tenant = self.tenants.get_public_by_username(username).await?;
        let window = BookingWindow::for_tenant(&tenant, now);

        self.slots
            .list_available(tenant.id, window.opens_after, window.closes_at)
            .await
    }

    /// Book a slot on a tenant's public page.
    ///
    /// The decisive step is the repository's conditional write: the
    /// pre-checks exist to produce precise errors, but correctness
    /// under concurrency rests on the CAS alone. Notification dispatch
    /// happens after the booking is durable and never affects the
    /// result.
    pub async fn book(
        &self,
        username: &str,
        slot_id: Uuid,
        request: BookSlot,
        now: DateTime<Utc>,
    ) -> SlotterResult<Slot> {
        let tenant = self.tenants.get_public_by_username(username).await?;
        let slot = self.slots.get_scoped(tenant.id, slot_id).await?;

        if slot.is_booked {
            return Err(SlotterError::AlreadyBooked {
                id: slot_id.to_string(),
            });
        }

        let window = BookingWindow::for_tenant(&tenant, now);
        if !window.contains(slot.scheduled_at) {
            return Err(SlotterError::PolicyViolation {
                message: "slot is outside the bookable window".into(),
            });
        }

        let booked = match self.slots.book(tenant.id, slot_id, request, now).await? {
            Some(slot) => slot,
            // The conditional write did not apply: a concurrent
            // booking won between the pre-check and the CAS.
            None => {
                return Err(SlotterError::AlreadyBooked {
                    id: slot_id.to_string(),
                });
            }
        };

        if let Err(e) = self.notifier.send_client_confirmation(&booked, &tenant).await {
            warn!(slot_id = %booked.id, error = %e, "Client confirmation mail failed");
        }
        if let Err(e) = self.notifier.send_owner_alert(&booked, &tenant).await {
            warn!(slot_id = %booked.id, error = %e, "Owner alert mail failed");
        }

        Ok(booked)
    }
}
