//! Notification dispatcher trait.
//!
//! Booking is durable on its own; notifications are a convenience
//! outside the consistency boundary. Callers treat every failure as
//! non-fatal.

use crate::error::SlotterResult;
use crate::models::{slot::Slot, tenant::Tenant};

pub trait NotificationDispatcher: Send + Sync {
    /// Confirmation mail to the client who booked the slot.
    fn send_client_confirmation(
        &self,
        slot: &Slot,
        tenant: &Tenant,
    ) -> impl Future<Output = SlotterResult<()>> + Send;

    /// Alert mail to the tenant owner about the new booking.
    fn send_owner_alert(
        &self,
        slot: &Slot,
        tenant: &Tenant,
    ) -> impl Future<Output = SlotterResult<()>> + Send;
}
