//! Bookable time window arithmetic.

use chrono::{DateTime, Duration, Utc};
use slotter_core::models::tenant::Tenant;

/// The publicly bookable time window of a tenant at a given instant.
///
/// A slot is inside the window iff
/// `opens_after < scheduled_at <= closes_at`: the lower bound is
/// strict, so a slot exactly at the lead-time boundary is neither
/// listed nor bookable, and the upper bound is inclusive. Listing and
/// booking share this type so they can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    /// Exclusive lower bound: `now + booking_lead_time_hours`.
    pub opens_after: DateTime<Utc>,
    /// Inclusive upper bound: `now + max_advance_days`.
    pub closes_at: DateTime<Utc>,
}

impl BookingWindow {
    /// Compute the window from the tenant's policy at `now`.
    ///
    /// Always recomputed per call; the window is a function of the
    /// clock and must never be cached.
    pub fn for_tenant(tenant: &Tenant, now: DateTime<Utc>) -> Self {
        Self {
            opens_after: now + Duration::hours(i64::from(tenant.booking_lead_time_hours)),
            closes_at: now + Duration::days(i64::from(tenant.max_advance_days)),
        }
    }

    pub fn contains(&self, scheduled_at: DateTime<Utc>) -> bool {
        scheduled_at > self.opens_after && scheduled_at <= self.closes_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn tenant(lead_hours: u32, advance_days: u32) -> Tenant {
        Tenant {
            id: Uuid::new_v4(),
            username: "acme".into(),
            display_name: "Acme".into(),
            email: "info@acme.example".into(),
            title: "Terminbuchung".into(),
            description: None,
            primary_color: "#7F7FFF".into(),
            logo_url: None,
            business_name: None,
            business_address: None,
            business_phone: None,
            business_email: None,
            is_active: true,
            allow_public_booking: true,
            booking_lead_time_hours: lead_hours,
            max_advance_days: advance_days,
            owner_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn lead_time_boundary_is_exclusive() {
        let window = BookingWindow::for_tenant(&tenant(24, 30), now());

        assert!(!window.contains(now() + Duration::hours(23)));
        assert!(!window.contains(now() + Duration::hours(24)));
        assert!(window.contains(now() + Duration::hours(24) + Duration::seconds(1)));
        assert!(window.contains(now() + Duration::hours(25)));
    }

    #[test]
    fn advance_boundary_is_inclusive() {
        let window = BookingWindow::for_tenant(&tenant(24, 30), now());

        assert!(window.contains(now() + Duration::days(30)));
        assert!(!window.contains(now() + Duration::days(30) + Duration::seconds(1)));
        assert!(!window.contains(now() + Duration::days(31)));
    }

    #[test]
    fn zero_lead_time_opens_immediately() {
        let window = BookingWindow::for_tenant(&tenant(0, 30), now());

        assert!(!window.contains(now()));
        assert!(window.contains(now() + Duration::seconds(1)));
    }

    #[test]
    fn window_moves_with_the_clock() {
        let t = tenant(24, 30);
        let w1 = BookingWindow::for_tenant(&t, now());
        let w2 = BookingWindow::for_tenant(&t, now() + Duration::hours(2));

        let slot_at = now() + Duration::hours(25);
        assert!(w1.contains(slot_at));
        assert!(!w2.contains(slot_at));
    }
}
