//! HTML mail templates for booking notifications.
//!
//! Bodies are German, matching the audience of the booking pages.
//! Subject and body are rendered together so callers cannot pair a
//! confirmation subject with an alert body.

use slotter_core::models::{slot::Slot, tenant::Tenant};

/// A rendered mail: subject line plus HTML body.
#[derive(Debug, Clone)]
pub struct RenderedMail {
    pub subject: String,
    pub html: String,
}

fn page_style(primary_color: &str) -> String {
    format!(
        "body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}\n\
         .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}\n\
         .header {{ background-color: {primary_color}; color: white; padding: 20px; text-align: center; }}\n\
         .content {{ padding: 20px; background-color: #f9f9f9; }}\n\
         .details {{ background-color: white; padding: 15px; margin: 15px 0; border-radius: 5px; }}\n\
         .footer {{ text-align: center; padding: 20px; color: #666; }}"
    )
}

fn business_name(tenant: &Tenant) -> &str {
    tenant.business_name.as_deref().unwrap_or(&tenant.display_name)
}

/// Confirmation mail for the client who booked the slot.
pub fn booking_confirmation(slot: &Slot, tenant: &Tenant) -> RenderedMail {
    let date = slot.scheduled_at.format("%d.%m.%Y");
    let time = slot.scheduled_at.format("%H:%M");
    let client_name = slot.client_name.as_deref().unwrap_or("");
    let business = business_name(tenant);

    let message_block = match slot.client_message.as_deref() {
        Some(msg) if !msg.is_empty() => {
            format!("<p><strong>Ihre Nachricht:</strong> {msg}</p>\n")
        }
        _ => String::new(),
    };

    let subject = format!("Terminbestätigung - {date} um {time}");
    let html = format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Terminbestätigung - {business}</title>\n\
         <style>\n{style}\n</style>\n\
         </head>\n\
         <body>\n\
         <div class=\"container\">\n\
         <div class=\"header\">\n\
         <h1>{title}</h1>\n\
         <h2>{business}</h2>\n\
         </div>\n\
         <div class=\"content\">\n\
         <p>Hallo {client_name},</p>\n\
         <p>vielen Dank für Ihre Terminbuchung! Hiermit bestätigen wir Ihren Termin:</p>\n\
         <div class=\"details\">\n\
         <h3>Termindetails:</h3>\n\
         <p><strong>Datum:</strong> {date}</p>\n\
         <p><strong>Uhrzeit:</strong> {time}</p>\n\
         <p><strong>Dauer:</strong> {duration} Minuten</p>\n\
         {message_block}\
         </div>\n\
         <p>Falls Sie Fragen haben oder den Termin ändern müssen, kontaktieren Sie uns bitte.</p>\n\
         <p>Wir freuen uns auf Ihren Besuch!</p>\n\
         </div>\n\
         <div class=\"footer\">\n\
         <p>{business} - Powered by Slotter</p>\n\
         </div>\n\
         </div>\n\
         </body>\n\
         </html>",
        style = page_style(&tenant.primary_color),
        title = tenant.title,
        duration = slot.duration_minutes,
    );

    RenderedMail { subject, html }
}

/// Alert mail for the tenant owner about a new booking.
pub fn owner_alert(slot: &Slot, tenant: &Tenant) -> RenderedMail {
    let date = slot.scheduled_at.format("%d.%m.%Y");
    let time = slot.scheduled_at.format("%H:%M");
    let client_name = slot.client_name.as_deref().unwrap_or("");
    let client_email = slot.client_email.as_deref().unwrap_or("");
    let business = business_name(tenant);

    let phone_block = match slot.client_phone.as_deref() {
        Some(phone) if !phone.is_empty() => {
            format!("<p><strong>Telefon:</strong> {phone}</p>\n")
        }
        _ => String::new(),
    };
    let message_block = match slot.client_message.as_deref() {
        Some(msg) if !msg.is_empty() => {
            format!("<p><strong>Nachricht:</strong> {msg}</p>\n")
        }
        _ => String::new(),
    };

    let subject = format!("Neue Terminbuchung - {client_name} ({date})");
    let html = format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Neue Terminbuchung - {business}</title>\n\
         <style>\n{style}\n</style>\n\
         </head>\n\
         <body>\n\
         <div class=\"container\">\n\
         <div class=\"header\">\n\
         <h1>Neue Terminbuchung</h1>\n\
         <h2>{business}</h2>\n\
         </div>\n\
         <div class=\"content\">\n\
         <p>Es wurde ein neuer Termin für {username} gebucht:</p>\n\
         <div class=\"details\">\n\
         <h3>Kundendaten:</h3>\n\
         <p><strong>Name:</strong> {client_name}</p>\n\
         <p><strong>E-Mail:</strong> {client_email}</p>\n\
         {phone_block}\
         {message_block}\
         </div>\n\
         <div class=\"details\">\n\
         <h3>Termindetails:</h3>\n\
         <p><strong>Datum:</strong> {date}</p>\n\
         <p><strong>Uhrzeit:</strong> {time}</p>\n\
         <p><strong>Dauer:</strong> {duration} Minuten</p>\n\
         <p><strong>Slot-ID:</strong> {slot_id}</p>\n\
         </div>\n\
         </div>\n\
         <div class=\"footer\">\n\
         <p>{business} - Slotter Benachrichtigung</p>\n\
         </div>\n\
         </div>\n\
         </body>\n\
         </html>",
        style = page_style("#2196F3"),
        username = tenant.username,
        duration = slot.duration_minutes,
        slot_id = slot.id,
    );

    RenderedMail { subject, html }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn tenant() -> Tenant {
        Tenant {
            id: Uuid::new_v4(),
            username: "acme".into(),
            display_name: "Acme Corp".into(),
            email: "info@acme.example".into(),
            title: "Terminbuchung".into(),
            description: None,
            primary_color: "#4CAF50".into(),
            logo_url: None,
            business_name: Some("Acme GmbH".into()),
            business_address: None,
            business_phone: None,
            business_email: None,
            is_active: true,
            allow_public_booking: true,
            booking_lead_time_hours: 24,
            max_advance_days: 30,
            owner_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn slot() -> Slot {
        Slot {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            scheduled_at: Utc.with_ymd_and_hms(2026, 3, 14, 10, 30, 0).unwrap(),
            duration_minutes: 45,
            is_booked: true,
            client_name: Some("Max Mustermann".into()),
            client_email: Some("max@example.com".into()),
            client_phone: Some("+49 30 1234567".into()),
            client_message: Some("Bitte Parkplatz reservieren".into()),
            created_at: Utc::now(),
            booked_at: Some(Utc::now()),
        }
    }

    #[test]
    fn confirmation_includes_appointment_details() {
        let mail = booking_confirmation(&slot(), &tenant());
        assert_eq!(mail.subject, "Terminbestätigung - 14.03.2026 um 10:30");
        assert!(mail.html.contains("Hallo Max Mustermann"));
        assert!(mail.html.contains("14.03.2026"));
        assert!(mail.html.contains("10:30"));
        assert!(mail.html.contains("45 Minuten"));
        assert!(mail.html.contains("Bitte Parkplatz reservieren"));
        assert!(mail.html.contains("Acme GmbH"));
        assert!(mail.html.contains("#4CAF50"));
    }

    #[test]
    fn confirmation_omits_empty_message() {
        let mut s = slot();
        s.client_message = None;
        let mail = booking_confirmation(&s, &tenant());
        assert!(!mail.html.contains("Ihre Nachricht"));
    }

    #[test]
    fn alert_includes_client_contact() {
        let mail = owner_alert(&slot(), &tenant());
        assert!(mail.subject.starts_with("Neue Terminbuchung - Max Mustermann"));
        assert!(mail.html.contains("max@example.com"));
        assert!(mail.html.contains("+49 30 1234567"));
        assert!(mail.html.contains("für acme gebucht"));
    }

    #[test]
    fn display_name_backs_missing_business_name() {
        let mut t = tenant();
        t.business_name = None;
        let mail = booking_confirmation(&slot(), &t);
        assert!(mail.html.contains("Acme Corp"));
    }
}
