use chrono::Utc;

use crate::services::detector::{Notification, Snapshot};

const LOCATION_LABEL: &str = "Richmond (Lansdowne Centre mall)";
const BOOKING_URL: &str = "https://onlinebusiness.icbc.com/webdeas-ui/booking";

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn slot_lines(slots: &Snapshot) -> String {
    slots
        .iter()
        .map(|slot| format!("📅 {slot}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-time message sent before the first poll cycle.
pub fn render_startup(check_interval_minutes: u64) -> String {
    format!(
        "🟢 **ICBC Appointment Checker Started** - {}\n\n\
         I'll check for appointments every {} minutes.\n\
         I'll notify you about:\n\
         • New appointments when they become available\n\
         • Current appointment status on each check\n\
         • Any errors that occur during checking",
        timestamp(),
        check_interval_minutes
    )
}

/// Message for the outcome of a successful poll cycle.
pub fn render(notification: &Notification) -> String {
    match notification {
        Notification::NewSlots(slots) => format!(
            "🚨 **New ICBC Road Test Appointments Available!**\n\n{}\n\nBook now at: {}",
            slot_lines(slots),
            BOOKING_URL
        ),
        Notification::NoneAvailable => format!(
            "⚠️ **ICBC Appointment Check Update** - {}\n\n\
             No appointments currently available at {}.\n\
             I'll keep checking and notify you when appointments become available.",
            timestamp(),
            LOCATION_LABEL
        ),
        Notification::UnchangedAvailable(slots) => format!(
            "ℹ️ **ICBC Appointment Check Update** - {}\n\n\
             Currently available appointments:\n{}\n\n\
             No new appointments since last check.",
            timestamp(),
            slot_lines(slots)
        ),
    }
}

/// Generic message for a failed poll cycle; details stay in the logs.
pub fn render_failure() -> String {
    format!(
        "❌ **ICBC Checker Error** - {}\n\n\
         Failed to check appointments.\n\
         I'll try again in the next scheduled check.",
        timestamp()
    )
}
