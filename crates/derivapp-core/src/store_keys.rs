//! Document-key conventions.
//!
//! Pure string functions — no AWS SDK dependency. These define the
//! canonical layout of JSON documents in the DerivApp bucket.

use uuid::Uuid;

pub fn student(id: Uuid) -> String {
    format!("students/{id}.json")
}

pub const STUDENTS_PREFIX: &str = "students/";

pub fn referral(id: Uuid) -> String {
    format!("referrals/{id}.json")
}

pub const REFERRALS_PREFIX: &str = "referrals/";

pub fn follow_up(referral_id: Uuid, id: Uuid) -> String {
    format!("followups/{referral_id}/{id}.json")
}

pub fn follow_ups_prefix(referral_id: Uuid) -> String {
    format!("followups/{referral_id}/")
}

pub fn intervention(referral_id: Uuid, id: Uuid) -> String {
    format!("interventions/{referral_id}/{id}.json")
}

pub fn interventions_prefix(referral_id: Uuid) -> String {
    format!("interventions/{referral_id}/")
}

pub fn appointment(id: Uuid) -> String {
    format!("appointments/{id}.json")
}

pub const APPOINTMENTS_PREFIX: &str = "appointments/";

pub fn form(id: Uuid) -> String {
    format!("forms/{id}.json")
}

pub const FORMS_PREFIX: &str = "forms/";

pub fn alert(referral_id: Uuid, id: Uuid) -> String {
    format!("alerts/{referral_id}/{id}.json")
}

/// The sweep writes the first assessment of a referral to a fixed key so
/// a create-only precondition can make the write at-most-once.
pub fn initial_alert(referral_id: Uuid) -> String {
    format!("alerts/{referral_id}/initial.json")
}

pub fn alerts_prefix(referral_id: Uuid) -> String {
    format!("alerts/{referral_id}/")
}

pub const ALERTS_PREFIX: &str = "alerts/";

pub fn activity(id: Uuid) -> String {
    format!("activity/{id}.json")
}

pub const ACTIVITY_PREFIX: &str = "activity/";
