use derivapp_core::models::appointment::AppointmentStatus;
use derivapp_core::models::follow_up::FollowUpOutcome;
use derivapp_core::models::referral::{Priority, ReferralStatus};

#[test]
fn outcome_classification_is_case_insensitive() {
    assert_eq!(FollowUpOutcome::classify("positivo"), FollowUpOutcome::Positive);
    assert_eq!(FollowUpOutcome::classify("POSITIVO"), FollowUpOutcome::Positive);
    assert_eq!(FollowUpOutcome::classify(" Negativo "), FollowUpOutcome::Negative);
    assert_eq!(FollowUpOutcome::classify("pendiente"), FollowUpOutcome::Pending);
    assert_eq!(FollowUpOutcome::classify("neutro"), FollowUpOutcome::Neutral);
}

#[test]
fn unknown_outcome_counts_as_neutral() {
    assert_eq!(FollowUpOutcome::classify("unknown_value"), FollowUpOutcome::Neutral);
    assert_eq!(FollowUpOutcome::classify(""), FollowUpOutcome::Neutral);
}

#[test]
fn unknown_priority_counts_as_low() {
    assert_eq!(Priority::classify("alta"), Priority::High);
    assert_eq!(Priority::classify("Media"), Priority::Medium);
    assert_eq!(Priority::classify("unknown"), Priority::Low);
    assert_eq!(Priority::classify(""), Priority::Low);
}

#[test]
fn unknown_status_counts_as_open() {
    assert_eq!(ReferralStatus::classify("cerrada"), ReferralStatus::Closed);
    assert_eq!(ReferralStatus::classify("abierta"), ReferralStatus::Open);
    assert_eq!(ReferralStatus::classify("unknown"), ReferralStatus::Open);
}

#[test]
fn unknown_appointment_status_counts_as_scheduled() {
    assert_eq!(AppointmentStatus::classify("realizada"), AppointmentStatus::Held);
    assert_eq!(AppointmentStatus::classify("cancelada"), AppointmentStatus::Cancelled);
    assert_eq!(AppointmentStatus::classify("??"), AppointmentStatus::Scheduled);
}

#[test]
fn spanish_wire_values_round_trip() {
    let json = serde_json::to_string(&Priority::High).unwrap();
    assert_eq!(json, "\"alta\"");
    let back: Priority = serde_json::from_str("\"baja\"").unwrap();
    assert_eq!(back, Priority::Low);

    // Unrecognized stored values fold to the documented defaults.
    let odd: FollowUpOutcome = serde_json::from_str("\"algo_raro\"").unwrap();
    assert_eq!(odd, FollowUpOutcome::Neutral);
    let odd: ReferralStatus = serde_json::from_str("\"???\"").unwrap();
    assert_eq!(odd, ReferralStatus::Open);
}
