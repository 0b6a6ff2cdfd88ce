use derivapp_core::store_keys;
use uuid::Uuid;

#[test]
fn entity_keys_are_prefixed_json() {
    let id = Uuid::new_v4();
    assert_eq!(store_keys::student(id), format!("students/{id}.json"));
    assert_eq!(store_keys::referral(id), format!("referrals/{id}.json"));
    assert_eq!(store_keys::appointment(id), format!("appointments/{id}.json"));
    assert_eq!(store_keys::form(id), format!("forms/{id}.json"));
    assert_eq!(store_keys::activity(id), format!("activity/{id}.json"));
}

#[test]
fn nested_keys_scope_by_referral() {
    let rid = Uuid::new_v4();
    let id = Uuid::new_v4();
    assert_eq!(
        store_keys::follow_up(rid, id),
        format!("followups/{rid}/{id}.json")
    );
    assert!(store_keys::follow_up(rid, id).starts_with(&store_keys::follow_ups_prefix(rid)));
    assert!(store_keys::intervention(rid, id).starts_with(&store_keys::interventions_prefix(rid)));
    assert!(store_keys::alert(rid, id).starts_with(&store_keys::alerts_prefix(rid)));
    assert!(store_keys::initial_alert(rid).starts_with(&store_keys::alerts_prefix(rid)));
    assert!(store_keys::alerts_prefix(rid).starts_with(store_keys::ALERTS_PREFIX));
}
