use derivapp_core::models::alert::AlertLevel;
use derivapp_core::models::follow_up::FollowUpOutcome;
use derivapp_core::models::referral::{Priority, ReferralStatus};
use derivapp_core::models::follow_up::FollowUpOutcome::{Negative, Neutral, Pending, Positive};
use derivapp_risk::{assess, level_for};

const EPS: f64 = 1e-9;

#[test]
fn repeated_calls_are_bit_identical() {
    let outcomes = [Positive, Pending, Negative];
    let a = assess(&outcomes, Priority::Medium, ReferralStatus::Open);
    let b = assess(&outcomes, Priority::Medium, ReferralStatus::Open);
    assert_eq!(a.score_real.to_bits(), b.score_real.to_bits());
    assert_eq!(a.score_normalizado.to_bits(), b.score_normalizado.to_bits());
    assert_eq!(a.level, b.level);
}

#[test]
fn empty_follow_ups_use_the_neutral_default() {
    let a = assess(&[], Priority::Low, ReferralStatus::Open);
    // follow-up component is exactly 2 when there is no history
    let expected = 2.0 * 0.5 + 1.0 * 0.3 + 2.0 * 0.2;
    assert!((a.score_real - expected).abs() < EPS);
    // same as a single neutral follow-up
    let single = assess(&[Neutral], Priority::Low, ReferralStatus::Open);
    assert!((a.score_real - single.score_real).abs() < EPS);
}

#[test]
fn normalized_score_stays_in_bounds() {
    let outcome_sets: [&[FollowUpOutcome]; 4] = [
        &[],
        &[Positive],
        &[Negative, Negative, Negative],
        &[Positive, Neutral, Pending, Negative],
    ];
    for outcomes in outcome_sets {
        for priority in [Priority::High, Priority::Medium, Priority::Low] {
            for status in [ReferralStatus::Open, ReferralStatus::Closed] {
                let a = assess(outcomes, priority, status);
                assert!((0.0..=100.0).contains(&a.score_normalizado));
            }
        }
    }
}

#[test]
fn closed_low_priority_case_with_no_history_is_moderate() {
    let a = assess(&[], Priority::Low, ReferralStatus::Closed);
    assert!((a.score_real - 1.5).abs() < EPS);
    assert!((a.score_normalizado - 50.0).abs() < EPS);
    assert_eq!(a.level, AlertLevel::Moderate);
}

#[test]
fn open_high_priority_case_with_negative_history_is_critical() {
    let a = assess(&[Negative], Priority::High, ReferralStatus::Open);
    assert!((a.score_real - 2.8).abs() < EPS);
    assert!((a.score_normalizado - 2.8 / 3.0 * 100.0).abs() < EPS);
    assert_eq!(a.level, AlertLevel::Critical);
}

#[test]
fn closed_case_with_positive_history_is_low() {
    let a = assess(&[Positive], Priority::Low, ReferralStatus::Closed);
    assert!((a.score_real - 1.0).abs() < EPS);
    assert!((a.score_normalizado - 100.0 / 3.0).abs() < EPS);
    assert_eq!(a.level, AlertLevel::Low);
}

#[test]
fn mixed_follow_ups_average_order_independently() {
    let forward = assess(&[Positive, Negative], Priority::Low, ReferralStatus::Open);
    let backward = assess(&[Negative, Positive], Priority::Low, ReferralStatus::Open);
    let neutral = assess(&[Neutral], Priority::Low, ReferralStatus::Open);
    // (1 + 3) / 2 = 2, the neutral weight
    assert!((forward.score_real - neutral.score_real).abs() < EPS);
    assert!((forward.score_real - backward.score_real).abs() < EPS);
}

#[test]
fn unknown_categories_fall_back_to_the_documented_defaults() {
    let odd = assess(
        &[FollowUpOutcome::classify("unknown_value")],
        Priority::classify("unknown"),
        ReferralStatus::classify("unknown"),
    );
    let baseline = assess(&[Neutral], Priority::Low, ReferralStatus::Open);
    assert!((odd.score_real - baseline.score_real).abs() < EPS);
    assert!((odd.score_normalizado - baseline.score_normalizado).abs() < EPS);
    assert_eq!(odd.level, baseline.level);
}

#[test]
fn worsening_an_outcome_never_lowers_the_score() {
    for priority in [Priority::High, Priority::Medium, Priority::Low] {
        for status in [ReferralStatus::Open, ReferralStatus::Closed] {
            let better = assess(&[Positive, Pending], priority, status);
            let worse = assess(&[Negative, Pending], priority, status);
            assert!(worse.score_normalizado >= better.score_normalizado);
        }
    }
}

#[test]
fn rescoring_unchanged_inputs_is_idempotent() {
    let outcomes = [Pending, Negative];
    let first = assess(&outcomes, Priority::Medium, ReferralStatus::Open);
    let second = assess(&outcomes, Priority::Medium, ReferralStatus::Open);
    assert_eq!(first.score_real, second.score_real);
    assert_eq!(first.score_normalizado, second.score_normalizado);
    assert_eq!(first.level, second.level);
}

#[test]
fn buckets_have_no_gaps_or_overlaps() {
    assert_eq!(level_for(100.0), AlertLevel::Critical);
    assert_eq!(level_for(80.0), AlertLevel::Critical);
    assert_eq!(level_for(79.999), AlertLevel::High);
    assert_eq!(level_for(60.0), AlertLevel::High);
    assert_eq!(level_for(59.999), AlertLevel::Moderate);
    assert_eq!(level_for(40.0), AlertLevel::Moderate);
    assert_eq!(level_for(39.999), AlertLevel::Low);
    assert_eq!(level_for(0.0), AlertLevel::Low);
}

#[test]
fn assessment_serializes_with_the_wire_field_names() {
    let a = assess(&[Negative], Priority::High, ReferralStatus::Open);
    let json = serde_json::to_value(&a).unwrap();
    assert!(json.get("scoreReal").is_some());
    assert!(json.get("scoreNormalizado").is_some());
    assert_eq!(
        json.get("nivelAlerta").and_then(|v| v.as_str()),
        Some("Alerta crítica")
    );
}
