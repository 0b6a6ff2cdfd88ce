use serde::{Deserialize, Serialize};
use ts_rs::TS;

use derivapp_core::models::alert::AlertLevel;
use derivapp_core::models::follow_up::FollowUpOutcome;
use derivapp_core::models::referral::{Priority, ReferralStatus};

/// Share of each component in the raw score. The three shares form a
/// convex combination: they must sum to 1.0, and changing any of them
/// requires re-deriving [`MAX_RAW_SCORE`].
const FOLLOW_UP_SHARE: f64 = 0.5;
const PRIORITY_SHARE: f64 = 0.3;
const STATUS_SHARE: f64 = 0.2;

/// Maximum theoretical raw score, reached at component maxima
/// {follow-up 3, priority 3, status 2}: 3*0.5 + 3*0.3 + 2*0.2 = 3.
const MAX_RAW_SCORE: f64 = 3.0;

/// Neutral follow-up component assumed when a referral has no
/// follow-ups yet.
const EMPTY_FOLLOW_UP_SCORE: f64 = 2.0;

const CRITICAL_THRESHOLD: f64 = 80.0;
const HIGH_THRESHOLD: f64 = 60.0;
const MODERATE_THRESHOLD: f64 = 40.0;

fn outcome_weight(outcome: FollowUpOutcome) -> f64 {
    match outcome {
        FollowUpOutcome::Positive => 1.0,
        FollowUpOutcome::Neutral | FollowUpOutcome::Pending => 2.0,
        FollowUpOutcome::Negative => 3.0,
    }
}

fn priority_weight(priority: Priority) -> f64 {
    match priority {
        Priority::High => 3.0,
        Priority::Medium => 2.0,
        Priority::Low => 1.0,
    }
}

fn status_weight(status: ReferralStatus) -> f64 {
    match status {
        ReferralStatus::Open => 2.0,
        ReferralStatus::Closed => 1.0,
    }
}

/// Result of scoring one referral.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assessment {
    #[serde(rename = "scoreReal")]
    pub score_real: f64,
    #[serde(rename = "scoreNormalizado")]
    pub score_normalizado: f64,
    #[serde(rename = "nivelAlerta")]
    pub level: AlertLevel,
}

/// Score a referral from its follow-up outcomes and case snapshot.
///
/// Total over its whole domain: every input produces an assessment, so
/// the batch sweep can run it best-effort over many referrals without a
/// failure path. The follow-up component is the mean outcome weight
/// (order-independent), or a neutral 2.0 when there are no follow-ups.
pub fn assess(
    outcomes: &[FollowUpOutcome],
    priority: Priority,
    status: ReferralStatus,
) -> Assessment {
    let follow_up_score = if outcomes.is_empty() {
        EMPTY_FOLLOW_UP_SCORE
    } else {
        let total: f64 = outcomes.iter().copied().map(outcome_weight).sum();
        total / outcomes.len() as f64
    };

    let score_real = follow_up_score * FOLLOW_UP_SHARE
        + priority_weight(priority) * PRIORITY_SHARE
        + status_weight(status) * STATUS_SHARE;

    // The clamp guards the normalization assumption about MAX_RAW_SCORE.
    let score_normalizado = (score_real / MAX_RAW_SCORE * 100.0).clamp(0.0, 100.0);

    Assessment {
        score_real,
        score_normalizado,
        level: level_for(score_normalizado),
    }
}

/// Bucket a normalized score. Thresholds are checked highest first and
/// leave no gaps or overlaps.
pub fn level_for(score_normalizado: f64) -> AlertLevel {
    if score_normalizado >= CRITICAL_THRESHOLD {
        AlertLevel::Critical
    } else if score_normalizado >= HIGH_THRESHOLD {
        AlertLevel::High
    } else if score_normalizado >= MODERATE_THRESHOLD {
        AlertLevel::Moderate
    } else {
        AlertLevel::Low
    }
}
