//! Batch assessment sweep.
//!
//! Scans every referral and creates an initial risk assessment for those
//! that have none. Failures are isolated per referral: a referral that
//! cannot be read is logged, counted, and skipped, never retried within
//! the run.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use derivapp_core::models::alert::Alert;
use derivapp_core::models::follow_up::{FollowUp, FollowUpOutcome};
use derivapp_core::models::referral::Referral;
use derivapp_core::store_keys;
use derivapp_storage::error::StorageError;
use derivapp_storage::{docs, objects};

/// Persistence surface the sweep runs against.
pub trait CaseStore {
    async fn referral_ids(&self) -> Result<Vec<Uuid>, StorageError>;
    async fn referral(&self, id: Uuid) -> Result<Referral, StorageError>;
    async fn follow_ups(&self, referral_id: Uuid) -> Result<Vec<FollowUp>, StorageError>;
    async fn has_assessment(&self, referral_id: Uuid) -> Result<bool, StorageError>;
    /// Create the referral's first assessment. Returns false when another
    /// writer created one concurrently.
    async fn create_assessment(&self, alert: &Alert) -> Result<bool, StorageError>;
}

#[derive(Debug, Default, Serialize)]
pub struct SweepSummary {
    pub scanned: usize,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct SweepOutcome {
    pub summary: SweepSummary,
    pub created: Vec<Alert>,
}

/// Run the sweep sequentially over every referral.
///
/// Only the initial referral listing can fail the run as a whole; after
/// that each referral succeeds or fails on its own.
pub async fn run_sweep<S: CaseStore>(store: &S) -> Result<SweepOutcome, StorageError> {
    let ids = store.referral_ids().await?;

    let mut summary = SweepSummary::default();
    let mut created = Vec::new();

    for id in ids {
        summary.scanned += 1;
        match sweep_one(store, id).await {
            Ok(Some(alert)) => {
                summary.created += 1;
                created.push(alert);
            }
            Ok(None) => summary.skipped += 1,
            Err(e) => {
                summary.failed += 1;
                warn!(referral_id = %id, error = %e, "sweep failed for referral");
            }
        }
    }

    info!(
        scanned = summary.scanned,
        created = summary.created,
        skipped = summary.skipped,
        failed = summary.failed,
        "assessment sweep finished"
    );

    Ok(SweepOutcome { summary, created })
}

async fn sweep_one<S: CaseStore>(
    store: &S,
    referral_id: Uuid,
) -> Result<Option<Alert>, StorageError> {
    if store.has_assessment(referral_id).await? {
        return Ok(None);
    }

    let referral = store.referral(referral_id).await?;
    let follow_ups = store.follow_ups(referral_id).await?;
    let outcomes: Vec<FollowUpOutcome> = follow_ups.iter().map(|f| f.outcome).collect();

    let assessment = derivapp_risk::assess(&outcomes, referral.priority, referral.status);
    let now = jiff::Timestamp::now();
    let alert = Alert {
        id: Uuid::new_v4(),
        referral_id,
        score_real: assessment.score_real,
        score_normalizado: assessment.score_normalizado,
        nivel_alerta: assessment.level,
        computed_at: now,
        created_at: now,
    };

    // Losing the create race counts as skipped, not failed.
    if store.create_assessment(&alert).await? {
        Ok(Some(alert))
    } else {
        Ok(None)
    }
}

/// The production store: documents in S3.
pub struct S3CaseStore {
    s3: aws_sdk_s3::Client,
    bucket: String,
}

impl S3CaseStore {
    pub fn new(s3: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { s3, bucket }
    }
}

impl CaseStore for S3CaseStore {
    async fn referral_ids(&self) -> Result<Vec<Uuid>, StorageError> {
        let keys =
            objects::list_objects(&self.s3, &self.bucket, store_keys::REFERRALS_PREFIX).await?;
        Ok(keys
            .iter()
            .filter_map(|key| {
                key.strip_prefix(store_keys::REFERRALS_PREFIX)?
                    .strip_suffix(".json")?
                    .parse::<Uuid>()
                    .ok()
            })
            .collect())
    }

    async fn referral(&self, id: Uuid) -> Result<Referral, StorageError> {
        docs::load_doc(&self.s3, &self.bucket, &store_keys::referral(id)).await
    }

    async fn follow_ups(&self, referral_id: Uuid) -> Result<Vec<FollowUp>, StorageError> {
        let keys = objects::list_objects(
            &self.s3,
            &self.bucket,
            &store_keys::follow_ups_prefix(referral_id),
        )
        .await?;

        let mut follow_ups = Vec::new();
        for key in &keys {
            let follow_up: FollowUp = docs::load_doc(&self.s3, &self.bucket, key).await?;
            follow_ups.push(follow_up);
        }
        Ok(follow_ups)
    }

    async fn has_assessment(&self, referral_id: Uuid) -> Result<bool, StorageError> {
        let keys = objects::list_objects(
            &self.s3,
            &self.bucket,
            &store_keys::alerts_prefix(referral_id),
        )
        .await?;
        Ok(!keys.is_empty())
    }

    async fn create_assessment(&self, alert: &Alert) -> Result<bool, StorageError> {
        let key = store_keys::initial_alert(alert.referral_id);
        match docs::create_doc(&self.s3, &self.bucket, &key, alert).await {
            Ok(_) => Ok(true),
            Err(StorageError::AlreadyExists { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use derivapp_core::models::alert::AlertLevel;
    use derivapp_core::models::referral::{Priority, ReferralStatus};

    #[derive(Default)]
    struct InMemoryCaseStore {
        referrals: HashMap<Uuid, Referral>,
        follow_ups: HashMap<Uuid, Vec<FollowUp>>,
        unreadable: HashSet<Uuid>,
        alerts: Mutex<HashMap<Uuid, Alert>>,
    }

    fn referral(id: Uuid, priority: Priority, status: ReferralStatus) -> Referral {
        let now = jiff::Timestamp::now();
        Referral {
            id,
            student_id: Uuid::new_v4(),
            reason: "inasistencias reiteradas".to_string(),
            description: None,
            priority,
            status,
            referred_by: "test-user".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn follow_up(referral_id: Uuid, outcome: FollowUpOutcome) -> FollowUp {
        FollowUp {
            id: Uuid::new_v4(),
            referral_id,
            outcome,
            notes: None,
            occurred_at: jiff::civil::date(2025, 5, 12),
            recorded_by: "test-user".to_string(),
            created_at: jiff::Timestamp::now(),
        }
    }

    impl InMemoryCaseStore {
        fn add_referral(&mut self, priority: Priority, status: ReferralStatus) -> Uuid {
            let id = Uuid::new_v4();
            self.referrals.insert(id, referral(id, priority, status));
            id
        }
    }

    impl CaseStore for InMemoryCaseStore {
        async fn referral_ids(&self) -> Result<Vec<Uuid>, StorageError> {
            Ok(self.referrals.keys().copied().collect())
        }

        async fn referral(&self, id: Uuid) -> Result<Referral, StorageError> {
            if self.unreadable.contains(&id) {
                return Err(StorageError::GetObject("simulated read failure".to_string()));
            }
            self.referrals
                .get(&id)
                .cloned()
                .ok_or(StorageError::NotFound {
                    key: store_keys::referral(id),
                })
        }

        async fn follow_ups(&self, referral_id: Uuid) -> Result<Vec<FollowUp>, StorageError> {
            Ok(self.follow_ups.get(&referral_id).cloned().unwrap_or_default())
        }

        async fn has_assessment(&self, referral_id: Uuid) -> Result<bool, StorageError> {
            Ok(self.alerts.lock().unwrap().contains_key(&referral_id))
        }

        async fn create_assessment(&self, alert: &Alert) -> Result<bool, StorageError> {
            let mut alerts = self.alerts.lock().unwrap();
            if alerts.contains_key(&alert.referral_id) {
                return Ok(false);
            }
            alerts.insert(alert.referral_id, alert.clone());
            Ok(true)
        }
    }

    #[tokio::test]
    async fn unassessed_referrals_get_an_assessment() {
        let mut store = InMemoryCaseStore::default();
        store.add_referral(Priority::Low, ReferralStatus::Open);
        store.add_referral(Priority::High, ReferralStatus::Open);

        let outcome = run_sweep(&store).await.unwrap();
        assert_eq!(outcome.summary.scanned, 2);
        assert_eq!(outcome.summary.created, 2);
        assert_eq!(outcome.summary.skipped, 0);
        assert_eq!(outcome.summary.failed, 0);
        assert_eq!(store.alerts.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn referrals_with_an_assessment_are_skipped() {
        let mut store = InMemoryCaseStore::default();
        let id = store.add_referral(Priority::Low, ReferralStatus::Open);

        let first = run_sweep(&store).await.unwrap();
        assert_eq!(first.summary.created, 1);

        // Second run sees the existing assessment and leaves it alone.
        let second = run_sweep(&store).await.unwrap();
        assert_eq!(second.summary.created, 0);
        assert_eq!(second.summary.skipped, 1);

        let alerts = store.alerts.lock().unwrap();
        assert_eq!(
            alerts.get(&id).map(|a| a.id),
            Some(first.created[0].id),
            "the original assessment must survive re-sweeping"
        );
    }

    #[tokio::test]
    async fn a_failing_referral_does_not_abort_the_sweep() {
        let mut store = InMemoryCaseStore::default();
        store.add_referral(Priority::Low, ReferralStatus::Open);
        let broken = store.add_referral(Priority::High, ReferralStatus::Open);
        store.add_referral(Priority::Medium, ReferralStatus::Closed);
        store.unreadable.insert(broken);

        let outcome = run_sweep(&store).await.unwrap();
        assert_eq!(outcome.summary.scanned, 3);
        assert_eq!(outcome.summary.created, 2);
        assert_eq!(outcome.summary.failed, 1);
        assert!(!store.alerts.lock().unwrap().contains_key(&broken));
    }

    #[tokio::test]
    async fn swept_values_match_the_scorer() {
        let mut store = InMemoryCaseStore::default();
        let id = store.add_referral(Priority::High, ReferralStatus::Open);
        store
            .follow_ups
            .insert(id, vec![follow_up(id, FollowUpOutcome::Negative)]);

        let outcome = run_sweep(&store).await.unwrap();
        let alert = &outcome.created[0];
        assert!((alert.score_real - 2.8).abs() < 1e-9);
        assert!((alert.score_normalizado - 2.8 / 3.0 * 100.0).abs() < 1e-9);
        assert_eq!(alert.nivel_alerta, AlertLevel::Critical);
    }

    #[tokio::test]
    async fn a_referral_with_no_follow_ups_still_scores() {
        let mut store = InMemoryCaseStore::default();
        store.add_referral(Priority::Low, ReferralStatus::Closed);

        let outcome = run_sweep(&store).await.unwrap();
        assert_eq!(outcome.summary.created, 1);
        assert_eq!(outcome.created[0].nivel_alerta, AlertLevel::Moderate);
    }

    /// Store that reports "no assessment" even when one exists, modelling
    /// a racing sweep that loses the conditional create.
    struct RacingStore(InMemoryCaseStore);

    impl CaseStore for RacingStore {
        async fn referral_ids(&self) -> Result<Vec<Uuid>, StorageError> {
            self.0.referral_ids().await
        }
        async fn referral(&self, id: Uuid) -> Result<Referral, StorageError> {
            self.0.referral(id).await
        }
        async fn follow_ups(&self, referral_id: Uuid) -> Result<Vec<FollowUp>, StorageError> {
            self.0.follow_ups(referral_id).await
        }
        async fn has_assessment(&self, _referral_id: Uuid) -> Result<bool, StorageError> {
            Ok(false)
        }
        async fn create_assessment(&self, alert: &Alert) -> Result<bool, StorageError> {
            self.0.create_assessment(alert).await
        }
    }

    #[tokio::test]
    async fn losing_the_create_race_counts_as_skipped() {
        let mut inner = InMemoryCaseStore::default();
        let id = inner.add_referral(Priority::Low, ReferralStatus::Open);
        let store = RacingStore(inner);

        let first = run_sweep(&store).await.unwrap();
        assert_eq!(first.summary.created, 1);

        // The stale existence check falls through to the conditional
        // create, which refuses to overwrite.
        let second = run_sweep(&store).await.unwrap();
        assert_eq!(second.summary.created, 0);
        assert_eq!(second.summary.skipped, 1);
        assert_eq!(
            store.0.alerts.lock().unwrap().get(&id).map(|a| a.id),
            Some(first.created[0].id)
        );
    }
}
