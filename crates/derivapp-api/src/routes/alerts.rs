use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use derivapp_audit::events::ActivityEvent;
use derivapp_auth::permissions::Permission;
use derivapp_core::models::alert::Alert;
use derivapp_core::models::follow_up::{FollowUp, FollowUpOutcome};
use derivapp_core::models::referral::Referral;
use derivapp_core::store_keys;
use derivapp_notify::WebhookEvent;
use derivapp_storage::{docs, objects};

use crate::error::ApiError;
use crate::jobs::sweep::{run_sweep, S3CaseStore, SweepSummary};
use crate::middleware::auth::{ensure, AuthUser};
use crate::routes::activity;
use crate::state::AppState;

/// All assessments of one referral, newest first.
pub async fn list_referral_alerts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(referral_id): Path<Uuid>,
) -> Result<Json<Vec<Alert>>, ApiError> {
    ensure(&user, Permission::ReadAlerts)?;

    let keys = objects::list_objects(
        &state.s3,
        &state.bucket,
        &store_keys::alerts_prefix(referral_id),
    )
    .await?;

    let mut alerts = Vec::new();
    for key in &keys {
        let alert: Alert = docs::load_doc(&state.s3, &state.bucket, key).await?;
        alerts.push(alert);
    }
    alerts.sort_by_key(|a| a.computed_at);
    alerts.reverse();

    Ok(Json(alerts))
}

/// Score the referral again and append a new assessment.
///
/// Earlier assessments are kept; the history of a case's risk is part of
/// the case record.
pub async fn recompute_alert(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(referral_id): Path<Uuid>,
) -> Result<Json<Alert>, ApiError> {
    ensure(&user, Permission::ManageAlerts)?;

    let referral: Referral =
        docs::load_doc(&state.s3, &state.bucket, &store_keys::referral(referral_id)).await?;

    let outcomes = load_outcomes(&state, referral_id).await?;
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

    docs::save_doc(
        &state.s3,
        &state.bucket,
        &store_keys::alert(referral_id, alert.id),
        &alert,
    )
    .await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "recompute", "alert", alert.id.to_string()),
    )
    .await;

    notify_if_elevated(&state, &alert);

    Ok(Json(alert))
}

/// Latest assessment per referral, highest risk first.
pub async fn list_latest_alerts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Alert>>, ApiError> {
    ensure(&user, Permission::ReadAlerts)?;

    let keys = objects::list_objects(&state.s3, &state.bucket, store_keys::ALERTS_PREFIX).await?;

    let mut latest: HashMap<Uuid, Alert> = HashMap::new();
    for key in &keys {
        let alert: Alert = docs::load_doc(&state.s3, &state.bucket, key).await?;
        let newer = latest
            .get(&alert.referral_id)
            .is_none_or(|existing| alert.computed_at > existing.computed_at);
        if newer {
            latest.insert(alert.referral_id, alert);
        }
    }

    let mut alerts: Vec<Alert> = latest.into_values().collect();
    alerts.sort_by(|a, b| b.score_normalizado.total_cmp(&a.score_normalizado));

    Ok(Json(alerts))
}

/// Run the batch sweep over every referral without an assessment.
pub async fn run_alert_sweep(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SweepSummary>, ApiError> {
    ensure(&user, Permission::ManageAlerts)?;

    let store = S3CaseStore::new(state.s3.clone(), state.bucket.clone());
    let outcome = run_sweep(&store).await?;

    for alert in &outcome.created {
        notify_if_elevated(&state, alert);
    }

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "sweep", "alert", "batch").with_details(serde_json::json!({
            "scanned": outcome.summary.scanned,
            "created": outcome.summary.created,
            "skipped": outcome.summary.skipped,
            "failed": outcome.summary.failed,
        })),
    )
    .await;

    Ok(Json(outcome.summary))
}

async fn load_outcomes(
    state: &AppState,
    referral_id: Uuid,
) -> Result<Vec<FollowUpOutcome>, ApiError> {
    let keys = objects::list_objects(
        &state.s3,
        &state.bucket,
        &store_keys::follow_ups_prefix(referral_id),
    )
    .await?;

    let mut outcomes = Vec::new();
    for key in &keys {
        let follow_up: FollowUp = docs::load_doc(&state.s3, &state.bucket, key).await?;
        outcomes.push(follow_up.outcome);
    }
    Ok(outcomes)
}

fn notify_if_elevated(state: &AppState, alert: &Alert) {
    if alert.nivel_alerta.is_elevated() {
        state.notify.emit(WebhookEvent::alert_raised(
            alert.referral_id,
            serde_json::json!({
                "nivelAlerta": alert.nivel_alerta,
                "scoreNormalizado": alert.score_normalizado,
            }),
        ));
    }
}
