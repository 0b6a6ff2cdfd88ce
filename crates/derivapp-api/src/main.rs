use std::env;
use std::sync::Arc;

use axum::middleware as axum_mw;
use axum::routing::{delete, get, post, put};
use axum::Router;
use jsonwebtoken::DecodingKey;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod error;
mod jobs;
mod middleware;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let bucket = env::var("DERIVAPP_BUCKET").unwrap_or_else(|_| "derivapp".to_string());
    let bind = env::var("DERIVAPP_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let user_pool_id =
        env::var("COGNITO_USER_POOL_ID").unwrap_or_else(|_| "us-east-1_placeholder".to_string());
    let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
    let webhook_url = env::var("DERIVAPP_WEBHOOK_URL").ok();

    let decoding_key = match env::var("DERIVAPP_JWT_PUBLIC_KEY_PEM") {
        Ok(path) => {
            let pem = std::fs::read(&path)?;
            Some(Arc::new(DecodingKey::from_rsa_pem(&pem)?))
        }
        Err(_) => {
            tracing::warn!(
                "DERIVAPP_JWT_PUBLIC_KEY_PEM not set, token signatures will not be verified"
            );
            None
        }
    };

    let s3 = derivapp_storage::client::build_client().await;
    let cognito = derivapp_auth::client::build_client_with_region(&region).await;
    let notify = derivapp_notify::spawn_dispatcher(webhook_url);

    let state = AppState {
        s3,
        bucket,
        cognito,
        user_pool_id,
        region,
        decoding_key,
        notify,
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(%bind, "derivapp api listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/me", get(routes::me::get_me))
        // Students
        .route("/students", get(routes::students::list_students))
        .route("/students", post(routes::students::create_student))
        .route("/students/{id}", get(routes::students::get_student))
        .route("/students/{id}", put(routes::students::update_student))
        .route("/students/{id}", delete(routes::students::delete_student))
        // Referrals
        .route("/referrals", get(routes::referrals::list_referrals))
        .route("/referrals", post(routes::referrals::create_referral))
        .route("/referrals/{id}", get(routes::referrals::get_referral))
        .route("/referrals/{id}", put(routes::referrals::update_referral))
        .route("/referrals/{id}", delete(routes::referrals::delete_referral))
        // Follow-ups
        .route(
            "/referrals/{id}/followups",
            get(routes::follow_ups::list_follow_ups),
        )
        .route(
            "/referrals/{id}/followups",
            post(routes::follow_ups::create_follow_up),
        )
        .route(
            "/referrals/{id}/followups/{follow_up_id}",
            get(routes::follow_ups::get_follow_up),
        )
        .route(
            "/referrals/{id}/followups/{follow_up_id}",
            delete(routes::follow_ups::delete_follow_up),
        )
        // Interventions
        .route(
            "/referrals/{id}/interventions",
            get(routes::interventions::list_interventions),
        )
        .route(
            "/referrals/{id}/interventions",
            post(routes::interventions::create_intervention),
        )
        .route(
            "/referrals/{id}/interventions/{intervention_id}",
            get(routes::interventions::get_intervention),
        )
        .route(
            "/referrals/{id}/interventions/{intervention_id}",
            put(routes::interventions::update_intervention),
        )
        .route(
            "/referrals/{id}/interventions/{intervention_id}",
            delete(routes::interventions::delete_intervention),
        )
        // Referral assessments
        .route(
            "/referrals/{id}/alerts",
            get(routes::alerts::list_referral_alerts),
        )
        .route(
            "/referrals/{id}/alerts/recompute",
            post(routes::alerts::recompute_alert),
        )
        // Appointments
        .route(
            "/appointments",
            get(routes::appointments::list_appointments),
        )
        .route(
            "/appointments",
            post(routes::appointments::create_appointment),
        )
        .route(
            "/appointments/{id}",
            get(routes::appointments::get_appointment),
        )
        .route(
            "/appointments/{id}",
            put(routes::appointments::update_appointment),
        )
        .route(
            "/appointments/{id}",
            delete(routes::appointments::delete_appointment),
        )
        // Forms
        .route("/forms", get(routes::forms::list_forms))
        .route("/forms", post(routes::forms::create_form))
        .route("/forms/draft", post(routes::forms::draft_form))
        .route("/forms/{id}", get(routes::forms::get_form))
        .route("/forms/{id}", put(routes::forms::update_form))
        .route("/forms/{id}", delete(routes::forms::delete_form))
        // Alerts dashboard + sweep
        .route("/alerts", get(routes::alerts::list_latest_alerts))
        .route("/alerts/sweep", post(routes::alerts::run_alert_sweep))
        // Activity log
        .route("/activity", get(routes::activity::list_activity))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn test_state() -> AppState {
        AppState {
            s3: derivapp_storage::client::build_client().await,
            bucket: "derivapp-test".to_string(),
            cognito: derivapp_auth::client::build_client().await,
            user_pool_id: "us-east-1_placeholder".to_string(),
            region: "us-east-1".to_string(),
            decoding_key: None,
            notify: derivapp_notify::spawn_dispatcher(None),
        }
    }

    #[tokio::test]
    async fn health_is_open_and_the_rest_is_gated() {
        let app = build_router(test_state().await);

        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        // No Authorization header
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/students")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
