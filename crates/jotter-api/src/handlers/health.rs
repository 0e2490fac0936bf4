//! Liveness and database connectivity report.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvReport {
    pub has_database_url: bool,
}

#[derive(Debug, Serialize)]
pub struct DbReport {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub env: EnvReport,
    pub db: DbReport,
    pub timestamp: String,
}

/// Always answers 200; failures are reported in the body.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let has_database_url = state.config.has_database_url();

    let db = if !has_database_url {
        DbReport {
            connected: false,
            error: Some("Missing DATABASE_URL".to_string()),
        }
    } else {
        match state.notes.health_check().await {
            Ok(()) => DbReport {
                connected: true,
                error: None,
            },
            Err(e) => {
                warn!(
                    subsystem = "api",
                    component = "health",
                    error = %e,
                    "Database health check failed"
                );
                DbReport {
                    connected: false,
                    error: Some(e.to_string()),
                }
            }
        }
    };

    let status = if db.connected {
        HealthStatus::Ok
    } else {
        HealthStatus::Error
    };

    Json(HealthReport {
        status,
        env: EnvReport { has_database_url },
        db,
        timestamp: rfc3339(Utc::now()),
    })
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
