//! HTTP API for the Parking Engine.
//!
//! This module exposes a minimal REST API around a single
//! [`ParkingFacility`] using the [`axum`](https://crates.io/crates/axum)
//! framework.  Admission and release take the facility's write lock so
//! every mutation is exclusive; the roster, quotes and report only read.
//! Each request samples the clock once, before locking, and hands that
//! instant to the facility.

use crate::config::FacilityConfig;
use crate::error::{AdmissionError, ReleaseError};
use crate::facility::ParkingFacility;
use crate::models::{Report, VehicleClass, VehicleRecord};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::info;

/// Application state shared across requests.
pub struct AppState {
    pub facility: RwLock<ParkingFacility>,
}

impl AppState {
    pub fn new(facility: ParkingFacility) -> Arc<Self> {
        Arc::new(Self {
            facility: RwLock::new(facility),
        })
    }
}

/// Body of `POST /api/vehicles`.  A missing check-in time means "now".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub plate: String,
    pub vehicle_class: VehicleClass,
    #[serde(default)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub discount_card_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    #[serde(flatten)]
    pub report: Report,
    pub occupancy: usize,
    pub capacity: usize,
}

/// Build the API router around `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/vehicles", post(check_in_handler).get(list_handler))
        .route("/api/vehicles/:plate", delete(check_out_handler))
        .route("/api/vehicles/:plate/quote", get(quote_handler))
        .route("/api/quotes", get(quotes_handler))
        .route("/api/report", get(report_handler))
        .with_state(state)
}

fn error_response(status: StatusCode, reason: &str, message: String) -> Response {
    let body = Json(serde_json::json!({"error": message, "reason": reason}));
    (status, body).into_response()
}

impl IntoResponse for AdmissionError {
    fn into_response(self) -> Response {
        error_response(StatusCode::CONFLICT, self.reason(), self.to_string())
    }
}

impl IntoResponse for ReleaseError {
    fn into_response(self) -> Response {
        error_response(StatusCode::NOT_FOUND, self.reason(), self.to_string())
    }
}

/// Handler for POST /api/vehicles
async fn check_in_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<CheckInRequest>,
) -> Response {
    let check_in_time = request.check_in_time.unwrap_or_else(Utc::now);
    let record = VehicleRecord::new(
        request.plate,
        request.vehicle_class,
        check_in_time,
        request.discount_card_id,
    );
    let mut facility = app_state.facility.write().await;
    match facility.admit(record.clone()) {
        Ok(()) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Handler for GET /api/vehicles
async fn list_handler(State(app_state): State<Arc<AppState>>) -> Response {
    let facility = app_state.facility.read().await;
    Json(facility.list_parked()).into_response()
}

/// Handler for DELETE /api/vehicles/:plate
async fn check_out_handler(
    State(app_state): State<Arc<AppState>>,
    Path(plate): Path<String>,
) -> Response {
    let now = Utc::now();
    let mut facility = app_state.facility.write().await;
    match facility.release(&plate, now) {
        Ok(checkout) => Json(checkout).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Handler for GET /api/vehicles/:plate/quote
async fn quote_handler(
    State(app_state): State<Arc<AppState>>,
    Path(plate): Path<String>,
) -> Response {
    let now = Utc::now();
    let facility = app_state.facility.read().await;
    match facility.quote(&plate, now) {
        Ok(quote) => Json(quote).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Handler for GET /api/quotes
async fn quotes_handler(State(app_state): State<Arc<AppState>>) -> Response {
    let now = Utc::now();
    let facility = app_state.facility.read().await;
    Json(facility.quote_all(now)).into_response()
}

/// Handler for GET /api/report
async fn report_handler(State(app_state): State<Arc<AppState>>) -> Response {
    let facility = app_state.facility.read().await;
    Json(ReportResponse {
        report: facility.report(),
        occupancy: facility.occupancy(),
        capacity: facility.capacity(),
    })
    .into_response()
}

/// Launch the API server.  This builds a facility from `config` and
/// serves it on `config.bind_addr` until the server terminates.
pub async fn serve(config: FacilityConfig) -> Result<()> {
    let facility = ParkingFacility::new(config.capacity).context("invalid facility configuration")?;
    let router = build_router(AppState::new(facility));
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, capacity = config.capacity, "parking server listening");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn state(capacity: usize) -> Arc<AppState> {
        AppState::new(ParkingFacility::new(capacity).unwrap())
    }

    fn check_in(plate: &str, class: VehicleClass, minutes_ago: i64, card: Option<&str>) -> Json<CheckInRequest> {
        Json(CheckInRequest {
            plate: plate.into(),
            vehicle_class: class,
            check_in_time: Some(Utc::now() - Duration::minutes(minutes_ago)),
            discount_card_id: card.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_check_in_and_out() {
        let app = state(2);
        let response = check_in_handler(
            State(app.clone()),
            check_in("DD111DD", VehicleClass::Bus, 198, None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = quote_handler(State(app.clone()), Path("DD111DD".into())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = check_out_handler(State(app.clone()), Path("DD111DD".into())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let facility = app.facility.read().await;
        assert_eq!(facility.report().visit_count, 1);
        assert_eq!(facility.report().total_earnings, 60);
    }

    #[tokio::test]
    async fn test_rejections_map_to_status_codes() {
        let app = state(1);
        let response = check_in_handler(
            State(app.clone()),
            check_in("AA111AA", VehicleClass::Car, 5, None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = check_in_handler(
            State(app.clone()),
            check_in("BB111BB", VehicleClass::Car, 5, None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = check_out_handler(State(app.clone()), Path("ZZ999ZZ".into())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = quote_handler(State(app.clone()), Path("ZZ999ZZ".into())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let facility = app.facility.read().await;
        assert_eq!(facility.occupancy(), 1);
        assert_eq!(facility.report(), Report::default());
    }

    #[tokio::test]
    async fn test_read_endpoints() {
        let app = state(3);
        check_in_handler(State(app.clone()), check_in("AA111AA", VehicleClass::Car, 10, Some("CARD"))).await;
        assert_eq!(list_handler(State(app.clone())).await.status(), StatusCode::OK);
        assert_eq!(quotes_handler(State(app.clone())).await.status(), StatusCode::OK);
        assert_eq!(report_handler(State(app.clone())).await.status(), StatusCode::OK);
    }

    #[test]
    fn test_check_in_request_defaults() {
        let request: CheckInRequest =
            serde_json::from_str(r#"{"plate": "AA111AA", "vehicle_class": "car"}"#).unwrap();
        assert!(request.check_in_time.is_none());
        assert!(request.discount_card_id.is_none());
    }
}
