use crate::core::MatchEngine;
use crate::models::{AutoMatchRequest, ErrorResponse, HealthResponse};
use crate::services::BuddyStore;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: MatchEngine,
    pub store: Arc<dyn BuddyStore>,
    pub default_radius_miles: f64,
    pub max_radius_miles: f64,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/auto", web::post().to(create_auto_match));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Create an automatic buddy match
///
/// POST /api/v1/matches/auto
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "radiusMiles": 20.0
/// }
/// ```
///
/// Always responds 200 with a `MatchOutcome`; the engine never leaks internal
/// error detail past its fixed messages.
async fn create_auto_match(
    state: web::Data<AppState>,
    req: web::Json<AutoMatchRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for auto match request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Fill in the configured default, then cap to keep candidate queries bounded
    let radius_miles = req
        .radius_miles
        .unwrap_or(state.default_radius_miles)
        .min(state.max_radius_miles);

    tracing::info!(
        "Automatic match requested by user: {}, radius: {} miles",
        req.user_id,
        radius_miles
    );

    let outcome = state
        .engine
        .create_automatic_match(&req.user_id, radius_miles)
        .await;

    HttpResponse::Ok().json(outcome)
}
