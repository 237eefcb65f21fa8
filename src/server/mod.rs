//! HTTP API: health, tracked leagues and per-fixture analysis.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::config::ModelConfig;
use crate::model::{self, MatchAnalysis};
use crate::odds_api::{leagues, OddsApiClient, OddsApiError};

#[derive(Clone)]
pub struct AppState {
    pub client: OddsApiClient,
    pub model: ModelConfig,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/leagues", get(list_leagues))
        .route("/api/analysis/:fixture_id", get(analyze_fixture))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_leagues() -> Json<&'static [leagues::League]> {
    Json(leagues::TRACKED_LEAGUES)
}

/// Full pipeline for one fixture: resolve it, pull history and quotes in
/// parallel, run the model.
async fn analyze_fixture(
    State(state): State<AppState>,
    Path(fixture_id): Path<String>,
) -> Result<Json<MatchAnalysis>, (StatusCode, String)> {
    let fixture = state
        .client
        .fetch_fixture(&fixture_id)
        .await
        .map_err(upstream_error)?;

    if !leagues::is_tracked(&fixture.league) {
        return Err((
            StatusCode::NOT_FOUND,
            format!("league '{}' is not tracked", fixture.league),
        ));
    }

    let (history, quotes) = tokio::try_join!(
        state
            .client
            .fetch_history(&fixture, state.model.recent_form_window),
        state.client.fetch_odds(&fixture_id),
    )
    .map_err(upstream_error)?;

    let analysis = model::analyze(&history, &quotes, &state.model);
    info!(
        "Analysed {} vs {}: {} opportunities across {} bookmakers",
        analysis.home_team,
        analysis.away_team,
        analysis.all_opportunities.len(),
        quotes.len()
    );
    Ok(Json(analysis))
}

fn upstream_error(err: OddsApiError) -> (StatusCode, String) {
    match err {
        OddsApiError::FixtureNotFound(id) => {
            (StatusCode::NOT_FOUND, format!("fixture '{}' not found", id))
        }
        other => {
            error!("Odds API failure: {}", other);
            (StatusCode::BAD_GATEWAY, other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_not_found_maps_to_404() {
        let (status, body) = upstream_error(OddsApiError::FixtureNotFound("fx-9".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("fx-9"));
    }

    #[test]
    fn other_upstream_failures_map_to_502() {
        let err = OddsApiError::Malformed("fixture payload".into());
        let (status, _) = upstream_error(err);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn leagues_endpoint_lists_the_whitelist() {
        let Json(list) = list_leagues().await;
        assert_eq!(list.len(), leagues::TRACKED_LEAGUES.len());
    }
}
