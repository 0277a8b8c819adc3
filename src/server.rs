//! REST API server

use std::fmt::Write as _;
use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info, warn};

use crate::classifier::ModelSummary;
use crate::context::AppContext;
use crate::engine::{RecommendError, RecommendationEngine, RecommendationResult};
use crate::reference::{FertilizerAdvice, SoilType};

const CLIENT_SCRIPT: &str = include_str!("../static/js/main.js");

#[derive(Clone)]
struct ApiState {
    engine: RecommendationEngine,
}

/// `soil` stays untyped so a non-string value is reported as an invalid
/// soil rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
struct SoilRequest {
    soil: Option<Value>,
}

impl SoilRequest {
    fn soil_id(&self) -> &str {
        self.soil.as_ref().and_then(Value::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
    version: &'static str,
    model: ModelSummary,
}

#[derive(Debug, Serialize)]
struct SoilInfo {
    name: SoilType,
    description: &'static str,
    fertilizer: FertilizerAdvice,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(error: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
        }
    }
}

impl From<RecommendError> for ApiError {
    fn from(value: RecommendError) -> Self {
        match &value {
            RecommendError::InvalidSoilType(source) => {
                warn!("rejected soil type: {source}");
                Self::bad_request(value.to_string())
            }
            RecommendError::Internal(source) => {
                error!("error in recommend_crops: {source:#}");
                Self::internal(&value)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

pub fn build_router(engine: RecommendationEngine) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/static/js/main.js", get(client_script))
        .route("/api/health", get(health))
        .route("/api/soils", get(soils))
        .route("/api/soil-to-crops", post(soil_to_crops))
        .layer(cors)
        .with_state(ApiState { engine })
}

pub async fn run_server(context: AppContext, bind: SocketAddr) -> Result<()> {
    let app = build_router(context.engine);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("soil advisor listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index(State(state): State<ApiState>) -> Html<String> {
    Html(render_landing_page(&state.engine))
}

async fn client_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        CLIENT_SCRIPT,
    )
}

async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
        model: state.engine.model_summary(),
    })
}

async fn soils(State(state): State<ApiState>) -> Json<Vec<SoilInfo>> {
    let reference = state.engine.reference();
    Json(
        reference
            .soils()
            .map(|soil| SoilInfo {
                name: soil,
                description: soil.description(),
                fertilizer: reference.soil_advice(soil),
            })
            .collect(),
    )
}

async fn soil_to_crops(
    State(state): State<ApiState>,
    payload: std::result::Result<Json<SoilRequest>, JsonRejection>,
) -> std::result::Result<Json<RecommendationResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("malformed recommendation request: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    })?;
    let soil = request.soil_id();
    debug!("received request for soil: {soil}");

    let result = state.engine.recommend(soil)?;
    debug!(
        soil = %result.soil,
        crops = result.recommended_crops.len(),
        "returning recommendations"
    );
    Ok(Json(result))
}

fn render_landing_page(engine: &RecommendationEngine) -> String {
    let mut options = String::new();
    let mut items = String::new();
    for soil in engine.reference().soils() {
        let _ = writeln!(
            options,
            "          <option value=\"{soil}\" data-description=\"{}\">{soil} Soil</option>",
            soil.description()
        );
        let _ = writeln!(
            items,
            "        <li><h3>{soil} Soil</h3><p>{}</p></li>",
            soil.description()
        );
    }
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Soil to Crop Recommendations</title>
    <style>
      body {{ font-family: sans-serif; max-width: 60rem; margin: 0 auto; padding: 1rem; }}
      .hidden {{ display: none; }}
      #errorMessage {{ color: #b00020; }}
      #cropResults {{ list-style: none; padding: 0; display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1rem; }}
      .crop-card {{ border: 1px solid #ccc; border-radius: 0.5rem; padding: 0.75rem; }}
      .score-bar {{ background: #eee; border-radius: 0.25rem; }}
      .score-fill {{ background: #7e57c2; color: #fff; padding: 0 0.25rem; border-radius: 0.25rem; }}
      .score-fill.high {{ background: #00897b; }}
    </style>
  </head>
  <body>
    <h1>Soil to Crop Recommendations</h1>
    <form id="soilForm">
      <label for="soilSelect">Soil type</label>
      <select id="soilSelect" name="soil">
          <option value="">Select a soil type</option>
{options}      </select>
      <button type="submit">Recommend crops</button>
    </form>
    <p id="soilDescription" class="hidden"></p>
    <p id="loadingSpinner" class="hidden">Loading recommendations...</p>
    <p id="errorMessage" class="hidden"></p>
    <section id="resultsContainer" class="hidden">
      <div id="soilFertilizer"></div>
      <ul id="cropResults"></ul>
    </section>
    <section>
      <h2>Soil types</h2>
      <ul id="soilList">
{items}      </ul>
    </section>
    <script src="/static/js/main.js"></script>
  </body>
</html>
"#
    )
}
