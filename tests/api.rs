use std::sync::Arc;

use anyhow::anyhow;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use rand::RngCore;
use serde_json::{json, Value};
use soil_advisor::classifier::{CropPredictor, ModelSummary};
use soil_advisor::config::Config;
use soil_advisor::context::AppContext;
use soil_advisor::engine::RecommendationEngine;
use soil_advisor::reference::{CropLabel, ReferenceData, SoilType};
use soil_advisor::server::build_router;
use tower::ServiceExt;

fn test_router() -> axum::Router {
    let mut config = Config::default();
    config.engine.training_seed = Some(42);
    let context = AppContext::initialize(config).expect("context should initialize");
    build_router(context.engine)
}

async fn send(app: axum::Router, method: &str, path: &str, body: Option<Body>) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .uri(path)
        .method(method)
        .header("content-type", "application/json")
        .body(body.unwrap_or_else(Body::empty))
        .expect("request should build");
    let response = app.oneshot(request).await.expect("router should respond");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, bytes.to_vec())
}

async fn post_json(app: axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
    let payload = Body::from(serde_json::to_vec(&body).expect("serialize body"));
    let (status, bytes) = send(app, "POST", path, Some(payload)).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn crop_names(body: &Value) -> Vec<String> {
    body["recommended_crops"]
        .as_array()
        .expect("recommended_crops should be an array")
        .iter()
        .map(|crop| crop["name"].as_str().expect("crop name").to_string())
        .collect()
}

#[tokio::test]
async fn recommends_crops_for_alluvial_soil() {
    let (status, body) =
        post_json(test_router(), "/api/soil-to-crops", json!({ "soil": "Alluvial" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["soil"], "Alluvial");
    assert_eq!(
        body["soil_description"],
        "Rich in nutrients, formed by river deposits, ideal for agriculture"
    );
    assert_eq!(
        body["soil_fertilizer"],
        json!({
            "organic": "Cow dung compost and vermicompost",
            "homemade": "Banana peel and kitchen waste compost"
        })
    );
    let names = crop_names(&body);
    for expected in [
        "Rice", "Wheat", "Sugarcane", "Maize", "Cotton", "Jute", "Pulses", "Oilseeds",
    ] {
        assert!(names.iter().any(|n| n == expected), "{expected} missing");
    }
    let rice = body["recommended_crops"]
        .as_array()
        .and_then(|crops| crops.iter().find(|c| c["name"] == "Rice"))
        .expect("rice entry");
    assert_eq!(
        rice["fertilizer"]["organic"],
        "Cow dung compost and azolla biofertilizer"
    );
}

#[tokio::test]
async fn saline_scores_salt_tolerant_rice_in_top_tier() {
    let (status, body) =
        post_json(test_router(), "/api/soil-to-crops", json!({ "soil": "Saline" })).await;

    assert_eq!(status, StatusCode::OK);
    let rice = body["recommended_crops"]
        .as_array()
        .and_then(|crops| crops.iter().find(|c| c["name"] == "Salt-tolerant Rice"))
        .expect("salt-tolerant rice entry");
    let score = rice["score"].as_u64().expect("integer score");
    assert!((100..=150).contains(&score));
}

#[tokio::test]
async fn unknown_soil_is_a_client_error() {
    let (status, body) =
        post_json(test_router(), "/api/soil-to-crops", json!({ "soil": "Volcanic" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid soil type" }));
}

#[tokio::test]
async fn missing_soil_field_is_a_client_error() {
    let (status, body) = post_json(test_router(), "/api/soil-to-crops", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid soil type");
}

#[tokio::test]
async fn non_string_soil_is_an_invalid_soil_type() {
    for soil in [json!(5), json!(["Alluvial"]), json!({ "name": "Red" }), Value::Null] {
        let (status, body) =
            post_json(test_router(), "/api/soil-to-crops", json!({ "soil": soil })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "soil {soil}");
        assert_eq!(body, json!({ "error": "Invalid soil type" }), "soil {soil}");
    }
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    for raw in ["{not json", "null", "42", "\"Alluvial\""] {
        let (status, bytes) = send(
            test_router(),
            "POST",
            "/api/soil-to-crops",
            Some(Body::from(raw)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {raw}");
        let body: Value = serde_json::from_slice(&bytes).expect("json error body");
        assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
        assert_ne!(body["error"], "Invalid soil type", "body {raw}");
    }
}

struct FailingPredictor;

impl CropPredictor for FailingPredictor {
    fn predict(&self, _soil: SoilType, _rng: &mut dyn RngCore) -> anyhow::Result<CropLabel> {
        Err(anyhow!("classifier exploded"))
    }

    fn summary(&self) -> ModelSummary {
        ModelSummary {
            members: 0,
            samples: 0,
            trained_at: Utc::now(),
        }
    }
}

#[tokio::test]
async fn classifier_failure_is_a_server_error() {
    let engine = RecommendationEngine::new(
        Arc::new(ReferenceData::builtin()),
        Arc::new(FailingPredictor),
        10,
    );
    let (status, body) =
        post_json(build_router(engine), "/api/soil-to-crops", json!({ "soil": "Red" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "classifier exploded" }));
}

#[tokio::test]
async fn lists_soils_and_reports_health() {
    let app = test_router();

    let (status, bytes) = send(app.clone(), "GET", "/api/soils", None).await;
    assert_eq!(status, StatusCode::OK);
    let soils: Value = serde_json::from_slice(&bytes).expect("soils json");
    let soils = soils.as_array().expect("soil array");
    assert_eq!(soils.len(), 8);
    assert_eq!(soils[7]["name"], "Saline");

    let (status, bytes) = send(app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_slice(&bytes).expect("health json");
    assert_eq!(health["ok"], true);
    assert_eq!(health["model"]["members"], 100);
}

#[tokio::test]
async fn landing_page_lists_soil_descriptions() {
    let (status, bytes) = send(test_router(), "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(bytes).expect("utf-8 page");
    assert!(page.contains(r#"<select id="soilSelect""#));
    assert!(page.contains(r#"<script src="/static/js/main.js"></script>"#));
    for soil in SoilType::ALL {
        assert!(page.contains(soil.description()), "{soil} description missing");
    }
}

#[tokio::test]
async fn serves_client_script() {
    let (status, bytes) = send(test_router(), "GET", "/static/js/main.js", None).await;
    assert_eq!(status, StatusCode::OK);
    let script = String::from_utf8(bytes).expect("utf-8 script");
    assert!(script.contains("/api/soil-to-crops"));
    assert!(script.contains("recommended_crops"));
    assert!(script.contains("soil_fertilizer"));
}
