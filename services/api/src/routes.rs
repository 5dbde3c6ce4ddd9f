use crate::infra::AppState;
use crate::report::{assemble, HealthReport, ReportSnapshot};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use longevity_engine::config::EngineConfig;
use longevity_engine::error::AppError;
use longevity_engine::scoring::cardiology::{self, CardiologyInputs, CardiologyResult};
use longevity_engine::scoring::health_age::{health_age, HealthAgeInputs, HealthAgeResult};
use longevity_engine::scoring::metabolic::{classify, MetabolicInputs, MetabolicResult};
use longevity_engine::scoring::performance_age::{
    performance_age, PerformanceAgeInputs, PerformanceAgeResult,
};
use longevity_engine::scoring::phenoage::{phenotypic_age, PhenoAgeInputs, PhenoAgeResult};
use longevity_engine::scoring::physical::{assess, AssessmentFinding, PhysicalInputs};
use longevity_engine::scoring::toxins::{self, ToxinInputs, ToxinResult};
use longevity_engine::scoring::wellness::brain::{brain_health, BrainHealthInputs, BrainHealthResult};
use longevity_engine::scoring::wellness::connected::{
    be_connected, BeConnectedInputs, BeConnectedResult,
};
use longevity_engine::scoring::wellness::emotional::{
    mentally_emotionally_well, MentallyEmotionallyWellInputs, MentallyEmotionallyWellResult,
};
use longevity_engine::scoring::wellness::mindset::{
    longevity_mindset, LongevityMindsetInputs, LongevityMindsetResult,
};
use serde_json::json;

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/score/phenoage", post(phenoage_endpoint))
        .route("/api/v1/score/health-age", post(health_age_endpoint))
        .route(
            "/api/v1/score/performance-age",
            post(performance_age_endpoint),
        )
        .route("/api/v1/score/brain-health", post(brain_health_endpoint))
        .route(
            "/api/v1/score/longevity-mindset",
            post(longevity_mindset_endpoint),
        )
        .route(
            "/api/v1/score/emotional-wellbeing",
            post(emotional_wellbeing_endpoint),
        )
        .route("/api/v1/score/connectedness", post(connectedness_endpoint))
        .route("/api/v1/score/cardiology", post(cardiology_endpoint))
        .route("/api/v1/score/metabolic", post(metabolic_endpoint))
        .route("/api/v1/score/toxins", post(toxins_endpoint))
        .route("/api/v1/score/physical", post(physical_endpoint))
        .route("/api/v1/report", post(report_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn phenoage_endpoint(
    Json(inputs): Json<PhenoAgeInputs>,
) -> Result<Json<PhenoAgeResult>, AppError> {
    Ok(Json(phenotypic_age(&inputs)?))
}

pub(crate) async fn health_age_endpoint(
    Json(inputs): Json<HealthAgeInputs>,
) -> Result<Json<HealthAgeResult>, AppError> {
    Ok(Json(health_age(&inputs)?))
}

pub(crate) async fn performance_age_endpoint(
    Json(inputs): Json<PerformanceAgeInputs>,
) -> Result<Json<PerformanceAgeResult>, AppError> {
    Ok(Json(performance_age(&inputs)?))
}

pub(crate) async fn brain_health_endpoint(
    Extension(engine): Extension<EngineConfig>,
    Json(inputs): Json<BrainHealthInputs>,
) -> Json<BrainHealthResult> {
    Json(brain_health(&inputs, engine.trend_delta))
}

pub(crate) async fn longevity_mindset_endpoint(
    Extension(engine): Extension<EngineConfig>,
    Json(inputs): Json<LongevityMindsetInputs>,
) -> Json<LongevityMindsetResult> {
    Json(longevity_mindset(&inputs, engine.trend_delta))
}

pub(crate) async fn emotional_wellbeing_endpoint(
    Extension(engine): Extension<EngineConfig>,
    Json(inputs): Json<MentallyEmotionallyWellInputs>,
) -> Json<MentallyEmotionallyWellResult> {
    Json(mentally_emotionally_well(&inputs, engine.trend_delta))
}

pub(crate) async fn connectedness_endpoint(
    Extension(engine): Extension<EngineConfig>,
    Json(inputs): Json<BeConnectedInputs>,
) -> Json<BeConnectedResult> {
    Json(be_connected(&inputs, engine.trend_delta))
}

pub(crate) async fn cardiology_endpoint(
    Extension(engine): Extension<EngineConfig>,
    Json(inputs): Json<CardiologyInputs>,
) -> Json<CardiologyResult> {
    Json(cardiology::evaluate(engine.cardiology_model, &inputs))
}

pub(crate) async fn metabolic_endpoint(
    Json(inputs): Json<MetabolicInputs>,
) -> Result<Json<MetabolicResult>, AppError> {
    Ok(Json(classify(&inputs)?))
}

pub(crate) async fn toxins_endpoint(Json(inputs): Json<ToxinInputs>) -> Json<ToxinResult> {
    Json(toxins::evaluate(&inputs))
}

pub(crate) async fn physical_endpoint(
    Json(inputs): Json<PhysicalInputs>,
) -> Json<Vec<AssessmentFinding>> {
    Json(assess(&inputs))
}

pub(crate) async fn report_endpoint(
    Extension(engine): Extension<EngineConfig>,
    Json(snapshot): Json<ReportSnapshot>,
) -> Result<Json<HealthReport>, AppError> {
    Ok(Json(assemble(&engine, snapshot)?))
}
