// ============================================================
// Layer 7 — HTTP Server (axum)
// ============================================================
// Exposes the prediction service over HTTP:
//
//   GET  /         → {"status":"ok","message":"Student ML API is running"}
//   POST /predict  → {"prediction":0|1,"label":"PASS"|"FAIL"}
//
// Error contract, body is always {"detail": "..."}:
//   422  the request body is not a JSON object with the four
//        numeric keys (client error)
//   503  no usable model is loaded (server error)
//
// The service is loaded before the listener binds and is never
// mutated afterwards, so handlers share it through an Arc with
// no lock.
//
// Reference: axum crate documentation

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::domain::record::{PredictionRequest, PredictionResponse};
use crate::ml::predictor::PredictionService;

// ─── State ────────────────────────────────────────────────────────────────────

/// Shared handler state.
pub struct AppState {
    predictor: Option<PredictionService>,
}

impl AppState {
    pub fn ready(predictor: PredictionService) -> Self {
        Self { predictor: Some(predictor) }
    }

    /// State with no model; every prediction answers 503. `serve` never
    /// builds one, since it refuses to start without an artifact.
    #[cfg(test)]
    pub fn unavailable() -> Self {
        Self { predictor: None }
    }
}

// ─── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Unavailable(String),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unavailable(_)   => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { detail: self.to_string() })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

// ─── Router ───────────────────────────────────────────────────────────────────

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/predict", post(predict))
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status:  &'static str,
    message: &'static str,
}

async fn root() -> Json<Health> {
    Json(Health { status: "ok", message: "Student ML API is running" })
}

async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(request) = body?;
    let predictor = state
        .predictor
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("Model is not loaded. Run: student-performance train".into()))?;

    let response = predictor.predict(&request);
    tracing::debug!(
        "predict attendance={} study_hours={} previous_marks={} assignments={} -> {}",
        request.attendance,
        request.study_hours,
        request.previous_marks,
        request.assignments,
        response.label
    );
    Ok(Json(response))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::infra::artifact_store::ModelArtifact;
    use crate::ml::trainer::{tests::separable_set, train, TrainConfig};

    fn app() -> Router {
        let model   = train(&separable_set(), &TrainConfig::default()).unwrap();
        let service = PredictionService::from_artifact(ModelArtifact::new(model, TrainConfig::default())).unwrap();
        build_router(Arc::new(AppState::ready(service)))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_reports_running() {
        let req  = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "Student ML API is running");
    }

    #[tokio::test]
    async fn test_predict_strong_student_passes() {
        let req  = post_json(r#"{"attendance":92,"study_hours":5,"previous_marks":88,"assignments":95}"#);
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body, serde_json::json!({"prediction": 1, "label": "PASS"}));
    }

    #[tokio::test]
    async fn test_missing_field_is_422() {
        let req  = post_json(r#"{"attendance":92,"study_hours":5,"previous_marks":88}"#);
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(resp).await;
        assert!(body["detail"].as_str().unwrap().contains("assignments"));
    }

    #[tokio::test]
    async fn test_wrong_type_is_422() {
        let req  = post_json(r#"{"attendance":"high","study_hours":5,"previous_marks":88,"assignments":95}"#);
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_json_is_422() {
        let resp = app().oneshot(post_json("{not json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json_body(resp).await["detail"].is_string());
    }

    #[tokio::test]
    async fn test_no_model_is_503() {
        let app  = build_router(Arc::new(AppState::unavailable()));
        let req  = post_json(r#"{"attendance":92,"study_hours":5,"previous_marks":88,"assignments":95}"#);
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(resp).await;
        assert!(body["detail"].as_str().unwrap().contains("student-performance train"));
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(ApiError::Unprocessable("x".into()).status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::Unavailable("x".into()).status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
