//! Pleural Work-up API Server
//!
//! HTTP front end for the rule engine: form evaluation, CSV report download,
//! health and metrics.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use lab_validator::Normalizer;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use pleural_engine::RuleEngine;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod export;
mod routes;
mod settings;

pub use error::ApiError;
pub use export::{render_report, REPORT_FILE_NAME};
pub use settings::{AppConfig, LogFormat, ServerConfig};

/// Application state shared across handlers
pub struct AppState {
    pub engine: RuleEngine,
    pub normalizer: Normalizer,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus renderer, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: &AppConfig) -> Self {
        Self {
            engine: RuleEngine::new(config.engine.clone()),
            normalizer: Normalizer::new(config.validation.clone()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub spg_trigger: bool,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/evaluate", post(routes::evaluate::evaluate))
        .route("/api/v1/report", post(routes::report::download_report))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        spg_trigger: state.engine.config().spg_trigger,
    })
}

/// Prometheus scrape handler
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed".to_string()),
    }
}

/// Initialize logging
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), ApiError> {
    let level: Level = level
        .parse()
        .map_err(|_| ApiError::LogLevel(level.to_string()))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    match format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }
    Ok(())
}

/// Run the server
pub async fn run_server(config: AppConfig) -> Result<(), ApiError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    let state = Arc::new(AppState::new(&config).with_metrics(handle));
    let app = create_router(state);

    info!("Starting API server on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(Arc::new(AppState::new(&AppConfig::default())))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["spg_trigger"], false);
    }

    #[tokio::test]
    async fn test_evaluate_exudate_with_alerts() {
        let payload = json!({
            "values": {
                "serum_protein": "6.5",
                "pf_protein": "3.2",
                "serum_ldh": 200,
                "serum_ldh_uln": 250,
                "pf_ldh": 300,
                "pf_ph": "7.10",
                "pf_triglycerides": 150
            },
            "rapid": {
                "renal_impairment": "yes",
                "age_over_70": "yes",
                "purulence": "yes",
                "hospital_acquired": "yes",
                "low_serum_albumin": "yes"
            }
        });
        let response = app().oneshot(post_json("/api/v1/evaluate", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["classification"], "exudate");
        assert_eq!(body["exudate"], true);
        assert_eq!(body["pseudo_exudate"], false);
        assert_eq!(body["alerts"][0]["code"], "low_ph");
        assert_eq!(body["alerts"][1]["code"], "chylothorax");
        assert_eq!(body["rapid"]["score"], 5);
        assert_eq!(body["rapid"]["band"], "high");

        let codes: Vec<&str> = body["recommendations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, vec!["exudate_workup", "chylothorax_workup", "early_surgical_review"]);
    }

    #[tokio::test]
    async fn test_evaluate_reports_diagnostics_and_unknown() {
        let payload = json!({
            "values": {"serum_protein": "six", "pf_ph": 12.0}
        });
        let response = app().oneshot(post_json("/api/v1/evaluate", payload)).await.unwrap();
        let body = body_json(response).await;

        assert_eq!(body["classification"], "unknown");
        assert_eq!(body["exudate"], Value::Null);
        assert_eq!(body["diagnostics"].as_array().unwrap().len(), 2);
        assert_eq!(body["diagnostics"][0]["field"], "serum_protein");
        assert_eq!(body["diagnostics"][1]["field"], "pf_ph");
        assert_eq!(body["input"]["pf_ph"], Value::Null);
        assert!(body["alerts"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_accepts_null_and_unknown_keys() {
        let payload = json!({
            "values": {
                "serum_protein": "6.5",
                "pf_protein": null,
                "pf_ph": null,
                "pf_amylase": "120"
            }
        });
        let response = app().oneshot(post_json("/api/v1/evaluate", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["classification"], "unknown");
        assert_eq!(body["input"]["serum_protein"], 6.5);
        assert_eq!(body["input"]["pf_protein"], Value::Null);
        assert!(body["diagnostics"].as_array().unwrap().is_empty());
        assert_eq!(body["ignored_fields"], json!(["pf_amylase"]));
    }

    #[tokio::test]
    async fn test_evaluate_links_references() {
        let payload = json!({
            "values": {
                "serum_protein": 6.5,
                "pf_protein": 3.2,
                "serum_ldh": 200,
                "serum_ldh_uln": 250,
                "pf_ldh": 300,
                "serum_albumin": 4.5,
                "pf_albumin": 3.2
            }
        });
        let response = app().oneshot(post_json("/api/v1/evaluate", payload)).await.unwrap();
        let body = body_json(response).await;

        assert_eq!(
            body["classification_reference"]["url"],
            "https://pubmed.ncbi.nlm.nih.gov/4642731/"
        );
        assert_eq!(
            body["pseudo_exudate_reference"]["url"],
            "https://pubmed.ncbi.nlm.nih.gov/2152757/"
        );
        assert_eq!(body["recommendations"][0]["code"], "treat_underlying_disease");
        assert_eq!(
            body["recommendations"][0]["reference"]["citation"],
            "Roth BJ et al. 1990, Chest"
        );
        assert_eq!(
            body["rapid"]["reference"]["url"],
            "https://pubmed.ncbi.nlm.nih.gov/24264558/"
        );
    }

    #[tokio::test]
    async fn test_report_download() {
        let payload = json!({"values": {"pf_ph": "7.1"}, "beta2_transferrin": "positive"});
        let response = app().oneshot(post_json("/api/v1/report", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"pleural_workup_report.csv\""
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(csv.starts_with("Parameter,Value\nExudate?,Unknown\n"));
        assert!(csv.contains("Beta-2 transferrin,Positive\n"));
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let response = app()
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_log_level() {
        assert!(matches!(
            init_logging("loud", LogFormat::Json),
            Err(ApiError::LogLevel(_))
        ));
    }
}
