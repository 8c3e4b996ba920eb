//! Report Download Route

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use pleural_engine::RawLabInput;
use std::sync::Arc;

use crate::export::{render_report, REPORT_FILE_NAME};
use crate::{ApiError, AppState};

/// Evaluate a submitted form and return the CSV report as an attachment
pub async fn download_report(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<RawLabInput>,
) -> Result<Response, ApiError> {
    let (intake, result) = super::run_evaluation(&state, &raw);
    let body = render_report(&intake.input, &result)?;
    counter!("pleural_reports_total").increment(1);

    let disposition = format!("attachment; filename=\"{}\"", REPORT_FILE_NAME);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
