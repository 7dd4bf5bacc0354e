use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use std::sync::Arc;

use crate::{
    error::AppError,
    models::AnalysisResult,
    services::{self, csv_loader},
    AppState,
};

const FILE_FIELD: &str = "file";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/analyze", post(analyze_dataset))
}

#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub data: Bytes,
}

async fn analyze_dataset(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let start = std::time::Instant::now();

    let upload = read_upload(&mut multipart).await?;
    tracing::info!(
        "Received upload {}, size: {}KB",
        upload.file_name,
        upload.data.len() / 1024
    );

    let result = analyze_upload(&state, &upload)?;
    tracing::info!("Request for {} completed in {:?}", upload.file_name, start.elapsed());

    Ok(Json(result))
}

// Other form fields are ignored.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        return Ok(Upload { file_name, data });
    }

    Err(AppError::InvalidInput("No file provided".to_string()))
}

/// Validates the upload, parses it and runs the analysis pipeline.
pub fn analyze_upload(state: &AppState, upload: &Upload) -> Result<AnalysisResult, AppError> {
    if !upload.file_name.to_lowercase().ends_with(".csv") {
        tracing::warn!("Unsupported file type: {}", upload.file_name);
        return Err(AppError::UnsupportedFile("Only CSV files are supported for now.".to_string()));
    }

    let df = csv_loader::read_csv(&upload.data)?;
    services::analyze_table(&df, state.narrator.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{ColumnType, NarrativeSummary, Profile};
    use crate::routes::app;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    const BOUNDARY: &str = "insight-test-boundary";

    fn test_state() -> AppState {
        AppState::new(Config::default())
    }

    /// Builds a multipart/form-data body from `(name, file name, content)` parts.
    fn multipart_request(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{}\r\n", BOUNDARY));
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: text/csv\r\n\r\n",
                    name, file_name
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));

        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(config: Config, request: Request<Body>) -> (StatusCode, Value) {
        let response = app(Arc::new(AppState::new(config)))
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn upload(name: &str, body: &'static [u8]) -> Upload {
        Upload {
            file_name: name.to_string(),
            data: Bytes::from_static(body),
        }
    }

    #[test]
    fn analyzes_csv_upload() {
        let result = analyze_upload(
            &test_state(),
            &upload("people.CSV", b"age,city\n25,NY\n30,LA\n,NY\n40,NY\n"),
        )
        .unwrap();

        assert_eq!(result.row_count, 4);
        assert_eq!(result.column_count, 2);
        assert_eq!(result.columns[0].column_type, ColumnType::Numeric);
        assert_eq!(result.columns[0].missing_pct, 0.25);
        assert_eq!(result.columns[1].column_type, ColumnType::Text);
    }

    #[test]
    fn rejects_non_csv_files() {
        let err = analyze_upload(&test_state(), &upload("book.xlsx", b"a,b\n1,2\n")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFile(_)));
        assert_eq!(err.to_string(), "Unsupported file: Only CSV files are supported for now.");
    }

    #[test]
    fn unparseable_csv_is_a_client_error() {
        let err = analyze_upload(&test_state(), &upload("empty.csv", b"")).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upload_ignores_other_form_fields() {
        let request = multipart_request(&[
            ("significantColumns", None, "age"),
            ("file", Some("people.csv"), "age,city\n25,NY\n30,LA\n,NY\n40,NY\n"),
            ("notes", None, "quarterly export"),
        ]);
        let (status, body) = send(Config::default(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["row_count"], 4);
        assert_eq!(body["column_count"], 2);
        assert_eq!(body["columns"][0]["name"], "age");
    }

    #[tokio::test]
    async fn upload_without_file_field_is_rejected() {
        let request = multipart_request(&[("significantColumns", None, "age")]);
        let (status, body) = send(Config::default(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "No file provided"}));
    }

    #[tokio::test]
    async fn upload_with_wrong_extension_is_rejected() {
        let request = multipart_request(&[("file", Some("book.xlsx"), "a,b\n1,2\n")]);
        let (status, body) = send(Config::default(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"error": "Only CSV files are supported for now."})
        );
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let config = Config {
            max_file_size: 64,
            ..Config::default()
        };
        let csv = "id,value\n".to_string() + "1,2\n".repeat(100).as_str();
        let request = multipart_request(&[("file", Some("big.csv"), csv.as_str())]);
        let (status, body) = send(config, request).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body["error"].is_string());
    }

    #[test]
    fn uses_the_injected_narrator() {
        let narrator = |profile: &Profile| NarrativeSummary {
            dataset_summary: format!("{} rows", profile.row_count),
            key_findings: Vec::new(),
            data_quality_issues: Vec::new(),
            next_questions: Vec::new(),
        };
        let state = AppState::with_narrator(Config::default(), Arc::new(narrator));

        let result = analyze_upload(&state, &upload("a.csv", b"x\n1\n2\n")).unwrap();
        assert_eq!(result.narrative.dataset_summary, "2 rows");
    }
}
