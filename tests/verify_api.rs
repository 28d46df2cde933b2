//! End-to-end tests for the /verify endpoint: real router, real classifier
//! artifacts, stubbed OCR and language-model backends.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use veracity::api;
use veracity::app_state::AppState;
use veracity::classifier::Classifier;
use veracity::readers::{OcrEngine, ReadError};
use veracity::verifier::{LlmError, NarrativeModel, Verifier};

const BOUNDARY: &str = "------------------------veracitytest";
const STUB_NARRATIVE: &str = "Assessment: the reported facts are consistent with official statements.";

struct StubModel;

#[async_trait]
impl NarrativeModel for StubModel {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        Ok(STUB_NARRATIVE.to_string())
    }
}

struct StubOcr(&'static str);

#[async_trait]
impl OcrEngine for StubOcr {
    async fn image_to_text(&self, _bytes: &[u8], _mime: &str) -> Result<String, ReadError> {
        Ok(self.0.to_string())
    }
}

fn app() -> Router {
    app_with_ocr("")
}

fn app_with_ocr(ocr_text: &'static str) -> Router {
    let state = AppState {
        classifier: Arc::new(Classifier::load("model").unwrap()),
        ocr: Arc::new(StubOcr(ocr_text)),
        verifier: Arc::new(Verifier::new(Arc::new(StubModel), None)),
    };
    api::router(state)
}

/// Hand-built multipart body with text fields only.
fn text_fields_body(fields: &[(&str, &str)]) -> Body {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    Body::from(body)
}

fn file_body(filename: &str, content_type: &str, bytes: &[u8]) -> Body {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    Body::from(body)
}

/// Build a minimal single-page PDF with uncompressed literal text, one `Tj`
/// per line. Object offsets are computed while assembling so the xref table
/// is always valid.
fn minimal_pdf(lines: &[&str]) -> Vec<u8> {
    let mut content = String::from("BT /F1 12 Tf 14 TL 72 720 Td\n");
    for line in lines {
        content.push_str(&format!("({line}) Tj T*\n"));
    }
    content.push_str("ET");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_start = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        )
        .as_bytes(),
    );
    pdf
}

fn verify_request(body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/verify")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn long_article() -> String {
    "City officials confirmed on Monday that the water treatment plant passed \
     its annual inspection. Repairs to the intake valves were completed ahead \
     of schedule, and service interruptions are not expected this quarter."
        .to_string()
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "loaded");
}

#[tokio::test]
async fn raw_text_verification_succeeds() {
    let article = long_article();
    let response = app()
        .oneshot(verify_request(text_fields_body(&[("text", &article)])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let label = body["model_prediction"].as_str().unwrap();
    assert!(label == "Real" || label == "Fake");

    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));

    let narrative = body["verification_result"].as_str().unwrap();
    assert!(narrative.starts_with(STUB_NARRATIVE));
    assert!(narrative.contains("VERIFICATION PROCESS:"));

    // Short input: the echo is the full text, no ellipsis.
    assert_eq!(body["extracted_text"].as_str().unwrap(), article);

    assert_eq!(body["metadata"]["title"], "");
    assert_eq!(body["metadata"]["source_domain"], "");
}

#[tokio::test]
async fn long_text_echo_is_truncated() {
    let article = "A sentence about the annual budget review process. ".repeat(20);
    let response = app()
        .oneshot(verify_request(text_fields_body(&[("text", &article)])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let echoed = body["extracted_text"].as_str().unwrap();
    assert!(echoed.ends_with("..."));
    assert_eq!(echoed.chars().count(), 503);
    assert!(article.starts_with(echoed.trim_end_matches("...")));
}

#[tokio::test]
async fn short_text_is_rejected() {
    let response = app()
        .oneshot(verify_request(text_fields_body(&[("text", "Short")])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("sufficient text")
    );
}

#[tokio::test]
async fn unreachable_url_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/gone", mock_server.uri());
    let response = app()
        .oneshot(verify_request(text_fields_body(&[("url", &url)])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Error accessing the URL")
    );
}

#[tokio::test]
async fn url_extraction_carries_metadata() {
    let fixture = std::fs::read_to_string("src/extractor/tests/fixtures/article.html").unwrap();

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news/quake-relief"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(fixture.into_bytes())
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/news/quake-relief", mock_server.uri());
    let response = app()
        .oneshot(verify_request(text_fields_body(&[("url", &url)])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["metadata"]["title"], "Quake Relief Effort Expands");
    assert_eq!(body["metadata"]["author"], "Jane Doe");
    assert_eq!(body["metadata"]["source_domain"], "127.0.0.1");
    assert_eq!(body["metadata"]["source_url"], url);
    assert!(!body["extracted_text"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn image_upload_runs_through_ocr() {
    let ocr_text = "Headline recognized from the screenshot. The council approved \
                    the new transit plan after a lengthy public comment session.";
    let response = app_with_ocr(ocr_text)
        .oneshot(verify_request(file_body(
            "shot.png",
            "image/png",
            &[0x89, 0x50, 0x4E, 0x47],
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["extracted_text"].as_str().unwrap(), ocr_text);
    assert_eq!(body["metadata"]["title"], "");
}

#[tokio::test]
async fn pdf_upload_extracts_text_end_to_end() {
    let lines = [
        "The transit authority confirmed the new schedule on Monday.",
        "Off-peak service will run every twenty minutes starting in May.",
        "Riders can review the full timetable at station kiosks this week.",
    ];

    let response = app()
        .oneshot(verify_request(file_body(
            "notice.pdf",
            "application/pdf",
            &minimal_pdf(&lines),
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let echoed = body["extracted_text"].as_str().unwrap();
    assert!(echoed.contains("transit authority"));
    assert!(echoed.contains("station kiosks"));
    // Around 190 chars of text: echoed in full, no ellipsis marker.
    assert!(!echoed.ends_with("..."));
    assert!(echoed.chars().count() < 500);

    let label = body["model_prediction"].as_str().unwrap();
    assert!(label == "Real" || label == "Fake");
    assert_eq!(body["metadata"]["title"], "");
}

#[tokio::test]
async fn unsupported_upload_type_is_rejected() {
    let response = app()
        .oneshot(verify_request(file_body(
            "archive.zip",
            "application/zip",
            b"PK\x03\x04",
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["error"].as_str().unwrap(),
        "Unsupported file type: application/zip"
    );
}

#[tokio::test]
async fn oversize_upload_is_rejected() {
    let oversized = vec![b'a'; 10 * 1024 * 1024 + 1];
    let response = app()
        .oneshot(verify_request(file_body("big.png", "image/png", &oversized)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("too large"));
}

#[tokio::test]
async fn multiple_channels_are_rejected() {
    let response = app()
        .oneshot(verify_request(text_fields_body(&[
            ("url", "https://example.com/story"),
            ("text", "Some pasted article text that is plenty long enough."),
        ])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["error"].as_str().unwrap(),
        "Provide exactly one of: file, url, or text"
    );
}

#[tokio::test]
async fn missing_input_is_rejected() {
    let response = app()
        .oneshot(verify_request(text_fields_body(&[("note", "not a channel")])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["error"].as_str().unwrap(),
        "Provide exactly one of: file, url, or text"
    );
}
