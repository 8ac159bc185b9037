pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ats::handlers;
use crate::state::AppState;

/// Slack on top of `max_input_bytes` for JSON escaping and multipart framing.
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_input_bytes
        .saturating_mul(2)
        .saturating_add(BODY_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/ats/keywords",
            post(handlers::handle_extract_keywords),
        )
        .route("/api/v1/ats/score", post(handlers::handle_score))
        .route(
            "/api/v1/ats/score/upload",
            post(handlers::handle_score_upload),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    const JD: &str = "We need strong skills in python django postgresql docker testing";
    const RESUME: &str = "Experienced with python and docker deployments";
    const BOUNDARY: &str = "----ats-test-boundary";

    fn app() -> Router {
        app_with(|_| None)
    }

    fn app_with(lookup: impl Fn(&str) -> Option<String>) -> Router {
        let config = Config::from_lookup(lookup).unwrap();
        build_router(AppState::new(config))
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, filename, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(filename) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/ats/score/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_score_returns_result_and_backend() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/ats/score",
                json!({ "resumeText": RESUME, "jobDescriptionText": JD }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["score"], 25);
        assert_eq!(body["scorerBackend"], "keyword");
        assert_eq!(body["matchedKeywords"], json!(["python", "docker"]));
        assert_eq!(
            body["missingKeywords"],
            json!(["need", "strong", "skills", "django", "postgresql", "testing"])
        );
        assert_eq!(body["formattingIssues"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_score_empty_resume_is_bad_request() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/ats/score",
                json!({ "resumeText": "", "jobDescriptionText": JD }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_score_generic_description_is_unprocessable() {
        let jd = "we are a big co and we do it all for you, so go go go and be on top";
        let response = app()
            .oneshot(json_request(
                "/api/v1/ats/score",
                json!({ "resumeText": RESUME, "jobDescriptionText": jd }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["error"]["code"], "DEGENERATE_INPUT");
    }

    #[tokio::test]
    async fn test_score_oversized_input_is_rejected() {
        let app = app_with(|key| (key == "MAX_INPUT_BYTES").then(|| "100".to_string()));
        let response = app
            .oneshot(json_request(
                "/api/v1/ats/score",
                json!({ "resumeText": RESUME.repeat(3), "jobDescriptionText": JD }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_score_uses_configured_match_mode() {
        let app = app_with(|key| (key == "ATS_MATCH_MODE").then(|| "word_boundary".to_string()));
        let jd = "Looking for someone who can test distributed systems thoroughly";
        let response = app
            .oneshot(json_request(
                "/api/v1/ats/score",
                json!({ "resumeText": "I write testable code", "jobDescriptionText": jd }),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert!(body["missingKeywords"]
            .as_array()
            .unwrap()
            .contains(&json!("test")));
    }

    #[tokio::test]
    async fn test_keywords_endpoint() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/ats/keywords",
                json!({ "jobDescriptionText": JD }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["count"], 8);
        assert_eq!(body["keywords"][0], "need");
    }

    #[tokio::test]
    async fn test_keywords_endpoint_degenerate() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/ats/keywords",
                json!({ "jobDescriptionText": "go go go" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_upload_text_resume() {
        let response = app()
            .oneshot(multipart_request(&[
                ("resume", Some("resume.txt"), RESUME.as_bytes()),
                ("job_description", None, JD.as_bytes()),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["score"], 25);
    }

    #[tokio::test]
    async fn test_upload_text_resume_with_unknown_extension() {
        let response = app()
            .oneshot(multipart_request(&[
                ("resume", Some("Jane.Doe"), RESUME.as_bytes()),
                ("job_description", None, JD.as_bytes()),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["score"], 25);
    }

    #[tokio::test]
    async fn test_keywords_blank_description_is_bad_request() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/ats/keywords",
                json!({ "jobDescriptionText": "   " }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_upload_unsupported_format() {
        let response = app()
            .oneshot(multipart_request(&[
                ("resume", Some("resume.docx"), b"PK\x03\x04binary"),
                ("job_description", None, JD.as_bytes()),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "UNSUPPORTED_RESUME"
        );
    }

    #[tokio::test]
    async fn test_upload_missing_job_description() {
        let response = app()
            .oneshot(multipart_request(&[(
                "resume",
                Some("resume.txt"),
                RESUME.as_bytes(),
            )]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "VALIDATION_ERROR"
        );
    }
}
