//! HTTP boundary: the `/api/rsvps` routes plus static asset serving.
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | GET | `/api/rsvps` | 200, records by `createdAt` |
//! | POST | `/api/rsvps` | 201, created record |
//! | PUT | `/api/rsvps/:id` | 200, updated record |
//! | DELETE | `/api/rsvps/:id` | 204 |
//!
//! Any other method on those paths gets 405. Bodies over [`MAX_BODY_BYTES`]
//! get 413. Every other path is served from the public directory.

pub mod error;
mod rsvps;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::Router;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::persistence::RsvpRepository;
use crate::rsvp::RsvpService;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Deployment options for the router.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub public_dir: PathBuf,
    pub cors: bool,
}

/// Build the application router around a shared service.
pub fn router<R: RsvpRepository>(service: Arc<RsvpService<R>>, options: &HttpOptions) -> Router {
    let api = Router::new()
        .route(
            "/api/rsvps",
            get(rsvps::list_rsvps::<R>)
                .post(rsvps::create_rsvp::<R>)
                .fallback(rsvps::method_not_allowed),
        )
        .route(
            "/api/rsvps/:id",
            put(rsvps::replace_rsvp::<R>)
                .delete(rsvps::delete_rsvp::<R>)
                .fallback(rsvps::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(service);

    let app = api
        .fallback_service(ServeDir::new(&options.public_dir))
        .layer(TraceLayer::new_for_http());

    if options.cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers(Any),
        )
    } else {
        app
    }
}

/// Serialize `body` as a JSON response with an explicit UTF-8 charset.
pub(crate) fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::{Database, SqliteRsvpRepository};
    use crate::persistence::RsvpStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        _dirs: (tempfile::TempDir, tempfile::TempDir),
    }

    fn options(public: &tempfile::TempDir, cors: bool) -> HttpOptions {
        std::fs::write(public.path().join("index.html"), "<h1>RSVP</h1>").unwrap();
        HttpOptions {
            public_dir: public.path().to_path_buf(),
            cors,
        }
    }

    fn json_app(cors: bool) -> TestApp {
        let data = tempfile::tempdir().unwrap();
        let public = tempfile::tempdir().unwrap();
        let service = Arc::new(RsvpService::new(RsvpStore::new(data.path())));
        TestApp {
            router: router(service, &options(&public, cors)),
            _dirs: (data, public),
        }
    }

    async fn sqlite_app() -> TestApp {
        let data = tempfile::tempdir().unwrap();
        let public = tempfile::tempdir().unwrap();
        let db = Database::new_in_memory().await.unwrap();
        let service = Arc::new(RsvpService::new(SqliteRsvpRepository::new(db.pool().clone())));
        TestApp {
            router: router(service, &options(&public, false)),
            _dirs: (data, public),
        }
    }

    fn request(method: Method, uri: &str, body: Option<String>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = app.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, bytes.to_vec())
    }

    async fn send_json(
        app: &TestApp,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, content_type, bytes) =
            send(app, request(method, uri, body.map(|b| b.to_string()))).await;
        if bytes.is_empty() {
            return (status, Value::Null);
        }
        assert_eq!(content_type.as_deref(), Some(JSON_CONTENT_TYPE));
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn crud_roundtrip(app: &TestApp) {
        let (status, list) = send_json(app, Method::GET, "/api/rsvps", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([]));

        let (status, created) = send_json(
            app,
            Method::POST,
            "/api/rsvps",
            Some(json!({"guestName": "Ana", "guestCount": "abc", "contributions": "chips, soda"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["guestName"], "Ana");
        assert_eq!(created["guestCount"], 1);
        assert_eq!(created["notes"], "");
        assert_eq!(created["contributions"], json!(["chips", "soda"]));
        assert!(created.get("updatedAt").is_none());
        let id = created["id"].as_str().unwrap().to_string();

        let (_, list) = send_json(app, Method::GET, "/api/rsvps", None).await;
        assert_eq!(list, json!([created.clone()]));

        let (status, updated) = send_json(
            app,
            Method::PUT,
            &format!("/api/rsvps/{id}"),
            Some(json!({"guestName": "Ana", "guestCount": 3, "notes": "late", "contributions": ["cake"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["createdAt"], created["createdAt"]);
        assert_eq!(updated["guestCount"], 3);
        assert!(updated["updatedAt"].as_u64().unwrap() >= created["createdAt"].as_u64().unwrap());

        let (status, body) =
            send_json(app, Method::DELETE, &format!("/api/rsvps/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) =
            send_json(app, Method::DELETE, &format!("/api/rsvps/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "RSVP not found."}));
    }

    #[tokio::test]
    async fn test_crud_over_json_store() {
        crud_roundtrip(&json_app(false)).await;
    }

    #[tokio::test]
    async fn test_crud_over_sqlite() {
        crud_roundtrip(&sqlite_app().await).await;
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let app = json_app(false);
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/rsvps",
            Some(json!({"guestName": "", "contributions": ["cake"]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "Guest name is required."}));

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/rsvps",
            Some(json!({"guestName": "Ana", "contributions": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "At least one contribution is required."}));

        let (_, list) = send_json(&app, Method::GET, "/api/rsvps", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = json_app(false);
        let (status, _, bytes) = send(
            &app,
            request(Method::POST, "/api/rsvps", Some("{guestName:".to_string())),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"message": "Invalid JSON payload."}));
    }

    #[tokio::test]
    async fn test_oversized_body_is_json_413() {
        let app = json_app(false);
        let notes = "x".repeat(MAX_BODY_BYTES);
        let body = json!({"guestName": "Ana", "notes": notes, "contributions": ["cake"]});
        for (method, uri) in [(Method::POST, "/api/rsvps"), (Method::PUT, "/api/rsvps/abc")] {
            let (status, body) = send_json(&app, method, uri, Some(body.clone())).await;
            assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "{uri}");
            assert_eq!(body, json!({"message": "Request body too large."}));
        }
        let (_, list) = send_json(&app, Method::GET, "/api/rsvps", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_put_unknown_id_is_not_found() {
        let app = json_app(false);
        let (status, body) = send_json(
            &app,
            Method::PUT,
            "/api/rsvps/does-not-exist",
            Some(json!({"guestName": "Ana", "contributions": ["cake"]})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "RSVP not found."}));
        let (_, list) = send_json(&app, Method::GET, "/api/rsvps", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_other_methods_not_allowed() {
        let app = json_app(false);
        for (method, uri) in [
            (Method::PATCH, "/api/rsvps"),
            (Method::DELETE, "/api/rsvps"),
            (Method::PUT, "/api/rsvps"),
            (Method::GET, "/api/rsvps/abc"),
            (Method::POST, "/api/rsvps/abc"),
        ] {
            let (status, body) = send_json(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
            assert_eq!(body, json!({"message": "Method not allowed."}));
        }
    }

    #[tokio::test]
    async fn test_static_index_served() {
        let app = json_app(false);
        let (status, _, bytes) = send(&app, request(Method::GET, "/", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"<h1>RSVP</h1>");

        let (status, _, _) = send(&app, request(Method::GET, "/missing.css", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_when_enabled() {
        let app = json_app(true);
        let req = Request::builder()
            .method(Method::GET)
            .uri("/api/rsvps")
            .header(header::ORIGIN, "https://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let app = json_app(false);
        let req = Request::builder()
            .method(Method::GET)
            .uri("/api/rsvps")
            .header(header::ORIGIN, "https://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(req).await.unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
