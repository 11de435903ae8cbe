use axum::handler::HandlerWithoutStateExt;
use axum::http::{StatusCode, Uri};
use axum::routing::{any_service, MethodRouter};
use axum::Json;
use serde_json::Value;
use std::path::PathBuf;
use tower_http::services::ServeDir;

/// Prefix under which `wasm-pack` writes the favorite toggle bundle.
pub const FRONTEND_BUNDLE_PREFIX: &str = "/pkg/";

/// Serves the stylesheet and the frontend bundle; anything else is a 404
/// pointing back to the search page.
pub fn static_dir(static_dir: PathBuf) -> MethodRouter {
    any_service(ServeDir::new(static_dir).not_found_service(not_found.into_service()))
}

async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    let path = uri.path();
    let message = if path.starts_with(FRONTEND_BUNDLE_PREFIX) {
        tracing::warn!(
            path,
            "favorite toggle bundle missing, run `wasm-pack build services/poetpedia-frontend \
             --target web --out-dir ../poetpedia-backend/static/pkg`"
        );
        format!("{path} is not built: the favorite button is inactive")
    } else {
        format!("No page at {path}, search poems from /welcome")
    };
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "status": "fail",
            "message": message,
            "code": "page/not_found"
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, Router};
    use speculoos::prelude::*;
    use tower::ServiceExt;

    fn app() -> Router {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static");
        Router::new().fallback_service(static_dir(dir))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body())
            .await
            .expect("body");
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn static_dir_should_serve_the_stylesheet() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/css/poetpedia.css")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_that(&response.status()).is_equal_to(StatusCode::OK);
    }

    #[tokio::test]
    async fn static_dir_should_point_unknown_pages_to_the_search() {
        let (status, body) = get("/nowhere").await;

        assert_that(&status).is_equal_to(StatusCode::NOT_FOUND);
        assert_that(&body["code"].as_str()).is_equal_to(Some("page/not_found"));
        assert_that(&body["message"].as_str().unwrap_or_default()).contains("/welcome");
    }

    #[tokio::test]
    async fn static_dir_should_report_a_missing_frontend_bundle() {
        let (status, body) = get("/pkg/not_built.js").await;

        assert_that(&status).is_equal_to(StatusCode::NOT_FOUND);
        assert_that(&body["message"].as_str().unwrap_or_default()).contains("not built");
    }
}
