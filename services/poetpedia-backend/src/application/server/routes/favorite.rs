use axum::extract::{Json, State};
use poetpedia_common::{FavoriteResp, PoemFavoriteRequest};
use uuid::Uuid;

use super::Error;
use crate::application::server::AppState;
use crate::domain::{FavoriteChange, FavoritePoem};
use common::err_context::ErrorContextExt;

/// POST handler flipping the favorite flag of a poem.
#[tracing::instrument(
    name = "Toggling favorite",
    skip(state),
    fields(
        request_id = %Uuid::new_v4(),
    )
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Json(request): Json<PoemFavoriteRequest>,
) -> Result<Json<FavoriteResp>, Error> {
    let change = FavoriteChange::try_from(request).context("Invalid favorite request")?;

    let poem = state
        .favorites
        .toggle(&change)
        .await
        .context(format!("Could not toggle favorite of poem {}", change.id))?;

    Ok(Json(FavoriteResp {
        id: poem.id,
        favorite: poem.favorite,
    }))
}

/// GET handler listing favorite poems.
#[tracing::instrument(
    name = "Listing favorites",
    skip(state),
    fields(
        request_id = %Uuid::new_v4(),
    )
)]
pub async fn favorites(State(state): State<AppState>) -> Result<Json<Vec<FavoritePoem>>, Error> {
    let favorites = state
        .favorites
        .favorites()
        .await
        .context("Could not list favorites")?;
    Ok(Json(favorites))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::{get, post, Router},
    };
    use poetpedia_common::{PoemId, FAVORITE_PATH};
    use std::sync::Arc;
    use tower::ServiceExt;

    use super::*;
    use crate::application::server::ApplicationBaseUrl;
    use crate::domain::ports::secondary::{
        FavoriteError, MockFavoriteStorage, MockPoetryService,
    };

    fn favorite_routes(storage: MockFavoriteStorage) -> Router {
        let state = AppState {
            poetry: Arc::new(MockPoetryService::new()),
            favorites: Arc::new(storage),
            base_url: ApplicationBaseUrl("http://127.0.0.1".to_string()),
        };
        Router::new()
            .route(FAVORITE_PATH, post(toggle_favorite))
            .route("/api/poems/favorites", get(favorites))
            .with_state(state)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .uri(FAVORITE_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .method("POST")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn record(id: &str, favorite: bool) -> FavoritePoem {
        FavoritePoem {
            id: PoemId::new(id),
            title: "Fog".to_string(),
            author: "Carl Sandburg".to_string(),
            lines: "The fog comes...".to_string(),
            favorite,
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = hyper::body::to_bytes(response.into_body())
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn toggle_should_return_the_new_state() {
        let mut storage = MockFavoriteStorage::new();
        storage
            .expect_toggle()
            .withf(|change: &FavoriteChange| {
                change.id == PoemId::new("42") && change.title == "Fog"
            })
            .times(1)
            .returning(|_| Ok(record("42", true)));

        let response = favorite_routes(storage)
            .oneshot(post_json(
                r#"{"title":"Fog","author":"Carl Sandburg","lines":"The fog comes...","id":"42"}"#,
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"id": "42", "favorite": true})
        );
    }

    #[tokio::test]
    async fn toggle_should_accept_a_numeric_id() {
        let mut storage = MockFavoriteStorage::new();
        storage
            .expect_toggle()
            .withf(|change: &FavoriteChange| change.id == PoemId::new("42"))
            .times(1)
            .returning(|_| Ok(record("42", false)));

        let response = favorite_routes(storage)
            .oneshot(post_json(
                r#"{"title":"Fog","author":"Carl Sandburg","lines":"","id":42}"#,
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn toggle_should_reject_an_empty_title() {
        let mut storage = MockFavoriteStorage::new();
        storage.expect_toggle().never();

        let response = favorite_routes(storage)
            .oneshot(post_json(
                r#"{"title":"  ","author":"Carl Sandburg","lines":"","id":"42"}"#,
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], "fail");
        assert_eq!(body["code"], "favorite/invalid_request");
    }

    #[tokio::test]
    async fn toggle_should_reject_malformed_json() {
        let response = favorite_routes(MockFavoriteStorage::new())
            .oneshot(post_json(r#"{"title":"Fog"}"#))
            .await
            .expect("response");

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn toggle_should_fail_when_the_storage_fails() {
        let mut storage = MockFavoriteStorage::new();
        storage.expect_toggle().returning(|_| {
            Err(FavoriteError::Validation {
                context: "broken".to_string(),
            })
        });

        let response = favorite_routes(storage)
            .oneshot(post_json(
                r#"{"title":"Fog","author":"Carl Sandburg","lines":"","id":"42"}"#,
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn favorites_should_list_the_stored_favorites() {
        let mut storage = MockFavoriteStorage::new();
        storage
            .expect_favorites()
            .times(1)
            .returning(|| Ok(vec![record("1", true), record("3", true)]));

        let response = favorite_routes(storage)
            .oneshot(
                Request::builder()
                    .uri("/api/poems/favorites")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_eq!(body[1]["id"], "3");
    }
}
