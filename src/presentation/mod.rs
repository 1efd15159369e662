// Presentation layer - HTTP routing
pub mod app_state;
pub mod error;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, render_page, stream_page, update_component};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Every GET path that is not an API route renders a page; the page router
/// decides which one.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/_dash-update-component", post(update_component))
        .route("/_dash-stream", get(stream_page))
        .fallback(get(render_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::page_service::PageService;
    use crate::application::router::PageRouter;
    use crate::application::view_update::ViewUpdateEngine;
    use crate::domain::dataset::fixtures::sample_datasets;
    use crate::domain::page::PageId;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let engine = ViewUpdateEngine::new(Arc::new(sample_datasets()));
        let page_service = PageService::new(PageRouter::new(&PageId::ALL), engine.clone());
        build_router(Arc::new(AppState {
            page_service,
            view_engine: engine,
        }))
    }

    async fn get(uri: &str) -> Response {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_update(payload: Value) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/_dash-update-component")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = get("/healthz").await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_page_routes() {
        let pages = [
            ("/", "home"),
            ("/gapminder", "gapminder"),
            ("/iris", "iris"),
            ("/tips", "tips"),
        ];
        for (uri, page) in pages {
            let response = get(uri).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(json_body(response).await["page"], page);
        }
    }

    #[tokio::test]
    async fn test_unknown_route_renders_home() {
        let response = get("/does/not/exist").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["page"], "home");
        assert_eq!(body["content"]["heading"], "Hello Dash!");
    }

    #[tokio::test]
    async fn test_iris_page_lists_controls() {
        let body = json_body(get("/iris").await).await;
        let ids: Vec<&str> = body["content"]["controls"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();

        assert_eq!(ids, vec!["xchoice", "ychoice", "slider"]);
        assert_eq!(body["slots"][0]["status"], "not_yet_computed");
        assert_eq!(body["slots"][1]["status"], "computed");
    }

    #[tokio::test]
    async fn test_incomplete_iris_selection_suppresses_redraw() {
        let response = post_update(json!({
            "changed": "xchoice",
            "inputs": {"xchoice": "petal_length", "ychoice": null}
        }))
        .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_complete_iris_selection_returns_figure() {
        let response = post_update(json!({
            "changed": "ychoice",
            "inputs": {"xchoice": "petal_length", "ychoice": "petal_width"}
        }))
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let update = &body["updates"][0];
        assert_eq!(update["slot"], "iris_chart");
        assert_eq!(update["figure"]["encoding"]["x"], "petal_length");
        assert_eq!(update["figure"]["encoding"]["y"], "petal_width");
        assert_eq!(update["figure"]["labels"]["petal_width"], "Petal Width");
    }

    #[tokio::test]
    async fn test_gapminder_without_choice_uses_default() {
        let response =
            post_update(json!({"changed": "mapchoice", "inputs": {"mapchoice": null}})).await;
        let body = json_body(response).await;

        assert_eq!(body["updates"][0]["figure"]["encoding"]["color"], "gdpPercap");
        assert_eq!(body["updates"][0]["figure"]["title"], "GDP Per Capita 1952-2007 by Country");
    }

    #[tokio::test]
    async fn test_invalid_control_value_is_bad_request() {
        let response =
            post_update(json!({"changed": "slider", "inputs": {"slider": "wide"}})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INVALID_CONTROL_VALUE");
    }

    #[tokio::test]
    async fn test_malformed_control_values_are_bad_request() {
        let payloads = [
            json!({"changed": "slider", "inputs": {"slider": [0.5, 1.0, 1.5]}}),
            json!({"changed": "slider", "inputs": {"slider": [1.0]}}),
            json!({"changed": "xchoice", "inputs": {"xchoice": 5, "ychoice": "petal_width"}}),
        ];

        for payload in payloads {
            let response = post_update(payload.clone()).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {}", payload);

            let body = json_body(response).await;
            assert_eq!(body["error"]["code"], "INVALID_CONTROL_VALUE", "payload {}", payload);
        }
    }

    #[tokio::test]
    async fn test_unparseable_body_is_bad_request() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/_dash-update-component")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"changed\": "))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INVALID_REQUEST_BODY");
    }

    #[tokio::test]
    async fn test_page_stream_frames() {
        let response = get("/_dash-stream?pathname=/gapminder").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let mut rest = &bytes[..];
        let mut types = Vec::new();
        while rest.len() >= 4 {
            let len = u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
            let msg: Value = serde_json::from_slice(&rest[4..4 + len]).unwrap();
            types.push(msg["type"].as_str().unwrap().to_string());
            rest = &rest[4 + len..];
        }

        assert_eq!(types, vec!["skeleton", "slot_update", "complete"]);
    }

    #[tokio::test]
    async fn test_brotli_when_requested() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/tips")
                    .header(header::ACCEPT_ENCODING, "br")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
    }
}
