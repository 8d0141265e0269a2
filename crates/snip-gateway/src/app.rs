use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    analytics_handler, click_handler, health_handler, resolve_handler, shorten_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/api/v1/url",
                Router::new()
                    .route("/shorten", post(shorten_handler))
                    .route("/{short_code}", get(resolve_handler))
                    .route("/{short_code}/click", post(click_handler))
                    .route("/{short_code}/analytics", get(analytics_handler)),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::extract::connect_info::ConnectInfo;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use snip_core::{ClickAnalytics, ClickEvent, ShortCode, Shortener, ShortenerError, StoreError};
    use snip_generator::RandomGenerator;
    use snip_shortener::{AnalyticsService, ShortenerService};
    use snip_storage::InMemoryStore;
    use std::net::SocketAddr;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let store = InMemoryStore::new();
        App::router(AppState::new(
            ShortenerService::new(store.clone(), RandomGenerator::new()),
            AnalyticsService::new(store),
        ))
    }

    /// Fails every call with the same error.
    struct Failing(ShortenerError);

    #[async_trait]
    impl Shortener for Failing {
        async fn shorten(&self, _original_url: &str) -> snip_core::error::Result<ShortCode> {
            Err(self.0.clone())
        }

        async fn resolve(&self, _code: &ShortCode) -> snip_core::error::Result<Option<String>> {
            Err(self.0.clone())
        }
    }

    #[async_trait]
    impl ClickAnalytics for Failing {
        async fn record_click(
            &self,
            _code: &ShortCode,
            _ip: &str,
            _user_agent: &str,
        ) -> snip_core::error::Result<()> {
            Err(self.0.clone())
        }

        async fn analytics(&self, _code: &ShortCode) -> snip_core::error::Result<Vec<ClickEvent>> {
            Err(self.0.clone())
        }
    }

    fn failing_app(err: ShortenerError) -> Router {
        App::router(AppState::new(Failing(err.clone()), Failing(err)))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn shorten(app: &Router, url: &str) -> String {
        let (status, body) = send(
            app,
            post_json("/api/v1/url/shorten", json!({ "originalUrl": url })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["shortCode"].as_str().unwrap().to_owned()
    }

    #[tokio::test]
    async fn health() {
        let (status, body) = send(&test_app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn shorten_then_resolve() {
        let app = test_app();

        let code = shorten(&app, "https://example.com/some/path").await;
        assert_eq!(code.len(), 7);

        let (status, body) = send(&app, get(&format!("/api/v1/url/{code}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "originalUrl": "https://example.com/some/path" }));
    }

    #[tokio::test]
    async fn unknown_code_resolves_to_null() {
        let (status, body) = send(&test_app(), get("/api/v1/url/zzzzzzz")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "originalUrl": null }));
    }

    #[tokio::test]
    async fn invalid_urls_are_rejected() {
        let app = test_app();

        for body in [
            json!({ "originalUrl": "not a url" }),
            json!({ "originalUrl": "ftp://example.com" }),
            json!({ "originalUrl": "" }),
            json!({ "url": "https://example.com" }),
        ] {
            let (status, body) = send(&app, post_json("/api/v1/url/shorten", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].is_string());
        }
    }

    #[tokio::test]
    async fn unknown_codes_of_any_shape_are_served() {
        let app = test_app();

        for code in ["ab", "a.b.c", "abc%40def"] {
            let (status, body) = send(&app, get(&format!("/api/v1/url/{code}"))).await;
            assert_eq!(status, StatusCode::OK, "resolve {code}");
            assert_eq!(body, json!({ "originalUrl": null }));

            let click = Request::post(format!("/api/v1/url/{code}/click"))
                .body(Body::empty())
                .unwrap();
            let (status, _) = send(&app, click).await;
            assert_eq!(status, StatusCode::NO_CONTENT, "click {code}");

            let (status, body) = send(&app, get(&format!("/api/v1/url/{code}/analytics"))).await;
            assert_eq!(status, StatusCode::OK, "analytics {code}");
            assert_eq!(body.as_array().map(Vec::len), Some(1));
        }
    }

    #[tokio::test]
    async fn clicks_show_up_in_analytics() {
        let app = test_app();
        let code = shorten(&app, "https://example.com").await;
        let click_uri = format!("/api/v1/url/{code}/click");

        let forwarded = Request::post(&click_uri)
            .header("x-forwarded-for", "1.2.3.4, 5.6.7.8")
            .header(header::USER_AGENT, "Mozilla/5.0")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, forwarded).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let mut direct = Request::post(&click_uri).body(Body::empty()).unwrap();
        direct
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([9, 10, 11, 12], 40_000))));
        send(&app, direct).await;

        send(&app, Request::post(&click_uri).body(Body::empty()).unwrap()).await;

        let (status, body) = send(&app, get(&format!("/api/v1/url/{code}/analytics"))).await;
        assert_eq!(status, StatusCode::OK);

        let events: Vec<ClickEvent> = serde_json::from_value(body).unwrap();
        let seen: Vec<_> = events
            .iter()
            .map(|e| (e.ip.as_str(), e.user_agent.as_str()))
            .collect();
        assert_eq!(
            seen,
            [
                ("", "unknown"),
                ("9.10.11.12", "unknown"),
                ("1.2.3.4", "Mozilla/5.0"),
            ]
        );
    }

    #[tokio::test]
    async fn clicks_on_unknown_codes_are_recorded() {
        let app = test_app();

        let (status, _) = send(
            &app,
            Request::post("/api/v1/url/never00/click")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, get("/api/v1/url/never00/analytics")).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn surfaced_store_failure_is_unavailable() {
        let app = failing_app(ShortenerError::Store(StoreError::Unavailable(
            "connection refused".into(),
        )));

        let (status, body) = send(
            &app,
            post_json("/api/v1/url/shorten", json!({ "originalUrl": "https://example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("connection refused"));

        let (status, _) = send(&app, get("/api/v1/url/abc1234/analytics")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn exhausted_code_space_is_internal_error() {
        let app = failing_app(ShortenerError::CodeSpaceExhausted { attempts: 5 });

        let (status, _) = send(
            &app,
            post_json("/api/v1/url/shorten", json!({ "originalUrl": "https://example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
