use axum::{routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::response::{DataResponse, OK};
use crate::state::AppState;
use crate::{addresses, contacts, users};

pub fn build_app(state: AppState) -> Router {
    let public = Router::new()
        .merge(users::public_router())
        .route("/health", get(|| async { Json(DataResponse::new(OK)) }));

    // every handler below takes an `AuthUser`
    let authenticated = Router::new()
        .merge(users::router())
        .merge(contacts::router())
        .merge(addresses::router());

    Router::new()
        .nest("/api", public.merge(authenticated))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn call(req: Request<Body>) -> (StatusCode, Value) {
        let res = build_app(AppState::fake()).oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let (status, body) = call(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn authenticated_routes_reject_missing_token() {
        for (method, uri) in [
            ("GET", "/api/users/current"),
            ("PATCH", "/api/users/current"),
            ("DELETE", "/api/users/current"),
            ("GET", "/api/contacts"),
            ("POST", "/api/contacts"),
            ("GET", "/api/contacts/1"),
            ("PUT", "/api/contacts/1"),
            ("DELETE", "/api/contacts/1"),
            ("GET", "/api/contacts/watashiwastring"),
            ("GET", "/api/contacts/1/addresses"),
            ("POST", "/api/contacts/1/addresses"),
            ("GET", "/api/contacts/1/addresses/2"),
            ("PUT", "/api/contacts/1/addresses/2"),
            ("DELETE", "/api/contacts/1/addresses/2"),
        ] {
            let (status, body) = call(json_request(method, uri, serde_json::json!({}))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(body["errors"], "Unauthorized", "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn empty_token_is_rejected() {
        let req = Request::builder()
            .uri("/api/users/current")
            .header("X-API-TOKEN", "")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["errors"], "Unauthorized");
    }

    #[tokio::test]
    async fn register_validates_before_touching_the_database() {
        let (status, body) = call(json_request(
            "POST",
            "/api/users",
            serde_json::json!({"username": "", "password": "", "name": ""}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("username"));
        assert!(message.contains("password"));
        assert!(message.contains("name"));
    }

    #[tokio::test]
    async fn login_validates_before_touching_the_database() {
        let (status, body) = call(json_request(
            "POST",
            "/api/users/login",
            serde_json::json!({"username": "", "password": ""}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/users")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = call(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("body:"));
    }

    #[tokio::test]
    async fn missing_fields_are_a_validation_error() {
        let (status, body) = call(json_request(
            "POST",
            "/api/users",
            serde_json::json!({"username": "test"}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }
}
