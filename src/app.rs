use crate::{
    modules,
    types::{AppContext, AppEnvironment, Context},
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors, trace};

/// Any origin during development. In production only the app's own `URL`.
fn allowed_origin(app: &AppContext) -> cors::AllowOrigin {
    match app.environment {
        AppEnvironment::Development => cors::Any.into(),
        AppEnvironment::Production => {
            let origin = HeaderValue::from_str(app.url.trim_end_matches('/')).ok();
            if origin.is_none() {
                tracing::warn!("URL '{}' is not a valid origin, CORS allows none", app.url);
            }
            cors::AllowOrigin::list(origin)
        }
    }
}

pub fn router(ctx: Arc<Context>) -> Router {
    let origin = allowed_origin(&ctx.app);

    Router::new()
        .nest("/api", modules::get_router())
        .with_state(ctx.clone())
        .layer(Extension(ctx))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(trace::TraceLayer::new_for_http())
        .layer(
            cors::CorsLayer::new()
                .allow_methods([
                    Method::OPTIONS,
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .allow_origin(origin),
        )
}

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

impl App {
    pub fn new(ctx: Arc<Context>) -> Self {
        Self {
            router: router(ctx.clone()),
            ctx,
        }
    }

    pub async fn serve(self) -> std::io::Result<()> {
        let address = format!("{}:{}", self.ctx.app.host, self.ctx.app.port);
        let listener = TcpListener::bind(&address).await?;

        tracing::info!("App is running on {} ({})", address, self.ctx.app.url);
        axum::serve(listener, self.router).await
    }
}

#[cfg(test)]
mod store_tests;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Config;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn app_with(vars: &[(&str, &str)]) -> Router {
        let config = Config::from_lookup(|name| match name {
            "DATABASE_URL" => Some("postgres://localhost/restaurant_test".to_string()),
            _ => vars
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string()),
        })
        .unwrap();

        router(Arc::new(config.to_lazy_context().unwrap()))
    }

    fn app() -> Router {
        app_with(&[])
    }

    async fn preflight(app: Router, origin: &str) -> Option<String> {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/restaurants")
                    .header(header::ORIGIN, origin)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|value| value.to_str().unwrap().to_string())
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn empty_order_is_rejected_before_any_lookup() {
        let response = app()
            .oneshot(post_json(
                "/api/qr/abc-123/order",
                serde_json::json!({"customer_name": "Alice", "items": []}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["errors"]["items"].is_array());
    }

    #[tokio::test]
    async fn undecodable_order_lines_are_field_errors() {
        for (body, field) in [
            (
                serde_json::json!({"customer_name": "Alice", "items": [{"quantity": 2}]}),
                "items[0]",
            ),
            (
                serde_json::json!({
                    "customer_name": "Alice",
                    "items": [{"menu_item_id": "M", "quantity": "2"}]
                }),
                "items[0].quantity",
            ),
            (
                serde_json::json!({"items": [{"menu_item_id": "M", "quantity": 1}]}),
                "body",
            ),
        ] {
            let response = app()
                .oneshot(post_json("/api/qr/abc-123/order", body))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", field);
            let body = json_body(response).await;
            assert_eq!(body["errors"][field][0]["code"], "INVALID_FIELD", "{}", body);
        }
    }

    #[tokio::test]
    async fn non_json_bodies_are_bad_requests() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/auth/sign-in")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["errors"]["body"][0]["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn development_allows_any_origin() {
        assert_eq!(
            preflight(app(), "http://localhost:3000").await.as_deref(),
            Some("*")
        );
    }

    #[tokio::test]
    async fn production_allows_only_its_own_origin() {
        let production = || {
            app_with(&[
                ("APP_ENV", "production"),
                ("URL", "https://orders.example.com/"),
            ])
        };

        assert_eq!(
            preflight(production(), "https://orders.example.com")
                .await
                .as_deref(),
            Some("https://orders.example.com")
        );
        assert_eq!(preflight(production(), "https://elsewhere.example").await, None);
    }

    #[tokio::test]
    async fn invalid_sign_up_is_a_field_error() {
        let response = app()
            .oneshot(post_json(
                "/api/auth/sign-up",
                serde_json::json!({
                    "email": "not-an-email",
                    "password": "short",
                    "first_name": "Ada",
                    "last_name": "Owner"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["errors"]["email"].is_array());
        assert!(body["errors"]["password"].is_array());
    }

    #[tokio::test]
    async fn owner_routes_require_a_bearer_token() {
        for (method, uri) in [
            (Method::GET, "/api/restaurants"),
            (Method::GET, "/api/restaurants/R/tables"),
            (Method::GET, "/api/restaurants/R/orders"),
            (Method::GET, "/api/orders/O"),
            (Method::GET, "/api/users/profile"),
        ] {
            let response = app()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
            let body = json_body(response).await;
            assert_eq!(body["error"], "Invalid session token");
        }
    }

    #[tokio::test]
    async fn malformed_authorization_header_is_unauthorized() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::PATCH)
                    .uri("/api/orders/O/status")
                    .header(header::AUTHORIZATION, "Token abc")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"status": "ready"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/nothing-here")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
