pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;

    /// The status stays a raw string so unknown values get the same 400
    /// as a missing one.
    #[derive(Deserialize)]
    pub struct Body {
        pub status: Option<String>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub order_id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::order::repository::FullOrder;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Order(FullOrder),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Order(order) => (StatusCode::OK, Json(json!(order))).into_response(),
            }
        }
    }

    pub enum Error {
        OrderNotFound,
        InvalidStatus,
        InvalidTransition(String),
        StatusChangedConcurrently,
        FailedToUpdateOrderStatus,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Order not found" })),
                )
                    .into_response(),
                Self::InvalidStatus => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid status" })),
                )
                    .into_response(),
                Self::InvalidTransition(message) => {
                    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
                }
                Self::StatusChangedConcurrently => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Order status changed concurrently" })),
                )
                    .into_response(),
                Self::FailedToUpdateOrderStatus => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update order status" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}

#[cfg(test)]
mod tests {
    use super::{request::Body, response::Error};
    use axum::{http::StatusCode, response::IntoResponse};

    #[test]
    fn unknown_and_missing_status_parse_as_bodies() {
        let body: Body = serde_json::from_str(r#"{"status": "delivered"}"#).unwrap();
        assert_eq!(body.status.as_deref(), Some("delivered"));

        let body: Body = serde_json::from_str("{}").unwrap();
        assert!(body.status.is_none());
    }

    #[test]
    fn error_statuses() {
        assert_eq!(
            Error::OrderNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::InvalidStatus.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::InvalidTransition("no".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::StatusChangedConcurrently.into_response().status(),
            StatusCode::CONFLICT
        );
    }
}
