pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        pub refresh_token: String,
    }
}

pub mod response {
    use crate::modules::auth::repository::Session;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Tokens(Session),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Tokens(session) => (
                    StatusCode::OK,
                    Json(json!({
                        "access_token": session.access_token,
                        "refresh_token": session.refresh_token,
                        "access_token_expires_at": session.access_token_expires_at,
                        "refresh_token_expires_at": session.refresh_token_expires_at,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        InvalidRefreshToken,
        FailedToRefreshTokens,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidRefreshToken => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid refresh token" })),
                )
                    .into_response(),
                Self::FailedToRefreshTokens => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to refresh tokens" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
