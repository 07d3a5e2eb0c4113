use super::service;
use crate::modules::user;
use crate::modules::user::repository::User;
use crate::types::Context;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::RequestPartsExt;
use axum::{async_trait, Json};
use axum::{extract::Extension, http, http::request::Parts, response::Response};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

enum Error {
    InvalidSession,
    UnexpectedError,
}

async fn get_user_from_header(ctx: Arc<Context>, header: &str) -> Result<User, Error> {
    let access_token = service::bearer_token(header).ok_or(Error::InvalidSession)?;
    let session = service::verify_access_token(ctx.clone(), access_token.to_string())
        .await
        .map_err(|err| match err {
            service::Error::UnexpectedError => Error::UnexpectedError,
            _ => Error::InvalidSession,
        })?;

    user::repository::find_by_id(&ctx.db_conn.pool, session.user_id)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::InvalidSession)
}

/// The authenticated owner principal.
#[derive(Serialize, Clone)]
pub struct Auth {
    pub user: User,
}

fn invalid_session() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Invalid session token"})),
    )
        .into_response()
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .map_err(|err| err.into_response())?;

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .ok_or_else(invalid_session)?;

        get_user_from_header(ctx, auth_header)
            .await
            .map(|user| Self { user })
            .map_err(|err| match err {
                Error::InvalidSession => invalid_session(),
                Error::UnexpectedError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Failed to verify session"})),
                )
                    .into_response(),
            })
    }
}
