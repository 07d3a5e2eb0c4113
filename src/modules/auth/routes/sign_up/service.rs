use super::types::{request, response};
use crate::{modules::user, types::Context, utils::password};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let existing = user::repository::find_by_email(&ctx.db_conn.pool, payload.email.clone())
        .await
        .map_err(|_| response::Error::SignupFailed)?;

    if existing.is_some() {
        return Err(response::Error::EmailAlreadyInUse);
    }

    let password_hash = password::hash(&payload.password).map_err(|err| {
        tracing::error!("Failed to hash password: {}", err);
        response::Error::SignupFailed
    })?;

    user::repository::create(
        &ctx.db_conn.pool,
        user::repository::CreateUserPayload {
            email: payload.email,
            password_hash,
            first_name: payload.first_name,
            last_name: payload.last_name,
        },
    )
    .await
    .map_err(|_| response::Error::SignupFailed)
    .map(response::Success::SignedUp)
}
