use super::types::{request, response};
use crate::{
    modules::{auth::service, user},
    types::Context,
    utils::password,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = user::repository::find_by_email(&ctx.db_conn.pool, payload.email)
        .await
        .map_err(|_| response::Error::FailedToSignIn)?
        .ok_or(response::Error::InvalidCredentials)?;

    if !password::verify(&payload.password, &user.password_hash) {
        return Err(response::Error::InvalidCredentials);
    }

    service::create_session(ctx.clone(), user.id)
        .await
        .map_err(|_| response::Error::FailedToSignIn)
        .map(response::Success::SignedIn)
}
