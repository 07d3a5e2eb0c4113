use super::types::{request, response};
use crate::{modules::restaurant::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_many_by_owner_id(&ctx.db_conn.pool, payload.auth.user.id)
        .await
        .map(response::Success::Restaurants)
        .map_err(|_| response::Error::FailedToFetchRestaurants)
}
