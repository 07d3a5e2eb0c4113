use super::types::{request, response};
use crate::{
    modules::{category::repository, restaurant},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurant = restaurant::repository::find_by_id_and_owner_id(
        &ctx.db_conn.pool,
        payload.restaurant_id,
        payload.auth.user.id,
    )
    .await
    .map_err(|_| response::Error::FailedToFetchCategory)?
    .ok_or(response::Error::CategoryNotFound)?;

    repository::find_by_id_and_restaurant_id(&ctx.db_conn.pool, payload.category_id, restaurant.id)
        .await
        .map_err(|_| response::Error::FailedToFetchCategory)?
        .map(response::Success::Category)
        .ok_or(response::Error::CategoryNotFound)
}
