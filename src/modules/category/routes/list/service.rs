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
    .map_err(|_| response::Error::FailedToFetchCategories)?
    .ok_or(response::Error::RestaurantNotFound)?;

    repository::find_many_by_restaurant_id(&ctx.db_conn.pool, restaurant.id)
        .await
        .map(response::Success::Categories)
        .map_err(|_| response::Error::FailedToFetchCategories)
}
