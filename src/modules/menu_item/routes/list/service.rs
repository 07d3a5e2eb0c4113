use super::types::{request, response};
use crate::{
    modules::{menu_item::repository, restaurant},
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
    .map_err(|_| response::Error::FailedToFetchMenuItems)?
    .ok_or(response::Error::RestaurantNotFound)?;

    repository::find_many_by_restaurant_id(&ctx.db_conn.pool, restaurant.id)
        .await
        .map(response::Success::MenuItems)
        .map_err(|_| response::Error::FailedToFetchMenuItems)
}
