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
    .map_err(|_| response::Error::FailedToFetchMenuItem)?
    .ok_or(response::Error::MenuItemNotFound)?;

    repository::find_by_id_and_restaurant_id(&ctx.db_conn.pool, payload.menu_item_id, restaurant.id)
        .await
        .map_err(|_| response::Error::FailedToFetchMenuItem)?
        .map(response::Success::MenuItem)
        .ok_or(response::Error::MenuItemNotFound)
}
