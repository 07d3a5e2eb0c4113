use super::types::{request, response};
use crate::{
    modules::{restaurant, table::repository},
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
    .map_err(|_| response::Error::FailedToFetchTable)?
    .ok_or(response::Error::TableNotFound)?;

    repository::find_by_id_and_restaurant_id(&ctx.db_conn.pool, payload.table_id, restaurant.id)
        .await
        .map_err(|_| response::Error::FailedToFetchTable)?
        .map(|table| response::Success::Table(table.into()))
        .ok_or(response::Error::TableNotFound)
}
