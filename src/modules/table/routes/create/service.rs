use super::types::{request, response};
use crate::{
    modules::{restaurant, table::repository},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate table payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant = restaurant::repository::find_by_id_and_owner_id(
        &ctx.db_conn.pool,
        payload.restaurant_id,
        payload.auth.user.id,
    )
    .await
    .map_err(|_| response::Error::FailedToCreateTable)?
    .ok_or(response::Error::RestaurantNotFound)?;

    let table = repository::create(
        &ctx.db_conn.pool,
        repository::CreateTablePayload {
            restaurant_id: restaurant.id,
            table_number: payload.body.table_number.trim().to_string(),
            capacity: payload.body.capacity,
            is_active: payload.body.is_active,
        },
    )
    .await
    .map_err(|err| match err {
        repository::Error::DuplicateTableNumber => response::Error::DuplicateTableNumber,
        repository::Error::UnexpectedError => response::Error::FailedToCreateTable,
    })?;

    tracing::info!(
        "Table {} created for restaurant {}",
        table.table_number,
        table.restaurant_id
    );

    Ok(response::Success::TableCreated(table.into()))
}
