use super::types::{request, response};
use crate::{
    modules::{restaurant, table::repository},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate table update: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant = restaurant::repository::find_by_id_and_owner_id(
        &ctx.db_conn.pool,
        payload.restaurant_id,
        payload.auth.user.id,
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateTable)?
    .ok_or(response::Error::TableNotFound)?;

    repository::update_by_id_and_restaurant_id(
        &ctx.db_conn.pool,
        payload.table_id,
        restaurant.id,
        repository::UpdateTablePayload {
            table_number: payload
                .body
                .table_number
                .map(|table_number| table_number.trim().to_string()),
            capacity: payload.body.capacity,
            is_active: payload.body.is_active,
        },
    )
    .await
    .map_err(|err| match err {
        repository::Error::DuplicateTableNumber => response::Error::DuplicateTableNumber,
        repository::Error::UnexpectedError => response::Error::FailedToUpdateTable,
    })?
    .map(|table| response::Success::TableUpdated(table.into()))
    .ok_or(response::Error::TableNotFound)
}
