use super::types::{request, response};
use crate::{
    modules::{category::repository, restaurant},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate category update: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant = restaurant::repository::find_by_id_and_owner_id(
        &ctx.db_conn.pool,
        payload.restaurant_id,
        payload.auth.user.id,
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateCategory)?
    .ok_or(response::Error::CategoryNotFound)?;

    repository::update_by_id_and_restaurant_id(
        &ctx.db_conn.pool,
        payload.category_id,
        restaurant.id,
        repository::UpdateCategoryPayload {
            name: payload.body.name,
            description: payload.body.description,
            order_index: payload.body.order_index,
            is_active: payload.body.is_active,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateCategory)?
    .map(response::Success::CategoryUpdated)
    .ok_or(response::Error::CategoryNotFound)
}
