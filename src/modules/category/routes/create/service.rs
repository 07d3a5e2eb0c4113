use super::types::{request, response};
use crate::{
    modules::{category::repository, restaurant},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate category payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant = restaurant::repository::find_by_id_and_owner_id(
        &ctx.db_conn.pool,
        payload.restaurant_id,
        payload.auth.user.id,
    )
    .await
    .map_err(|_| response::Error::FailedToCreateCategory)?
    .ok_or(response::Error::RestaurantNotFound)?;

    repository::create(
        &ctx.db_conn.pool,
        repository::CreateCategoryPayload {
            restaurant_id: restaurant.id,
            name: payload.body.name,
            description: payload.body.description,
            order_index: payload.body.order_index,
            is_active: payload.body.is_active,
        },
    )
    .await
    .map(response::Success::CategoryCreated)
    .map_err(|_| response::Error::FailedToCreateCategory)
}
