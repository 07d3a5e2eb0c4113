use super::types::{request, response};
use crate::{modules::restaurant::repository, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate restaurant update: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let body = payload.body;
    repository::update_by_id_and_owner_id(
        &ctx.db_conn.pool,
        payload.restaurant_id,
        payload.auth.user.id,
        repository::UpdateRestaurantPayload {
            name: body.name,
            description: body.description,
            address: body.address,
            phone: body.phone,
            email: body.email,
            logo: body.logo,
            is_active: body.is_active,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateRestaurant)?
    .map(response::Success::RestaurantUpdated)
    .ok_or(response::Error::RestaurantNotFound)
}
