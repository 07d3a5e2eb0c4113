use super::types::{request, response};
use crate::{modules::restaurant::repository, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate restaurant payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let body = payload.body;
    let restaurant = repository::create(
        &ctx.db_conn.pool,
        repository::CreateRestaurantPayload {
            name: body.name,
            description: body.description,
            address: body.address,
            phone: body.phone,
            email: body.email,
            logo: body.logo,
            is_active: body.is_active,
            owner_id: payload.auth.user.id,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateRestaurant)?;

    tracing::info!("Restaurant {} created", restaurant.id);

    Ok(response::Success::RestaurantCreated(restaurant))
}
