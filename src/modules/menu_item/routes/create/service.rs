use super::types::{request, response};
use crate::{
    modules::{category, menu_item::repository, restaurant},
    types::Context,
    utils::{money, validation},
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate menu item payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant = restaurant::repository::find_by_id_and_owner_id(
        &ctx.db_conn.pool,
        payload.restaurant_id,
        payload.auth.user.id,
    )
    .await
    .map_err(|_| response::Error::FailedToCreateMenuItem)?
    .ok_or(response::Error::RestaurantNotFound)?;

    let body = payload.body;
    let category = category::repository::find_by_id_and_restaurant_id(
        &ctx.db_conn.pool,
        body.category.clone(),
        restaurant.id.clone(),
    )
    .await
    .map_err(|_| response::Error::FailedToCreateMenuItem)?
    .ok_or_else(|| {
        tracing::warn!(
            "Category {} does not belong to restaurant {}",
            body.category,
            restaurant.id
        );
        response::Error::FailedToValidate(validation::single(
            "category",
            validation::error("INVALID_CATEGORY", "Category does not belong to this restaurant"),
        ))
    })?;

    repository::create(
        &ctx.db_conn.pool,
        repository::CreateMenuItemPayload {
            restaurant_id: restaurant.id,
            category_id: category.id,
            name: body.name,
            description: body.description,
            price: money::to_currency(&body.price),
            image: body.image,
            ingredients: body.ingredients,
            allergens: body.allergens,
            is_available: body.is_available,
            is_vegetarian: body.is_vegetarian,
            is_vegan: body.is_vegan,
            preparation_time: body.preparation_time,
            order_index: body.order_index,
        },
    )
    .await
    .map(response::Success::MenuItemCreated)
    .map_err(|_| response::Error::FailedToCreateMenuItem)
}
