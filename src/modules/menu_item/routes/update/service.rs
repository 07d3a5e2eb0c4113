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
        tracing::warn!("Failed to validate menu item update: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant = restaurant::repository::find_by_id_and_owner_id(
        &ctx.db_conn.pool,
        payload.restaurant_id,
        payload.auth.user.id,
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateMenuItem)?
    .ok_or(response::Error::MenuItemNotFound)?;

    let body = payload.body;
    if let Some(category_id) = body.category.clone() {
        category::repository::find_by_id_and_restaurant_id(
            &ctx.db_conn.pool,
            category_id,
            restaurant.id.clone(),
        )
        .await
        .map_err(|_| response::Error::FailedToUpdateMenuItem)?
        .ok_or_else(|| {
            response::Error::FailedToValidate(validation::single(
                "category",
                validation::error("INVALID_CATEGORY", "Category does not belong to this restaurant"),
            ))
        })?;
    }

    repository::update_by_id_and_restaurant_id(
        &ctx.db_conn.pool,
        payload.menu_item_id,
        restaurant.id,
        repository::UpdateMenuItemPayload {
            category_id: body.category,
            name: body.name,
            description: body.description,
            price: body.price.as_ref().map(money::to_currency),
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
    .map_err(|_| response::Error::FailedToUpdateMenuItem)?
    .map(response::Success::MenuItemUpdated)
    .ok_or(response::Error::MenuItemNotFound)
}
