use super::types::{request, response};
use crate::{
    modules::{
        order::{repository, service as orders, status::OrderStatus},
        restaurant,
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let status = payload
        .filters
        .status
        .filter(|status| !status.is_empty())
        .map(|status| status.parse::<OrderStatus>())
        .transpose()
        .map_err(|err| {
            tracing::warn!("Rejected order status filter: {}", err);
            response::Error::InvalidStatusFilter
        })?;

    let restaurant = restaurant::repository::find_by_id_and_owner_id(
        &ctx.db_conn.pool,
        payload.restaurant_id,
        payload.auth.user.id,
    )
    .await
    .map_err(|_| response::Error::FailedToFetchOrders)?
    .ok_or(response::Error::RestaurantNotFound)?;

    let filters = repository::Filters { status };
    let total = repository::count_by_restaurant_id(&ctx.db_conn.pool, restaurant.id.clone(), &filters)
        .await
        .map_err(|_| response::Error::FailedToFetchOrders)?;
    let orders = repository::find_many_by_restaurant_id(
        &ctx.db_conn.pool,
        restaurant.id,
        &filters,
        &payload.pagination,
    )
    .await
    .map_err(|_| response::Error::FailedToFetchOrders)?;

    let orders = orders::hydrate(&ctx.db_conn.pool, orders)
        .await
        .map_err(|_| response::Error::FailedToFetchOrders)?;

    Ok(response::Success::Orders(
        payload.pagination.wrap(orders, total as u32),
    ))
}
