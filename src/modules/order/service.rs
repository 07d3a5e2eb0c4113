use super::{
    pricing::{self, OrderLine},
    repository::{self, FullOrder, Order},
};
use crate::modules::menu_item;
use itertools::Itertools;
use sqlx::{PgConnection, PgPool};
use validator::ValidationErrors;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Loads items and referenced menu items for already fetched orders.
pub async fn hydrate(pool: &PgPool, orders: Vec<Order>) -> Result<Vec<FullOrder>, Error> {
    let order_ids = orders.iter().map(|order| order.id.clone()).collect();
    let items = repository::find_items_by_order_ids(pool, order_ids)
        .await
        .map_err(|_| Error::UnexpectedError)?;

    let menu_item_ids = items
        .iter()
        .map(|item| item.menu_item_id.clone())
        .unique()
        .collect();
    let menu_items = menu_item::repository::find_many_by_ids(pool, menu_item_ids)
        .await
        .map_err(|_| Error::UnexpectedError)?;

    Ok(repository::into_full_orders(orders, items, menu_items))
}

pub async fn hydrate_one(pool: &PgPool, order: Order) -> Result<FullOrder, Error> {
    hydrate(pool, vec![order])
        .await?
        .into_iter()
        .next()
        .ok_or(Error::UnexpectedError)
}

pub struct PlaceOrderPayload {
    pub restaurant_id: String,
    pub table_id: String,
    pub customer_name: String,
    pub special_instructions: String,
    pub lines: Vec<OrderLine>,
}

pub enum PlaceOrderError {
    FailedToValidate(ValidationErrors),
    UnexpectedError,
}

/// Prices the lines against the restaurant's current menu and writes the
/// order with its items. Runs on the caller's connection so it can share
/// a transaction with the table lookup.
pub async fn place(
    conn: &mut PgConnection,
    payload: PlaceOrderPayload,
) -> Result<FullOrder, PlaceOrderError> {
    let menu_item_ids = payload
        .lines
        .iter()
        .map(|line| line.menu_item_id.clone())
        .unique()
        .collect();
    let menu_items = menu_item::repository::find_many_by_ids(&mut *conn, menu_item_ids)
        .await
        .map_err(|_| PlaceOrderError::UnexpectedError)?;

    let priced = pricing::price_lines(&payload.restaurant_id, &payload.lines, &menu_items)
        .map_err(|errors| {
            tracing::warn!("Rejected order lines: {errors}");
            PlaceOrderError::FailedToValidate(errors)
        })?;

    let order = repository::create(
        &mut *conn,
        repository::CreateOrderPayload {
            restaurant_id: payload.restaurant_id,
            table_id: payload.table_id,
            customer_name: payload.customer_name,
            special_instructions: payload.special_instructions,
            total_amount: priced.total_amount,
        },
    )
    .await
    .map_err(|_| PlaceOrderError::UnexpectedError)?;

    let items = repository::create_items(&mut *conn, order.id.clone(), priced.lines)
        .await
        .map_err(|_| PlaceOrderError::UnexpectedError)?;

    repository::into_full_orders(vec![order], items, menu_items)
        .into_iter()
        .next()
        .ok_or(PlaceOrderError::UnexpectedError)
}
