use super::types::{request, response};
use crate::{
    modules::{order, qr::resolution},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate order payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToCreateOrder
    })?;

    let resolved = resolution::lookup(&mut *tx, payload.qr_code)
        .await
        .map_err(|err| match err {
            resolution::Error::InvalidQrCode => response::Error::InvalidQrCode,
            resolution::Error::UnexpectedError => response::Error::FailedToCreateOrder,
        })?;

    let body = payload.body;
    let order = order::service::place(
        &mut *tx,
        order::service::PlaceOrderPayload {
            restaurant_id: resolved.restaurant.id,
            table_id: resolved.table.id,
            customer_name: body.customer_name.trim().to_string(),
            special_instructions: body.special_instructions,
            lines: body.items,
        },
    )
    .await
    .map_err(|err| match err {
        order::service::PlaceOrderError::FailedToValidate(errors) => {
            response::Error::FailedToValidate(errors)
        }
        order::service::PlaceOrderError::UnexpectedError => response::Error::FailedToCreateOrder,
    })?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToCreateOrder
    })?;

    tracing::info!(
        "Order {} placed at table {} for {}",
        order.order.id,
        order.order.table_number,
        order.order.total_amount
    );

    Ok(response::Success::OrderCreated(order))
}
