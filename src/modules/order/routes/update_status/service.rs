use super::types::{request, response};
use crate::{
    modules::order::{
        repository,
        service as orders,
        status::{OrderStatus, Transition},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let order = repository::find_by_id_and_owner_id(
        &ctx.db_conn.pool,
        payload.order_id,
        payload.auth.user.id.clone(),
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateOrderStatus)?
    .ok_or(response::Error::OrderNotFound)?;

    let status = payload
        .body
        .status
        .as_deref()
        .ok_or(response::Error::InvalidStatus)?
        .parse::<OrderStatus>()
        .map_err(|err| {
            tracing::warn!("Rejected status for order {}: {}", order.id, err);
            response::Error::InvalidStatus
        })?;

    let transition = ctx
        .orders
        .status_policy
        .check(order.status, status)
        .map_err(|err| {
            tracing::warn!("Rejected status change for order {}: {}", order.id, err);
            response::Error::InvalidTransition(err.to_string())
        })?;

    let order = match transition {
        Transition::Unchanged => order,
        Transition::Changed => {
            let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
                tracing::error!("Failed to start database transaction: {}", err);
                response::Error::FailedToUpdateOrderStatus
            })?;

            let updated =
                repository::update_status(&mut *tx, order.id.clone(), order.status, status)
                    .await
                    .map_err(|_| response::Error::FailedToUpdateOrderStatus)?
                    .ok_or_else(|| {
                        tracing::warn!("Status of order {} changed concurrently", order.id);
                        response::Error::StatusChangedConcurrently
                    })?;

            repository::record_status_update(
                &mut *tx,
                repository::StatusUpdatePayload {
                    order_id: updated.id.clone(),
                    from: order.status,
                    to: status,
                    changed_by: payload.auth.user.id,
                },
            )
            .await
            .map_err(|_| response::Error::FailedToUpdateOrderStatus)?;

            tx.commit().await.map_err(|err| {
                tracing::error!("Failed to commit database transaction: {}", err);
                response::Error::FailedToUpdateOrderStatus
            })?;

            tracing::info!(
                "Order {} moved from {} to {}",
                updated.id,
                order.status,
                status
            );

            updated
        }
    };

    orders::hydrate_one(&ctx.db_conn.pool, order)
        .await
        .map(response::Success::Order)
        .map_err(|_| response::Error::FailedToUpdateOrderStatus)
}
