use super::types::{request, response};
use crate::{
    modules::order::{repository, service as orders},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let order =
        repository::find_by_id_and_owner_id(&ctx.db_conn.pool, payload.order_id, payload.auth.user.id)
            .await
            .map_err(|_| response::Error::FailedToFetchOrder)?
            .ok_or(response::Error::OrderNotFound)?;

    orders::hydrate_one(&ctx.db_conn.pool, order)
        .await
        .map(response::Success::Order)
        .map_err(|_| response::Error::FailedToFetchOrder)
}
