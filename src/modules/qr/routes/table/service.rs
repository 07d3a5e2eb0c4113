use super::types::{request, response};
use crate::{modules::qr::resolution, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let mut conn = ctx.db_conn.pool.acquire().await.map_err(|err| {
        tracing::error!("Failed to acquire database connection: {}", err);
        response::Error::FailedToFetchTable
    })?;

    resolution::lookup(&mut *conn, payload.qr_code)
        .await
        .map(|resolved| response::Success::Table {
            table: resolved.table.into(),
            restaurant: resolved.restaurant,
        })
        .map_err(|err| match err {
            resolution::Error::InvalidQrCode => response::Error::InvalidQrCode,
            resolution::Error::UnexpectedError => response::Error::FailedToFetchTable,
        })
}
