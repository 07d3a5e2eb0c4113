use super::types::{request, response};
use crate::{
    modules::{category, menu, menu_item, qr::resolution},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let mut conn = ctx.db_conn.pool.acquire().await.map_err(|err| {
        tracing::error!("Failed to acquire database connection: {}", err);
        response::Error::FailedToFetchMenu
    })?;

    let resolved = resolution::lookup(&mut *conn, payload.qr_code)
        .await
        .map_err(|err| match err {
            resolution::Error::InvalidQrCode => response::Error::InvalidQrCode,
            resolution::Error::UnexpectedError => response::Error::FailedToFetchMenu,
        })?;

    let categories =
        category::repository::find_many_by_restaurant_id(&mut *conn, resolved.restaurant.id.clone())
            .await
            .map_err(|_| response::Error::FailedToFetchMenu)?;
    let items =
        menu_item::repository::find_many_by_restaurant_id(&mut *conn, resolved.restaurant.id.clone())
            .await
            .map_err(|_| response::Error::FailedToFetchMenu)?;

    Ok(response::Success::Menu {
        restaurant: response::RestaurantSummary {
            id: resolved.restaurant.id,
            name: resolved.restaurant.name,
            description: resolved.restaurant.description,
            logo: resolved.restaurant.logo,
        },
        table: response::TableSummary {
            id: resolved.table.id,
            table_number: resolved.table.table_number,
            qr_code: resolved.table.qr_code,
        },
        menu: menu::assemble(categories, items),
    })
}
