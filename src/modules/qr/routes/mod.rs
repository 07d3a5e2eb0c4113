mod menu;
mod order;
mod table;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/:qr_code/menu", menu::get_router())
        .nest("/:qr_code/table", table::get_router())
        .nest("/:qr_code/order", order::get_router())
}
