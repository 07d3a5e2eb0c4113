mod get;
mod list;
mod update_status;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

/// Routes under `/orders`.
pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(get::get_router())
        .merge(update_status::get_router())
}

/// Routes under `/restaurants/:restaurant_id/orders`.
pub fn get_restaurant_router() -> Router<Arc<Context>> {
    list::get_router()
}
