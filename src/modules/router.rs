use super::{auth, category, menu_item, order, qr, restaurant, table, user};
use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

fn restaurant_router() -> Router<Arc<Context>> {
    restaurant::get_router()
        .nest("/:restaurant_id/tables", table::get_router())
        .nest("/:restaurant_id/categories", category::get_router())
        .nest("/:restaurant_id/menu-items", menu_item::get_router())
        .nest("/:restaurant_id/orders", order::get_restaurant_router())
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/auth", auth::get_router())
        .nest("/users", user::get_router())
        .nest("/restaurants", restaurant_router())
        .nest("/orders", order::get_router())
        .nest("/qr", qr::get_router())
}
