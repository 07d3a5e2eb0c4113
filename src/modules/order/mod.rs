pub mod pricing;
pub mod repository;
mod routes;
pub mod service;
pub mod status;

pub use routes::{get_restaurant_router, get_router};
