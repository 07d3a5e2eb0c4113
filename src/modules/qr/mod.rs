pub mod resolution;
mod routes;

pub use routes::get_router;
