pub mod auth;
pub mod category;
pub mod menu;
pub mod menu_item;
pub mod order;
pub mod qr;
pub mod restaurant;
pub mod table;
pub mod user;

mod router;
pub use router::get_router;
