pub mod database;
pub mod defaults;
pub mod money;
pub mod pagination;
pub mod password;
pub mod validation;
