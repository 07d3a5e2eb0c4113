pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use crate::utils::{money::validate_price, validation::not_blank};
    use bigdecimal::BigDecimal;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(custom(function = "not_blank"))]
        pub category: Option<String>,
        #[validate(
            custom(function = "not_blank"),
            length(max = 200, code = "NAME_TOO_LONG", message = "Name is too long")
        )]
        pub name: Option<String>,
        pub description: Option<String>,
        #[validate(custom(function = "validate_price"))]
        pub price: Option<BigDecimal>,
        pub image: Option<String>,
        pub ingredients: Option<String>,
        pub allergens: Option<String>,
        pub is_available: Option<bool>,
        pub is_vegetarian: Option<bool>,
        pub is_vegan: Option<bool>,
        #[validate(range(
            min = 0,
            code = "INVALID_PREPARATION_TIME",
            message = "Preparation time cannot be negative"
        ))]
        pub preparation_time: Option<i32>,
        #[validate(range(min = 0, code = "INVALID_ORDER_INDEX", message = "Order index cannot be negative"))]
        pub order_index: Option<i32>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub restaurant_id: String,
        pub menu_item_id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::menu_item::repository::MenuItem;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        MenuItemUpdated(MenuItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItemUpdated(item) => (StatusCode::OK, Json(json!(item))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        MenuItemNotFound,
        FailedToUpdateMenuItem,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::MenuItemNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Menu item not found" })),
                )
                    .into_response(),
                Self::FailedToUpdateMenuItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update menu item" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
