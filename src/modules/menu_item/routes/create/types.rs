pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use crate::utils::{money::validate_price, validation::not_blank};
    use bigdecimal::BigDecimal;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(custom(function = "not_blank"))]
        pub category: String,
        #[validate(
            custom(function = "not_blank"),
            length(max = 200, code = "NAME_TOO_LONG", message = "Name is too long")
        )]
        pub name: String,
        #[serde(default)]
        pub description: String,
        #[validate(custom(function = "validate_price"))]
        pub price: BigDecimal,
        pub image: Option<String>,
        #[serde(default)]
        pub ingredients: String,
        #[serde(default)]
        pub allergens: String,
        #[serde(default = "crate::utils::defaults::enabled")]
        pub is_available: bool,
        #[serde(default)]
        pub is_vegetarian: bool,
        #[serde(default)]
        pub is_vegan: bool,
        #[validate(range(
            min = 0,
            code = "INVALID_PREPARATION_TIME",
            message = "Preparation time cannot be negative"
        ))]
        pub preparation_time: i32,
        #[serde(default)]
        #[validate(range(min = 0, code = "INVALID_ORDER_INDEX", message = "Order index cannot be negative"))]
        pub order_index: i32,
    }

    pub struct Payload {
        pub auth: Auth,
        pub restaurant_id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::menu_item::repository::MenuItem;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        MenuItemCreated(MenuItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItemCreated(item) => (StatusCode::CREATED, Json(json!(item))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        RestaurantNotFound,
        FailedToCreateMenuItem,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::RestaurantNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Restaurant not found" })),
                )
                    .into_response(),
                Self::FailedToCreateMenuItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create menu item" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}

#[cfg(test)]
mod tests {
    use super::request::Body;
    use validator::Validate;

    fn body(price: &str) -> Body {
        serde_json::from_value(serde_json::json!({
            "category": "01J0CATEGORY",
            "name": "Margherita Pizza",
            "price": price,
            "preparation_time": 15
        }))
        .unwrap()
    }

    #[test]
    fn flags_default_to_an_available_non_vegetarian_item() {
        let body = body("12.50");
        assert!(body.validate().is_ok());
        assert!(body.is_available);
        assert!(!body.is_vegetarian);
        assert!(!body.is_vegan);
    }

    #[test]
    fn price_precision_and_sign_are_checked() {
        assert!(body("-0.01").validate().unwrap_err().field_errors().contains_key("price"));
        assert!(body("9.999").validate().unwrap_err().field_errors().contains_key("price"));
    }
}
