pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use crate::utils::validation::not_blank;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(
            custom(function = "not_blank"),
            length(max = 100, code = "NAME_TOO_LONG", message = "Name is too long")
        )]
        pub name: String,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        #[validate(range(min = 0, code = "INVALID_ORDER_INDEX", message = "Order index cannot be negative"))]
        pub order_index: i32,
        #[serde(default = "crate::utils::defaults::enabled")]
        pub is_active: bool,
    }

    pub struct Payload {
        pub auth: Auth,
        pub restaurant_id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::category::repository::Category;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        CategoryCreated(Category),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CategoryCreated(category) => {
                    (StatusCode::CREATED, Json(json!(category))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        RestaurantNotFound,
        FailedToCreateCategory,
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
                Self::FailedToCreateCategory => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create category" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
