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
        pub name: Option<String>,
        pub description: Option<String>,
        #[validate(range(min = 0, code = "INVALID_ORDER_INDEX", message = "Order index cannot be negative"))]
        pub order_index: Option<i32>,
        pub is_active: Option<bool>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub restaurant_id: String,
        pub category_id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::category::repository::Category;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        CategoryUpdated(Category),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CategoryUpdated(category) => {
                    (StatusCode::OK, Json(json!(category))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        CategoryNotFound,
        FailedToUpdateCategory,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::CategoryNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Category not found" })),
                )
                    .into_response(),
                Self::FailedToUpdateCategory => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update category" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
