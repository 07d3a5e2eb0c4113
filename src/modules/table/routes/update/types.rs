pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use crate::utils::validation::not_blank;
    use serde::Deserialize;
    use validator::Validate;

    /// `qr_code` is not accepted here; it is fixed when the table is created.
    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(
            custom(function = "not_blank"),
            length(max = 10, code = "TABLE_NUMBER_TOO_LONG", message = "Table number is too long")
        )]
        pub table_number: Option<String>,
        #[validate(range(min = 1, code = "INVALID_CAPACITY", message = "Capacity must be at least 1"))]
        pub capacity: Option<i32>,
        pub is_active: Option<bool>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub restaurant_id: String,
        pub table_id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::table::repository::TableWithQrUrl;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        TableUpdated(TableWithQrUrl),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::TableUpdated(table) => (StatusCode::OK, Json(json!(table))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        TableNotFound,
        DuplicateTableNumber,
        FailedToUpdateTable,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::TableNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Table not found" })),
                )
                    .into_response(),
                Self::DuplicateTableNumber => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "A table with this number already exists" })),
                )
                    .into_response(),
                Self::FailedToUpdateTable => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update table" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
