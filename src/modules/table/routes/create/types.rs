pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use crate::utils::validation::not_blank;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(
            custom(function = "not_blank"),
            length(max = 10, code = "TABLE_NUMBER_TOO_LONG", message = "Table number is too long")
        )]
        pub table_number: String,
        #[validate(range(min = 1, code = "INVALID_CAPACITY", message = "Capacity must be at least 1"))]
        pub capacity: i32,
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
    use crate::modules::table::repository::TableWithQrUrl;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        TableCreated(TableWithQrUrl),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::TableCreated(table) => (StatusCode::CREATED, Json(json!(table))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        RestaurantNotFound,
        DuplicateTableNumber,
        FailedToCreateTable,
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
                Self::DuplicateTableNumber => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "A table with this number already exists" })),
                )
                    .into_response(),
                Self::FailedToCreateTable => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create table" })),
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

    #[test]
    fn qr_code_in_body_is_ignored() {
        let body: Body = serde_json::from_str(
            r#"{"table_number": "12", "capacity": 2, "qr_code": "chosen-by-client"}"#,
        )
        .unwrap();
        assert!(body.validate().is_ok());
        assert!(body.is_active);
    }

    #[test]
    fn capacity_must_be_positive() {
        let body: Body = serde_json::from_str(r#"{"table_number": "1", "capacity": 0}"#).unwrap();
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("capacity"));
    }
}
