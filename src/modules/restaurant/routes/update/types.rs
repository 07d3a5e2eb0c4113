pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use crate::utils::validation::{not_blank, phone_number};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(
            custom(function = "not_blank"),
            length(max = 200, code = "NAME_TOO_LONG", message = "Name is too long")
        )]
        pub name: Option<String>,
        pub description: Option<String>,
        #[validate(custom(function = "not_blank"))]
        pub address: Option<String>,
        #[validate(custom(function = "phone_number"))]
        pub phone: Option<String>,
        #[validate(email(code = "INVALID_EMAIL", message = "Invalid email address"))]
        pub email: Option<String>,
        pub logo: Option<String>,
        pub is_active: Option<bool>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub restaurant_id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::restaurant::repository::Restaurant;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        RestaurantUpdated(Restaurant),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantUpdated(restaurant) => {
                    (StatusCode::OK, Json(json!(restaurant))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        RestaurantNotFound,
        FailedToUpdateRestaurant,
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
                Self::FailedToUpdateRestaurant => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update restaurant" })),
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
    fn empty_update_is_valid() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert!(body.validate().is_ok());
    }

    #[test]
    fn present_fields_are_still_checked() {
        let body: Body = serde_json::from_str(r#"{"name": "", "email": "x"}"#).unwrap();
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("email"));
    }
}
