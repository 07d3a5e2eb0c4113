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
        pub name: String,
        #[serde(default)]
        pub description: String,
        #[validate(custom(function = "not_blank"))]
        pub address: String,
        #[validate(custom(function = "phone_number"))]
        pub phone: String,
        #[validate(email(code = "INVALID_EMAIL", message = "Invalid email address"))]
        pub email: String,
        pub logo: Option<String>,
        #[serde(default = "crate::utils::defaults::enabled")]
        pub is_active: bool,
    }

    pub struct Payload {
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::restaurant::repository::Restaurant;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        RestaurantCreated(Restaurant),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantCreated(restaurant) => {
                    (StatusCode::CREATED, Json(json!(restaurant))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        FailedToCreateRestaurant,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::FailedToCreateRestaurant => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create restaurant" })),
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

    fn body() -> Body {
        serde_json::from_value(serde_json::json!({
            "name": "Trattoria",
            "address": "1 Harbour Road",
            "phone": "+1 555 0100",
            "email": "hello@trattoria.test"
        }))
        .unwrap()
    }

    #[test]
    fn optional_fields_take_defaults() {
        let body = body();
        assert!(body.is_active);
        assert!(body.description.is_empty());
        assert!(body.logo.is_none());
        assert!(body.validate().is_ok());
    }

    #[test]
    fn rejects_blank_name_and_bad_contact_details() {
        let mut body = body();
        body.name = "  ".to_string();
        body.phone = "phone".to_string();
        body.email = "nope".to_string();

        let errors = body.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("email"));
    }
}
