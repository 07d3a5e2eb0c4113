pub mod request {
    use crate::{modules::order::pricing::OrderLine, utils::validation::not_blank};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(
            custom(function = "not_blank"),
            length(max = 100, code = "NAME_TOO_LONG", message = "Name is too long")
        )]
        pub customer_name: String,
        #[serde(default)]
        pub special_instructions: String,
        #[validate(
            length(min = 1, code = "EMPTY_ORDER", message = "At least one item is required"),
            nested
        )]
        pub items: Vec<OrderLine>,
    }

    pub struct Payload {
        pub qr_code: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::order::repository::FullOrder;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        OrderCreated(FullOrder),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderCreated(order) => (StatusCode::CREATED, Json(json!(order))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        InvalidQrCode,
        FailedToCreateOrder,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::InvalidQrCode => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Invalid QR code" })),
                )
                    .into_response(),
                Self::FailedToCreateOrder => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create order" })),
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

    fn body(value: serde_json::Value) -> Body {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_a_minimal_order() {
        let body = body(serde_json::json!({
            "customer_name": "Alice",
            "items": [{"menu_item_id": "M", "quantity": 2}]
        }));
        assert!(body.validate().is_ok());
        assert!(body.special_instructions.is_empty());
    }

    #[test]
    fn empty_items_fail_validation() {
        let body = body(serde_json::json!({"customer_name": "Alice", "items": []}));
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn bad_lines_and_blank_name_are_reported() {
        let body = body(serde_json::json!({
            "customer_name": " ",
            "items": [{"menu_item_id": "M", "quantity": 0}]
        }));
        let errors = body.validate().unwrap_err();
        assert!(errors.errors().contains_key("customer_name"));
        assert!(errors.errors().contains_key("items"));
    }
}
