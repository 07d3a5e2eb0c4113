pub mod request {
    pub struct Payload {
        pub qr_code: String,
    }
}

pub mod response {
    use crate::modules::{restaurant::repository::Restaurant, table::repository::TableWithQrUrl};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Table {
            table: TableWithQrUrl,
            restaurant: Restaurant,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Table { table, restaurant } => (
                    StatusCode::OK,
                    Json(json!({ "table": table, "restaurant": restaurant })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        InvalidQrCode,
        FailedToFetchTable,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidQrCode => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Invalid QR code" })),
                )
                    .into_response(),
                Self::FailedToFetchTable => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch table" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
