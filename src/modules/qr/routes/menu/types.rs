pub mod request {
    pub struct Payload {
        pub qr_code: String,
    }
}

pub mod response {
    use crate::modules::menu::MenuCategory;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    pub struct RestaurantSummary {
        pub id: String,
        pub name: String,
        pub description: String,
        pub logo: Option<String>,
    }

    #[derive(Serialize)]
    pub struct TableSummary {
        pub id: String,
        pub table_number: String,
        pub qr_code: String,
    }

    pub enum Success {
        Menu {
            restaurant: RestaurantSummary,
            table: TableSummary,
            menu: Vec<MenuCategory>,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Menu {
                    restaurant,
                    table,
                    menu,
                } => (
                    StatusCode::OK,
                    Json(json!({ "restaurant": restaurant, "table": table, "menu": menu })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        InvalidQrCode,
        FailedToFetchMenu,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidQrCode => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Invalid QR code" })),
                )
                    .into_response(),
                Self::FailedToFetchMenu => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch menu" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
