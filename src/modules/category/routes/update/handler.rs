use super::{service::service, types::request};
use crate::{types::Context, utils::validation::Json};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    auth: request::Auth,
    Path((restaurant_id, category_id)): Path<(String, String)>,
    Json(body): Json<request::Body>,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            auth,
            restaurant_id,
            category_id,
            body,
        },
    )
    .await
}
