use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Category {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub description: String,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct CreateCategoryPayload {
    pub restaurant_id: String,
    pub name: String,
    pub description: String,
    pub order_index: i32,
    pub is_active: bool,
}

pub struct UpdateCategoryPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub order_index: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateCategoryPayload,
) -> Result<Category, Error> {
    sqlx::query_as::<_, Category>(
        "
        INSERT INTO categories (id, restaurant_id, name, description, order_index, is_active)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.restaurant_id)
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.order_index)
    .bind(payload.is_active)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a category: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_many_by_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
) -> Result<Vec<Category>, Error> {
    sqlx::query_as::<_, Category>(
        "SELECT * FROM categories WHERE restaurant_id = $1 ORDER BY order_index, name",
    )
    .bind(&restaurant_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch categories of restaurant {}: {}",
            restaurant_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_by_id_and_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    restaurant_id: String,
) -> Result<Option<Category>, Error> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1 AND restaurant_id = $2")
        .bind(&id)
        .bind(restaurant_id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch category {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_by_name_and_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    name: String,
    restaurant_id: String,
) -> Result<Option<Category>, Error> {
    sqlx::query_as::<_, Category>(
        "
        SELECT * FROM categories
        WHERE name = $1 AND restaurant_id = $2
        ORDER BY created_at
        LIMIT 1
        ",
    )
    .bind(&name)
    .bind(restaurant_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch category named {}: {}",
            name,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn update_by_id_and_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    restaurant_id: String,
    payload: UpdateCategoryPayload,
) -> Result<Option<Category>, Error> {
    sqlx::query_as::<_, Category>(
        "
        UPDATE categories SET
            name = COALESCE($3, name),
            description = COALESCE($4, description),
            order_index = COALESCE($5, order_index),
            is_active = COALESCE($6, is_active),
            updated_at = NOW()
        WHERE id = $1 AND restaurant_id = $2
        RETURNING *
        ",
    )
    .bind(&id)
    .bind(restaurant_id)
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.order_index)
    .bind(payload.is_active)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to update category {}: {}", id, err);
        Error::UnexpectedError
    })
}
