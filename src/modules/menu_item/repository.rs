use crate::utils::money;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    #[serde(rename = "category")]
    pub category_id: String,
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "money::serialize")]
    pub price: BigDecimal,
    pub image: Option<String>,
    pub ingredients: String,
    pub allergens: String,
    pub is_available: bool,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub preparation_time: i32,
    pub order_index: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct CreateMenuItemPayload {
    pub restaurant_id: String,
    pub category_id: String,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub image: Option<String>,
    pub ingredients: String,
    pub allergens: String,
    pub is_available: bool,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub preparation_time: i32,
    pub order_index: i32,
}

#[derive(Default)]
pub struct UpdateMenuItemPayload {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub image: Option<String>,
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    pub is_available: Option<bool>,
    pub is_vegetarian: Option<bool>,
    pub is_vegan: Option<bool>,
    pub preparation_time: Option<i32>,
    pub order_index: Option<i32>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateMenuItemPayload,
) -> Result<MenuItem, Error> {
    sqlx::query_as::<_, MenuItem>(
        "
        INSERT INTO menu_items (
            id,
            restaurant_id,
            category_id,
            name,
            description,
            price,
            image,
            ingredients,
            allergens,
            is_available,
            is_vegetarian,
            is_vegan,
            preparation_time,
            order_index
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.restaurant_id)
    .bind(payload.category_id)
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.image)
    .bind(payload.ingredients)
    .bind(payload.allergens)
    .bind(payload.is_available)
    .bind(payload.is_vegetarian)
    .bind(payload.is_vegan)
    .bind(payload.preparation_time)
    .bind(payload.order_index)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a menu item: {}", err);
        Error::UnexpectedError
    })
}

/// Every item of a restaurant, available or not, in menu order.
pub async fn find_many_by_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
) -> Result<Vec<MenuItem>, Error> {
    sqlx::query_as::<_, MenuItem>(
        "
        SELECT menu_items.*
        FROM menu_items
        INNER JOIN categories ON categories.id = menu_items.category_id
        WHERE menu_items.restaurant_id = $1
        ORDER BY categories.order_index, menu_items.order_index, menu_items.name
        ",
    )
    .bind(&restaurant_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch menu items of restaurant {}: {}",
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
) -> Result<Option<MenuItem>, Error> {
    sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = $1 AND restaurant_id = $2")
        .bind(&id)
        .bind(restaurant_id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch menu item {}: {}", id, err);
            Error::UnexpectedError
        })
}

/// Looks items up by id regardless of restaurant. Callers check ownership.
pub async fn find_many_by_ids<'e, E: PgExecutor<'e>>(
    e: E,
    ids: Vec<String>,
) -> Result<Vec<MenuItem>, Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = ANY($1)")
        .bind(&ids)
        .fetch_all(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch menu items by id: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_by_name_and_category_id<'e, E: PgExecutor<'e>>(
    e: E,
    name: String,
    category_id: String,
) -> Result<Option<MenuItem>, Error> {
    sqlx::query_as::<_, MenuItem>(
        "
        SELECT * FROM menu_items
        WHERE name = $1 AND category_id = $2
        ORDER BY created_at
        LIMIT 1
        ",
    )
    .bind(&name)
    .bind(category_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch menu item named {}: {}",
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
    payload: UpdateMenuItemPayload,
) -> Result<Option<MenuItem>, Error> {
    sqlx::query_as::<_, MenuItem>(
        "
        UPDATE menu_items SET
            category_id = COALESCE($3, category_id),
            name = COALESCE($4, name),
            description = COALESCE($5, description),
            price = COALESCE($6, price),
            image = COALESCE($7, image),
            ingredients = COALESCE($8, ingredients),
            allergens = COALESCE($9, allergens),
            is_available = COALESCE($10, is_available),
            is_vegetarian = COALESCE($11, is_vegetarian),
            is_vegan = COALESCE($12, is_vegan),
            preparation_time = COALESCE($13, preparation_time),
            order_index = COALESCE($14, order_index),
            updated_at = NOW()
        WHERE id = $1 AND restaurant_id = $2
        RETURNING *
        ",
    )
    .bind(&id)
    .bind(restaurant_id)
    .bind(payload.category_id)
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.image)
    .bind(payload.ingredients)
    .bind(payload.allergens)
    .bind(payload.is_available)
    .bind(payload.is_vegetarian)
    .bind(payload.is_vegan)
    .bind(payload.preparation_time)
    .bind(payload.order_index)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to update menu item {}: {}", id, err);
        Error::UnexpectedError
    })
}
