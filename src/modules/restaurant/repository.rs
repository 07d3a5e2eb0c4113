use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Restaurant {
    pub id: String,
    #[serde(skip_serializing)]
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub logo: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct CreateRestaurantPayload {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub logo: Option<String>,
    pub is_active: bool,
    pub owner_id: String,
}

#[derive(Default)]
pub struct UpdateRestaurantPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateRestaurantPayload,
) -> Result<Restaurant, Error> {
    sqlx::query_as::<_, Restaurant>(
        "
        INSERT INTO restaurants (
            id,
            owner_id,
            name,
            description,
            address,
            phone,
            email,
            logo,
            is_active
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.owner_id)
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.address)
    .bind(payload.phone)
    .bind(payload.email)
    .bind(payload.logo)
    .bind(payload.is_active)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a restaurant: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_many_by_owner_id<'e, E: PgExecutor<'e>>(
    e: E,
    owner_id: String,
) -> Result<Vec<Restaurant>, Error> {
    sqlx::query_as::<_, Restaurant>(
        "SELECT * FROM restaurants WHERE owner_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(&owner_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch restaurants of owner {}: {}",
            owner_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Restaurant>, Error> {
    sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = $1")
        .bind(&id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch restaurant {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_by_id_and_owner_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    owner_id: String,
) -> Result<Option<Restaurant>, Error> {
    sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = $1 AND owner_id = $2")
        .bind(&id)
        .bind(&owner_id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch restaurant {} of owner {}: {}",
                id,
                owner_id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_by_name_and_owner_id<'e, E: PgExecutor<'e>>(
    e: E,
    name: String,
    owner_id: String,
) -> Result<Option<Restaurant>, Error> {
    sqlx::query_as::<_, Restaurant>(
        "SELECT * FROM restaurants WHERE name = $1 AND owner_id = $2 ORDER BY created_at LIMIT 1",
    )
    .bind(&name)
    .bind(&owner_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch restaurant named {}: {}",
            name,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn update_by_id_and_owner_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    owner_id: String,
    payload: UpdateRestaurantPayload,
) -> Result<Option<Restaurant>, Error> {
    sqlx::query_as::<_, Restaurant>(
        "
        UPDATE restaurants SET
            name = COALESCE($3, name),
            description = COALESCE($4, description),
            address = COALESCE($5, address),
            phone = COALESCE($6, phone),
            email = COALESCE($7, email),
            logo = COALESCE($8, logo),
            is_active = COALESCE($9, is_active),
            updated_at = NOW()
        WHERE id = $1 AND owner_id = $2
        RETURNING *
        ",
    )
    .bind(&id)
    .bind(owner_id)
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.address)
    .bind(payload.phone)
    .bind(payload.email)
    .bind(payload.logo)
    .bind(payload.is_active)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to update restaurant {}: {}", id, err);
        Error::UnexpectedError
    })
}
