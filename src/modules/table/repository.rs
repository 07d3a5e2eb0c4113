use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Table {
    pub id: String,
    pub restaurant_id: String,
    pub table_number: String,
    pub capacity: i32,
    pub qr_code: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// A table as returned to clients, with the customer-facing menu link.
#[derive(Serialize, Clone, Debug)]
pub struct TableWithQrUrl {
    #[serde(flatten)]
    pub table: Table,
    pub qr_url: String,
}

pub fn qr_url(qr_code: &str) -> String {
    format!("/menu/{}", qr_code)
}

impl From<Table> for TableWithQrUrl {
    fn from(table: Table) -> Self {
        Self {
            qr_url: qr_url(&table.qr_code),
            table,
        }
    }
}

pub struct CreateTablePayload {
    pub restaurant_id: String,
    pub table_number: String,
    pub capacity: i32,
    pub is_active: bool,
}

pub struct UpdateTablePayload {
    pub table_number: Option<String>,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug)]
pub enum Error {
    DuplicateTableNumber,
    UnexpectedError,
}

fn map_write_error(err: sqlx::Error, action: &str) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return Error::DuplicateTableNumber;
        }
    }

    tracing::error!("Error occurred while trying to {}: {}", action, err);
    Error::UnexpectedError
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateTablePayload) -> Result<Table, Error> {
    sqlx::query_as::<_, Table>(
        "
        INSERT INTO restaurant_tables (
            id,
            restaurant_id,
            table_number,
            capacity,
            qr_code,
            is_active
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.restaurant_id)
    .bind(payload.table_number)
    .bind(payload.capacity)
    .bind(Ulid::new().to_string())
    .bind(payload.is_active)
    .fetch_one(e)
    .await
    .map_err(|err| map_write_error(err, "create a table"))
}

pub async fn find_many_by_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
) -> Result<Vec<Table>, Error> {
    sqlx::query_as::<_, Table>(
        "
        SELECT * FROM restaurant_tables
        WHERE restaurant_id = $1
        ORDER BY LENGTH(table_number), table_number
        ",
    )
    .bind(&restaurant_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch tables of restaurant {}: {}",
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
) -> Result<Option<Table>, Error> {
    sqlx::query_as::<_, Table>(
        "SELECT * FROM restaurant_tables WHERE id = $1 AND restaurant_id = $2",
    )
    .bind(&id)
    .bind(restaurant_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch table {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn find_by_qr_code<'e, E: PgExecutor<'e>>(
    e: E,
    qr_code: String,
) -> Result<Option<Table>, Error> {
    sqlx::query_as::<_, Table>("SELECT * FROM restaurant_tables WHERE qr_code = $1")
        .bind(&qr_code)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch table by qr code {}: {}",
                qr_code,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn count_by_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
) -> Result<i64, Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM restaurant_tables WHERE restaurant_id = $1")
        .bind(&restaurant_id)
        .fetch_one(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to count tables of restaurant {}: {}",
                restaurant_id,
                err
            );
            Error::UnexpectedError
        })
}

/// The qr code column is never part of an update.
pub async fn update_by_id_and_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    restaurant_id: String,
    payload: UpdateTablePayload,
) -> Result<Option<Table>, Error> {
    sqlx::query_as::<_, Table>(
        "
        UPDATE restaurant_tables SET
            table_number = COALESCE($3, table_number),
            capacity = COALESCE($4, capacity),
            is_active = COALESCE($5, is_active),
            updated_at = NOW()
        WHERE id = $1 AND restaurant_id = $2
        RETURNING *
        ",
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(payload.table_number)
    .bind(payload.capacity)
    .bind(payload.is_active)
    .fetch_optional(e)
    .await
    .map_err(|err| map_write_error(err, "update a table"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table {
            id: "01J0TABLE".to_string(),
            restaurant_id: "01J0RESTAURANT".to_string(),
            table_number: "7".to_string(),
            capacity: 4,
            qr_code: "abc-123".to_string(),
            is_active: true,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }

    #[test]
    fn qr_url_points_at_customer_menu() {
        assert_eq!(qr_url("abc-123"), "/menu/abc-123");
    }

    #[test]
    fn table_response_is_flat_with_qr_url() {
        let value = serde_json::to_value(TableWithQrUrl::from(table())).unwrap();
        assert_eq!(value["table_number"], "7");
        assert_eq!(value["qr_code"], "abc-123");
        assert_eq!(value["qr_url"], "/menu/abc-123");
    }
}
