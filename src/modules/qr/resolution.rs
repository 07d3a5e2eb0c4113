use crate::modules::{restaurant, restaurant::repository::Restaurant, table, table::repository::Table};
use sqlx::PgConnection;

/// A table reached through its qr code, with its restaurant.
#[derive(Clone, Debug)]
pub struct ResolvedTable {
    pub table: Table,
    pub restaurant: Restaurant,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    InvalidQrCode,
    UnexpectedError,
}

/// Unknown codes, inactive tables and inactive restaurants all fail the
/// same way.
pub fn resolve(table: Option<Table>, restaurant: Option<Restaurant>) -> Result<ResolvedTable, Error> {
    match (table, restaurant) {
        (Some(table), Some(restaurant))
            if table.is_active
                && restaurant.is_active
                && table.restaurant_id == restaurant.id =>
        {
            Ok(ResolvedTable { table, restaurant })
        }
        _ => Err(Error::InvalidQrCode),
    }
}

/// Looks the code up on every call. Takes a connection so the lookup can
/// run inside the caller's transaction.
pub async fn lookup(conn: &mut PgConnection, qr_code: String) -> Result<ResolvedTable, Error> {
    let table = table::repository::find_by_qr_code(&mut *conn, qr_code)
        .await
        .map_err(|_| Error::UnexpectedError)?;

    let restaurant = match &table {
        Some(table) => restaurant::repository::find_by_id(&mut *conn, table.restaurant_id.clone())
            .await
            .map_err(|_| Error::UnexpectedError)?,
        None => None,
    };

    resolve(table, restaurant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(is_active: bool) -> Restaurant {
        Restaurant {
            id: "R".to_string(),
            owner_id: "U".to_string(),
            name: "Trattoria".to_string(),
            description: String::new(),
            address: "1 Harbour Road".to_string(),
            phone: "555 0100".to_string(),
            email: "hello@trattoria.test".to_string(),
            logo: None,
            is_active,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }

    fn table(is_active: bool) -> Table {
        Table {
            id: "T".to_string(),
            restaurant_id: "R".to_string(),
            table_number: "1".to_string(),
            capacity: 4,
            qr_code: "abc-123".to_string(),
            is_active,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }

    #[test]
    fn active_table_of_active_restaurant_resolves() {
        let resolved = resolve(Some(table(true)), Some(restaurant(true))).unwrap();
        assert_eq!(resolved.table.id, "T");
        assert_eq!(resolved.restaurant.id, "R");
    }

    #[test]
    fn every_failure_is_the_same_error() {
        let failures = [
            resolve(None, None),
            resolve(Some(table(false)), Some(restaurant(true))),
            resolve(Some(table(true)), Some(restaurant(false))),
            resolve(Some(table(true)), None),
        ];

        for failure in failures {
            assert_eq!(failure.unwrap_err(), Error::InvalidQrCode);
        }
    }

    #[test]
    fn mismatched_restaurant_does_not_resolve() {
        let mut other = restaurant(true);
        other.id = "OTHER".to_string();
        assert_eq!(
            resolve(Some(table(true)), Some(other)).unwrap_err(),
            Error::InvalidQrCode
        );
    }
}
