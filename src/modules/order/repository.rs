use super::{pricing::PricedLine, status::OrderStatus};
use crate::{
    modules::menu_item::repository::MenuItem,
    utils::{money, pagination::Pagination},
};
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::Serialize;
use sqlx::PgExecutor;
use std::collections::HashMap;
use ulid::Ulid;

/// An order row joined with the number of the table it was placed from.
#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct Order {
    pub id: String,
    pub restaurant_id: String,
    pub table_id: String,
    pub table_number: String,
    pub customer_name: String,
    pub status: OrderStatus,
    #[serde(serialize_with = "money::serialize")]
    pub total_amount: BigDecimal,
    pub special_instructions: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct OrderItem {
    pub id: String,
    #[serde(skip_serializing)]
    pub order_id: String,
    pub menu_item_id: String,
    #[serde(skip_serializing)]
    pub position: i32,
    pub quantity: i32,
    #[serde(serialize_with = "money::serialize")]
    pub unit_price: BigDecimal,
    pub special_instructions: String,
    #[serde(skip_serializing)]
    pub created_at: NaiveDateTime,
}

#[derive(Serialize, Clone, Debug)]
pub struct FullOrderItem {
    #[serde(flatten)]
    pub item: OrderItem,
    pub menu_item: Option<MenuItem>,
    #[serde(serialize_with = "money::serialize")]
    pub subtotal: BigDecimal,
}

#[derive(Serialize, Clone, Debug)]
pub struct FullOrder {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<FullOrderItem>,
}

pub struct CreateOrderPayload {
    pub restaurant_id: String,
    pub table_id: String,
    pub customer_name: String,
    pub special_instructions: String,
    pub total_amount: BigDecimal,
}

pub struct StatusUpdatePayload {
    pub order_id: String,
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub changed_by: String,
}

#[derive(Default)]
pub struct Filters {
    pub status: Option<OrderStatus>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

const SELECT_ORDER: &str = "
    SELECT orders.*, restaurant_tables.table_number
    FROM orders
    INNER JOIN restaurant_tables ON restaurant_tables.id = orders.table_id
";

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateOrderPayload) -> Result<Order, Error> {
    sqlx::query_as::<_, Order>(
        "
        WITH inserted AS (
            INSERT INTO orders (
                id,
                restaurant_id,
                table_id,
                customer_name,
                status,
                total_amount,
                special_instructions
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
        )
        SELECT inserted.*, restaurant_tables.table_number
        FROM inserted
        INNER JOIN restaurant_tables ON restaurant_tables.id = inserted.table_id
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.restaurant_id)
    .bind(payload.table_id)
    .bind(payload.customer_name)
    .bind(OrderStatus::Pending.as_str())
    .bind(money::to_currency(&payload.total_amount))
    .bind(payload.special_instructions)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create an order: {}", err);
        Error::UnexpectedError
    })
}

pub async fn create_items<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
    lines: Vec<PricedLine>,
) -> Result<Vec<OrderItem>, Error> {
    let count = lines.len();
    let ids = (0..count).map(|_| Ulid::new().to_string()).collect::<Vec<_>>();
    let order_ids = vec![order_id.clone(); count];
    let positions = (0..count as i32).collect::<Vec<_>>();
    let quantities = lines.iter().map(|line| line.quantity).collect::<Vec<_>>();
    let unit_prices = lines
        .iter()
        .map(|line| money::to_currency(&line.unit_price))
        .collect::<Vec<_>>();
    let (menu_item_ids, special_instructions): (Vec<_>, Vec<_>) = lines
        .into_iter()
        .map(|line| (line.menu_item_id, line.special_instructions))
        .unzip();

    let mut items = sqlx::query_as::<_, OrderItem>(
        "
        INSERT INTO order_items (
            id,
            order_id,
            menu_item_id,
            position,
            quantity,
            unit_price,
            special_instructions
        )
        SELECT * FROM UNNEST(
            $1::TEXT[],
            $2::TEXT[],
            $3::TEXT[],
            $4::INT[],
            $5::INT[],
            $6::NUMERIC[],
            $7::TEXT[]
        )
        RETURNING *
        ",
    )
    .bind(ids)
    .bind(order_ids)
    .bind(menu_item_ids)
    .bind(positions)
    .bind(quantities)
    .bind(unit_prices)
    .bind(special_instructions)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to create items of order {}: {}",
            order_id,
            err
        );
        Error::UnexpectedError
    })?;

    items.sort_by_key(|item| item.position);
    Ok(items)
}

pub async fn find_by_id_and_owner_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    owner_id: String,
) -> Result<Option<Order>, Error> {
    sqlx::query_as::<_, Order>(&format!(
        "
        {SELECT_ORDER}
        INNER JOIN restaurants ON restaurants.id = orders.restaurant_id
        WHERE orders.id = $1 AND restaurants.owner_id = $2
        "
    ))
    .bind(&id)
    .bind(owner_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch order {}: {}", id, err);
        Error::UnexpectedError
    })
}

/// Newest first. The restaurant must already be known to belong to the caller.
pub async fn find_many_by_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    filters: &Filters,
    pagination: &Pagination,
) -> Result<Vec<Order>, Error> {
    sqlx::query_as::<_, Order>(&format!(
        "
        {SELECT_ORDER}
        WHERE orders.restaurant_id = $1
            AND ($2::TEXT IS NULL OR orders.status = $2)
        ORDER BY orders.created_at DESC, orders.id DESC
        LIMIT $3
        OFFSET $4
        "
    ))
    .bind(&restaurant_id)
    .bind(filters.status.map(|status| status.as_str()))
    .bind(pagination.limit() as i64)
    .bind(pagination.offset() as i64)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch orders of restaurant {}: {}",
            restaurant_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn count_by_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    filters: &Filters,
) -> Result<i64, Error> {
    sqlx::query_scalar::<_, i64>(
        "
        SELECT COUNT(*) FROM orders
        WHERE restaurant_id = $1
            AND ($2::TEXT IS NULL OR status = $2)
        ",
    )
    .bind(&restaurant_id)
    .bind(filters.status.map(|status| status.as_str()))
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to count orders of restaurant {}: {}",
            restaurant_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_items_by_order_ids<'e, E: PgExecutor<'e>>(
    e: E,
    order_ids: Vec<String>,
) -> Result<Vec<OrderItem>, Error> {
    if order_ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, OrderItem>(
        "SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY order_id, position",
    )
    .bind(&order_ids)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch order items: {}", err);
        Error::UnexpectedError
    })
}

/// Moves the order to `to` only while it is still in `from`. `None` means
/// the status changed underneath the caller.
pub async fn update_status<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    from: OrderStatus,
    to: OrderStatus,
) -> Result<Option<Order>, Error> {
    sqlx::query_as::<_, Order>(
        "
        WITH updated AS (
            UPDATE orders
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING *
        )
        SELECT updated.*, restaurant_tables.table_number
        FROM updated
        INNER JOIN restaurant_tables ON restaurant_tables.id = updated.table_id
        ",
    )
    .bind(&id)
    .bind(from.as_str())
    .bind(to.as_str())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error updating status for order {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn record_status_update<'e, E: PgExecutor<'e>>(
    e: E,
    payload: StatusUpdatePayload,
) -> Result<(), Error> {
    sqlx::query(
        "
        INSERT INTO order_status_updates (id, order_id, from_status, to_status, changed_by)
        VALUES ($1, $2, $3, $4, $5)
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(&payload.order_id)
    .bind(payload.from.as_str())
    .bind(payload.to.as_str())
    .bind(payload.changed_by)
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!(
            "Error recording status change of order {}: {}",
            payload.order_id,
            err
        );
        Error::UnexpectedError
    })
}

/// Attaches items, and the catalog rows they reference, to their orders.
/// Orders keep their given order and items keep their line position.
pub fn into_full_orders(
    orders: Vec<Order>,
    items: Vec<OrderItem>,
    menu_items: Vec<MenuItem>,
) -> Vec<FullOrder> {
    let menu_items = menu_items
        .into_iter()
        .map(|item| (item.id.clone(), item))
        .collect::<HashMap<_, _>>();
    let mut items_by_order = items.into_iter().into_group_map_by(|item| item.order_id.clone());

    orders
        .into_iter()
        .map(|order| {
            let items = items_by_order
                .remove(&order.id)
                .unwrap_or_default()
                .into_iter()
                .sorted_by_key(|item| item.position)
                .map(|item| FullOrderItem {
                    menu_item: menu_items.get(&item.menu_item_id).cloned(),
                    subtotal: money::line_subtotal(item.quantity, &item.unit_price),
                    item,
                })
                .collect();

            FullOrder { order, items }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::order::pricing::tests::menu_item;
    use std::str::FromStr;

    fn order(id: &str) -> Order {
        Order {
            id: id.to_string(),
            restaurant_id: "R".to_string(),
            table_id: "T".to_string(),
            table_number: "4".to_string(),
            customer_name: "Alice".to_string(),
            status: OrderStatus::Pending,
            // Decoded NUMERIC values come back without their column scale.
            total_amount: BigDecimal::from_str("25").unwrap(),
            special_instructions: String::new(),
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }

    fn item(id: &str, order_id: &str, menu_item_id: &str, position: i32) -> OrderItem {
        OrderItem {
            id: id.to_string(),
            order_id: order_id.to_string(),
            menu_item_id: menu_item_id.to_string(),
            position,
            quantity: 2,
            unit_price: BigDecimal::from_str("12.5000").unwrap(),
            special_instructions: String::new(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn items_land_on_their_order_in_line_order() {
        let full = into_full_orders(
            vec![order("O1"), order("O2")],
            vec![
                item("I2", "O1", "M", 1),
                item("I3", "O2", "M", 0),
                item("I1", "O1", "M", 0),
            ],
            vec![menu_item("M", "R", "12.50")],
        );

        assert_eq!(full.len(), 2);
        assert_eq!(
            full[0].items.iter().map(|i| i.item.id.as_str()).collect::<Vec<_>>(),
            vec!["I1", "I2"]
        );
        assert_eq!(full[1].items.len(), 1);
        assert_eq!(full[0].items[0].subtotal.to_string(), "25.00");
    }

    #[test]
    fn money_fields_serialize_with_two_decimals() {
        let full = into_full_orders(
            vec![order("O1")],
            vec![item("I1", "O1", "M", 0)],
            vec![menu_item("M", "R", "12.5000")],
        );
        let value = serde_json::to_value(&full[0]).unwrap();

        assert_eq!(value["total_amount"], "25.00");
        assert_eq!(value["items"][0]["unit_price"], "12.50");
        assert_eq!(value["items"][0]["subtotal"], "25.00");
        assert_eq!(value["items"][0]["menu_item"]["price"], "12.50");
    }

    #[test]
    fn deleted_menu_items_serialize_as_null() {
        let full = into_full_orders(vec![order("O1")], vec![item("I1", "O1", "GONE", 0)], vec![]);
        let value = serde_json::to_value(&full[0]).unwrap();

        assert_eq!(value["table_number"], "4");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["total_amount"], "25.00");
        assert!(value["items"][0]["menu_item"].is_null());
        assert_eq!(value["items"][0]["menu_item_id"], "GONE");
        assert_eq!(value["items"][0]["unit_price"], "12.50");
        assert_eq!(value["items"][0]["subtotal"], "25.00");
        assert!(value["items"][0].get("position").is_none());
    }

    #[test]
    fn orders_without_items_get_an_empty_list() {
        let full = into_full_orders(vec![order("O1")], vec![], vec![]);
        assert!(full[0].items.is_empty());
    }
}
