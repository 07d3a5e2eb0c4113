use crate::{
    modules::{category, menu_item, restaurant, table, user},
    types::Context,
    utils::money,
};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use std::{fmt, fs, path::PathBuf};

const DEFAULT_ITEMS: &str = r#"[
    {"name": "Margherita Pizza", "description": "San Marzano tomatoes, mozzarella, fresh basil.", "price": "12.50", "category": "Pizza", "preparation_time": 15},
    {"name": "Sushi Bowl", "description": "Salmon, avocado, cucumber, sushi rice, sesame.", "price": "14.00", "category": "Bowls", "preparation_time": 12},
    {"name": "Gourmet Burger", "description": "Grass-fed beef, cheddar, pickles, brioche bun.", "price": "11.75", "category": "Burgers", "preparation_time": 14},
    {"name": "Pasta Alfredo", "description": "Creamy parmesan sauce, parsley, black pepper.", "price": "13.00", "category": "Pasta", "preparation_time": 12},
    {"name": "Mediterranean Salad", "description": "Tomatoes, cucumber, olives, feta, olive oil.", "price": "9.50", "category": "Salads", "preparation_time": 5},
    {"name": "Berry Pancakes", "description": "Fluffy stack, berries, maple syrup, powdered sugar.", "price": "8.75", "category": "Desserts", "preparation_time": 10}
]"#;

const DEFAULT_TABLE_CAPACITY: i32 = 4;

fn default_category() -> String {
    "Uncategorized".to_string()
}

fn default_price() -> BigDecimal {
    BigDecimal::from(0)
}

fn default_preparation_time() -> i32 {
    10
}

#[derive(Deserialize, Clone, Debug)]
pub struct SeedItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_price")]
    pub price: BigDecimal,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_preparation_time")]
    pub preparation_time: i32,
}

pub struct SeedOptions {
    pub restaurant: String,
    pub owner_email: String,
    pub tables: u32,
    pub items_file: Option<PathBuf>,
}

#[derive(Debug)]
pub enum Error {
    OwnerNotFound(String),
    InvalidItems(String),
    UnexpectedError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OwnerNotFound(email) => {
                write!(f, "Owner '{}' does not exist. Sign up first", email)
            }
            Error::InvalidItems(reason) => write!(f, "Invalid items: {}", reason),
            Error::UnexpectedError => write!(f, "Seeding failed, see the logs for details"),
        }
    }
}

fn parse_items(raw: &str) -> Result<Vec<SeedItem>, Error> {
    serde_json::from_str::<Vec<SeedItem>>(raw).map_err(|err| {
        Error::InvalidItems(format!("expected a JSON array of item objects ({})", err))
    })
}

pub fn load_items(items_file: Option<&PathBuf>) -> Result<Vec<SeedItem>, Error> {
    match items_file {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|err| {
                Error::InvalidItems(format!("cannot read {}: {}", path.display(), err))
            })?;
            parse_items(&raw)
        }
        None => parse_items(DEFAULT_ITEMS),
    }
}

/// Groups items by category name, keeping categories in the order they are
/// first seen and items in file order.
pub fn group_by_category(items: Vec<SeedItem>) -> Vec<(String, Vec<SeedItem>)> {
    let mut groups: Vec<(String, Vec<SeedItem>)> = Vec::new();

    for item in items {
        match groups.iter_mut().find(|(name, _)| *name == item.category) {
            Some((_, members)) => members.push(item),
            None => groups.push((item.category.clone(), vec![item])),
        }
    }

    groups
}

async fn seed_restaurant(
    ctx: &Context,
    options: &SeedOptions,
    owner_id: String,
) -> Result<restaurant::repository::Restaurant, Error> {
    let pool = &ctx.db_conn.pool;
    let existing = restaurant::repository::find_by_name_and_owner_id(
        pool,
        options.restaurant.clone(),
        owner_id.clone(),
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    if let Some(restaurant) = existing {
        tracing::warn!(
            "Restaurant '{}' already exists (id={})",
            restaurant.name,
            restaurant.id
        );
        return Ok(restaurant);
    }

    let restaurant = restaurant::repository::create(
        pool,
        restaurant::repository::CreateRestaurantPayload {
            name: options.restaurant.clone(),
            description: String::new(),
            address: "Unknown".to_string(),
            phone: "000".to_string(),
            email: "demo@example.com".to_string(),
            logo: None,
            is_active: true,
            owner_id,
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    tracing::info!("Created restaurant '{}'", restaurant.name);
    Ok(restaurant)
}

async fn seed_tables(ctx: &Context, restaurant_id: String, wanted: u32) -> Result<(), Error> {
    let pool = &ctx.db_conn.pool;
    let existing = table::repository::count_by_restaurant_id(pool, restaurant_id.clone())
        .await
        .map_err(|_| Error::UnexpectedError)?;

    if existing >= wanted as i64 {
        tracing::warn!(
            "Restaurant already has {} tables, skipping table creation",
            existing
        );
        return Ok(());
    }

    for number in (existing + 1)..=(wanted as i64) {
        let created = table::repository::create(
            pool,
            table::repository::CreateTablePayload {
                restaurant_id: restaurant_id.clone(),
                table_number: number.to_string(),
                capacity: DEFAULT_TABLE_CAPACITY,
                is_active: true,
            },
        )
        .await;

        match created {
            Ok(table) => tracing::info!(
                "Created table {} (qr={})",
                table.table_number,
                table.qr_code
            ),
            Err(table::repository::Error::DuplicateTableNumber) => {
                tracing::warn!("Table {} already exists, skipping", number)
            }
            Err(table::repository::Error::UnexpectedError) => return Err(Error::UnexpectedError),
        }
    }

    Ok(())
}

async fn seed_menu(ctx: &Context, restaurant_id: String, items: Vec<SeedItem>) -> Result<(), Error> {
    let pool = &ctx.db_conn.pool;

    for (position, (category_name, members)) in group_by_category(items).into_iter().enumerate() {
        let category = match category::repository::find_by_name_and_restaurant_id(
            pool,
            category_name.clone(),
            restaurant_id.clone(),
        )
        .await
        .map_err(|_| Error::UnexpectedError)?
        {
            Some(category) => category,
            None => category::repository::create(
                pool,
                category::repository::CreateCategoryPayload {
                    restaurant_id: restaurant_id.clone(),
                    name: category_name,
                    description: String::new(),
                    order_index: position as i32,
                    is_active: true,
                },
            )
            .await
            .map_err(|_| Error::UnexpectedError)?,
        };
        tracing::info!("Category: {}", category.name);

        for (index, item) in members.into_iter().enumerate() {
            let existing = menu_item::repository::find_by_name_and_category_id(
                pool,
                item.name.clone(),
                category.id.clone(),
            )
            .await
            .map_err(|_| Error::UnexpectedError)?;

            if existing.is_some() {
                tracing::warn!("Menu item already exists: {}", item.name);
                continue;
            }

            let created = menu_item::repository::create(
                pool,
                menu_item::repository::CreateMenuItemPayload {
                    restaurant_id: restaurant_id.clone(),
                    category_id: category.id.clone(),
                    name: item.name,
                    description: item.description,
                    price: money::to_currency(&item.price),
                    image: None,
                    ingredients: String::new(),
                    allergens: String::new(),
                    is_available: true,
                    is_vegetarian: false,
                    is_vegan: false,
                    preparation_time: item.preparation_time,
                    order_index: index as i32 + 1,
                },
            )
            .await
            .map_err(|_| Error::UnexpectedError)?;

            tracing::info!(
                "Created menu item: {} ({})",
                created.name,
                money::to_currency(&created.price)
            );
        }
    }

    Ok(())
}

/// Creates, or tops up, a demo restaurant. Running it twice changes nothing.
pub async fn run(ctx: &Context, options: SeedOptions) -> Result<(), Error> {
    let items = load_items(options.items_file.as_ref())?;
    for item in &items {
        money::validate_price(&item.price)
            .map_err(|_| Error::InvalidItems(format!("invalid price for '{}'", item.name)))?;
    }

    let owner = user::repository::find_by_email(&ctx.db_conn.pool, options.owner_email.clone())
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or_else(|| Error::OwnerNotFound(options.owner_email.clone()))?;
    tracing::info!("Using owner: {}", owner.email);

    let restaurant = seed_restaurant(ctx, &options, owner.id).await?;
    seed_tables(ctx, restaurant.id.clone(), options.tables).await?;
    seed_menu(ctx, restaurant.id, items).await?;

    tracing::info!("Seeding complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_items_parse() {
        let items = load_items(None).unwrap();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].name, "Margherita Pizza");
        assert_eq!(money::to_currency(&items[0].price).to_string(), "12.50");
        assert_eq!(items[4].preparation_time, 5);
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let items = parse_items(
            r#"[
                {"name": "A", "category": "Mains"},
                {"name": "B", "category": "Drinks"},
                {"name": "C", "category": "Mains"},
                {"name": "D"}
            ]"#,
        )
        .unwrap();

        let groups = group_by_category(items);
        let shape = groups
            .iter()
            .map(|(name, members)| {
                (
                    name.as_str(),
                    members.iter().map(|item| item.name.as_str()).collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>();

        assert_eq!(
            shape,
            vec![
                ("Mains", vec!["A", "C"]),
                ("Drinks", vec!["B"]),
                ("Uncategorized", vec!["D"]),
            ]
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let items = parse_items(r#"[{"name": "Tea"}]"#).unwrap();
        assert_eq!(items[0].preparation_time, 10);
        assert_eq!(items[0].price, BigDecimal::from(0));
        assert!(items[0].description.is_empty());
    }

    #[test]
    fn non_array_input_is_rejected() {
        assert!(matches!(
            parse_items(r#"{"name": "Tea"}"#),
            Err(Error::InvalidItems(_))
        ));
    }
}
