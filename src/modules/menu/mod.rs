use crate::{
    modules::{category::repository::Category, menu_item::repository::MenuItem},
    utils::money,
};
use bigdecimal::BigDecimal;
use itertools::Itertools;
use serde::Serialize;

/// A menu item as shown to customers.
#[derive(Serialize, Clone, Debug)]
pub struct MenuEntry {
    pub id: String,
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
}

impl From<MenuItem> for MenuEntry {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            image: item.image,
            ingredients: item.ingredients,
            allergens: item.allergens,
            is_available: item.is_available,
            is_vegetarian: item.is_vegetarian,
            is_vegan: item.is_vegan,
            preparation_time: item.preparation_time,
            order_index: item.order_index,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    pub order_index: i32,
    pub is_active: bool,
    pub items: Vec<MenuEntry>,
}

/// Builds the customer menu: active categories by (order_index, name), each
/// with its available items by (order_index, name).
pub fn assemble(categories: Vec<Category>, items: Vec<MenuItem>) -> Vec<MenuCategory> {
    let mut items_by_category = items
        .into_iter()
        .filter(|item| item.is_available)
        .into_group_map_by(|item| item.category_id.clone());

    categories
        .into_iter()
        .filter(|category| category.is_active)
        .sorted_by(|a, b| (a.order_index, &a.name).cmp(&(b.order_index, &b.name)))
        .map(|category| {
            let items = items_by_category
                .remove(&category.id)
                .unwrap_or_default()
                .into_iter()
                .sorted_by(|a, b| (a.order_index, &a.name).cmp(&(b.order_index, &b.name)))
                .map(MenuEntry::from)
                .collect();

            MenuCategory {
                id: category.id,
                name: category.name,
                description: category.description,
                order_index: category.order_index,
                is_active: category.is_active,
                items,
            }
        })
        .collect()
}
