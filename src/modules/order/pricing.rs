use crate::{
    modules::menu_item::repository::MenuItem,
    utils::{money, validation},
};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::HashMap};
use validator::{Validate, ValidationError, ValidationErrors};

fn default_quantity() -> i32 {
    1
}

/// One requested line of a customer order.
#[derive(Deserialize, Serialize, Validate, Clone, Debug)]
pub struct OrderLine {
    #[validate(custom(function = "validation::not_blank"))]
    pub menu_item_id: String,
    #[serde(default = "default_quantity")]
    #[validate(range(
        min = 1,
        max = 999,
        code = "INVALID_QUANTITY",
        message = "Quantity must be between 1 and 999"
    ))]
    pub quantity: i32,
    #[serde(default)]
    pub special_instructions: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PricedLine {
    pub menu_item_id: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub special_instructions: String,
}

impl PricedLine {
    pub fn subtotal(&self) -> BigDecimal {
        money::line_subtotal(self.quantity, &self.unit_price)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PricedOrder {
    pub lines: Vec<PricedLine>,
    pub total_amount: BigDecimal,
}

fn line_error(code: &'static str, message: &'static str, index: usize, line: &OrderLine) -> ValidationError {
    let mut error = validation::error(code, message);
    error.add_param(Cow::from("index"), &index);
    error.add_param(Cow::from("menu_item_id"), &line.menu_item_id);
    error
}

/// Resolves every line against the restaurant's menu and captures the
/// current price of each item. Items of other restaurants are reported
/// exactly like unknown ones.
pub fn price_lines(
    restaurant_id: &str,
    lines: &[OrderLine],
    menu_items: &[MenuItem],
) -> Result<PricedOrder, ValidationErrors> {
    if lines.is_empty() {
        return Err(validation::single(
            "items",
            validation::error("EMPTY_ORDER", "At least one item is required"),
        ));
    }

    let menu = menu_items
        .iter()
        .filter(|item| item.restaurant_id == restaurant_id)
        .map(|item| (item.id.as_str(), item))
        .collect::<HashMap<_, _>>();

    let mut errors = ValidationErrors::new();
    let mut priced = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        match menu.get(line.menu_item_id.as_str()) {
            None => errors.add(
                "items",
                line_error("UNKNOWN_MENU_ITEM", "Menu item does not exist", index, line),
            ),
            Some(item) if !item.is_available => errors.add(
                "items",
                line_error(
                    "MENU_ITEM_UNAVAILABLE",
                    "Menu item is currently unavailable",
                    index,
                    line,
                ),
            ),
            Some(item) => priced.push(PricedLine {
                menu_item_id: item.id.clone(),
                quantity: line.quantity,
                unit_price: money::to_currency(&item.price),
                special_instructions: line.special_instructions.clone(),
            }),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let subtotals = priced.iter().map(PricedLine::subtotal).collect::<Vec<_>>();
    let total_amount = money::sum(subtotals.iter());

    if !money::fits_column(&total_amount) {
        return Err(validation::single(
            "items",
            validation::error("TOTAL_TOO_LARGE", "Order total is too large"),
        ));
    }

    Ok(PricedOrder {
        lines: priced,
        total_amount,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::str::FromStr;

    pub(crate) fn menu_item(id: &str, restaurant_id: &str, price: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            restaurant_id: restaurant_id.to_string(),
            category_id: "01J0CATEGORY".to_string(),
            name: format!("Item {}", id),
            description: String::new(),
            price: BigDecimal::from_str(price).unwrap(),
            image: None,
            ingredients: String::new(),
            allergens: String::new(),
            is_available: true,
            is_vegetarian: false,
            is_vegan: false,
            preparation_time: 10,
            order_index: 0,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }

    fn line(menu_item_id: &str, quantity: i32) -> OrderLine {
        OrderLine {
            menu_item_id: menu_item_id.to_string(),
            quantity,
            special_instructions: String::new(),
        }
    }

    fn codes(errors: &ValidationErrors) -> Vec<String> {
        errors.field_errors()["items"]
            .iter()
            .map(|error| error.code.to_string())
            .collect()
    }

    #[test]
    fn two_pizzas_cost_twenty_five() {
        let menu = [menu_item("M", "R", "12.50")];
        let priced = price_lines("R", &[line("M", 2)], &menu).unwrap();

        assert_eq!(priced.lines.len(), 1);
        assert_eq!(priced.lines[0].unit_price.to_string(), "12.50");
        assert_eq!(priced.lines[0].subtotal().to_string(), "25.00");
        assert_eq!(priced.total_amount.to_string(), "25.00");
    }

    #[test]
    fn total_is_the_sum_of_line_subtotals() {
        let menu = [menu_item("A", "R", "9.50"), menu_item("B", "R", "8.75")];
        let priced = price_lines("R", &[line("A", 3), line("B", 1), line("A", 1)], &menu).unwrap();

        let expected = money::sum(
            priced
                .lines
                .iter()
                .map(PricedLine::subtotal)
                .collect::<Vec<_>>()
                .iter(),
        );
        assert_eq!(priced.total_amount, expected);
        assert_eq!(priced.total_amount.to_string(), "46.75");
        assert_eq!(priced.lines.len(), 3);
    }

    #[test]
    fn unit_price_is_taken_from_the_item_given() {
        let before = [menu_item("M", "R", "12.50")];
        let after = [menu_item("M", "R", "15.00")];

        let first = price_lines("R", &[line("M", 1)], &before).unwrap();
        let second = price_lines("R", &[line("M", 1)], &after).unwrap();

        assert_eq!(first.lines[0].unit_price.to_string(), "12.50");
        assert_eq!(second.lines[0].unit_price.to_string(), "15.00");
    }

    #[test]
    fn empty_order_is_rejected() {
        let errors = price_lines("R", &[], &[]).unwrap_err();
        assert_eq!(codes(&errors), vec!["EMPTY_ORDER"]);
    }

    #[test]
    fn unknown_and_foreign_items_look_the_same() {
        let menu = [menu_item("M", "R", "12.50"), menu_item("X", "OTHER", "1.00")];
        let errors = price_lines("R", &[line("M", 1), line("X", 1), line("NOPE", 1)], &menu)
            .unwrap_err();

        assert_eq!(codes(&errors), vec!["UNKNOWN_MENU_ITEM", "UNKNOWN_MENU_ITEM"]);
        let params = &errors.field_errors()["items"][0].params;
        assert_eq!(params["index"], serde_json::json!(1));
        assert_eq!(params["menu_item_id"], serde_json::json!("X"));
    }

    #[test]
    fn unavailable_items_cannot_be_ordered() {
        let mut item = menu_item("M", "R", "12.50");
        item.is_available = false;

        let errors = price_lines("R", &[line("M", 1)], &[item]).unwrap_err();
        assert_eq!(codes(&errors), vec!["MENU_ITEM_UNAVAILABLE"]);
    }

    #[test]
    fn totals_beyond_the_money_column_are_rejected() {
        let menu = [menu_item("M", "R", "99999999.99")];

        assert!(price_lines("R", &[line("M", 1)], &menu).is_ok());
        let errors = price_lines("R", &[line("M", 2)], &menu).unwrap_err();
        assert_eq!(codes(&errors), vec!["TOTAL_TOO_LARGE"]);
    }

    #[test]
    fn quantity_defaults_to_one_and_must_be_positive() {
        let parsed: OrderLine = serde_json::from_str(r#"{"menu_item_id": "M"}"#).unwrap();
        assert_eq!(parsed.quantity, 1);
        assert!(parsed.validate().is_ok());

        assert!(line("M", 0).validate().is_err());
        assert!(line("M", -2).validate().is_err());
    }
}
