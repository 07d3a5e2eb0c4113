use bigdecimal::BigDecimal;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use validator::ValidationError;

pub const CURRENCY_SCALE: i64 = 2;

/// Exclusive upper bound of a `NUMERIC(10,2)` money column.
const AMOUNT_LIMIT: i64 = 100_000_000;

/// Normalizes an amount to the two-decimal currency scale.
pub fn to_currency(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale(CURRENCY_SCALE)
}

/// Serializes an amount at currency scale. Postgres hands `NUMERIC` values
/// back without their column scale, so every money field goes out through here.
pub fn serialize<S: Serializer>(amount: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
    to_currency(amount).serialize(serializer)
}

pub fn fits_column(amount: &BigDecimal) -> bool {
    amount < &BigDecimal::from(AMOUNT_LIMIT)
}

pub fn line_subtotal(quantity: i32, unit_price: &BigDecimal) -> BigDecimal {
    to_currency(&(BigDecimal::from(quantity) * unit_price))
}

pub fn sum<'a>(amounts: impl IntoIterator<Item = &'a BigDecimal>) -> BigDecimal {
    to_currency(
        &amounts
            .into_iter()
            .fold(BigDecimal::from(0), |acc, amount| acc + amount),
    )
}

pub fn validate_price(price: &BigDecimal) -> Result<(), ValidationError> {
    if price < &BigDecimal::from(0) {
        return Err(ValidationError::new("NEGATIVE_PRICE")
            .with_message(Cow::from("Price cannot be negative")));
    }

    if price.with_scale(CURRENCY_SCALE) != *price {
        return Err(ValidationError::new("INVALID_PRICE_PRECISION")
            .with_message(Cow::from("Price cannot have more than 2 decimal places")));
    }

    if !fits_column(price) {
        return Err(ValidationError::new("PRICE_TOO_LARGE")
            .with_message(Cow::from("Price must be less than 100000000")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn subtotal_multiplies_and_keeps_two_decimals() {
        let subtotal = line_subtotal(2, &dec("12.50"));
        assert_eq!(subtotal, dec("25.00"));
        assert_eq!(subtotal.to_string(), "25.00");
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        assert_eq!(sum(Vec::<&BigDecimal>::new()).to_string(), "0.00");
    }

    #[test]
    fn sum_adds_exactly() {
        let amounts = [dec("0.10"), dec("0.20"), dec("0.30")];
        assert_eq!(sum(amounts.iter()), dec("0.60"));
    }

    #[test]
    fn amounts_serialize_at_currency_scale() {
        #[derive(Serialize)]
        struct Row {
            #[serde(serialize_with = "super::serialize")]
            amount: BigDecimal,
        }

        for (raw, expected) in [("25", "25.00"), ("12.5000", "12.50"), ("0", "0.00")] {
            let value = serde_json::to_value(Row { amount: dec(raw) }).unwrap();
            assert_eq!(value["amount"], expected);
        }
    }

    #[test]
    fn column_bound() {
        assert!(fits_column(&dec("99999999.99")));
        assert!(!fits_column(&dec("100000000")));
        assert!(!fits_column(&dec("199999999.98")));
    }

    #[test]
    fn price_validation() {
        assert!(validate_price(&dec("0")).is_ok());
        assert!(validate_price(&dec("12.5")).is_ok());
        assert!(validate_price(&dec("12.50")).is_ok());
        assert!(validate_price(&dec("-1.00")).is_err());
        assert!(validate_price(&dec("1.005")).is_err());
        assert!(validate_price(&dec("100000000")).is_err());
    }
}
