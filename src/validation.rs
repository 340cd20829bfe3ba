//! Declarative per-route validation for the product resource.
//!
//! Bodies deserialize into the permissive [`ProductPayload`] so that type
//! mismatches surface as rule failures instead of serde rejections. Every
//! rule declared for a route runs to completion; each failure contributes one
//! [`FieldError`], in declaration order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

pub const MSG_ID_NOT_A_NUMBER: &str = "Id must be a number";
pub const MSG_NAME_REQUIRED: &str = "Product must have a name";
pub const MSG_PRICE_REQUIRED: &str = "Product must have a price";
pub const MSG_PRICE_NOT_A_NUMBER: &str = "Product price must be a number";
pub const MSG_PRICE_NOT_POSITIVE: &str = "Product price must be a positive number";
pub const MSG_AVAILABILITY_REQUIRED: &str = "Product availability must be provided";

/// One failed rule: which field it inspected and the fixed message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub msg: &'static str,
}

impl FieldError {
    fn new(field: &'static str, msg: &'static str) -> Self {
        Self { field, msg }
    }
}

/// Untyped request body for create/replace. Fields are raw JSON values so the
/// rule set owns all type checking.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductPayload {
    pub name: Option<Value>,
    pub price: Option<Value>,
    pub availability: Option<Value>,
}

/// Fully validated create body.
#[derive(Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
}

/// Fully validated replace body.
#[derive(Debug, PartialEq)]
pub struct ReplaceProduct {
    pub name: String,
    pub price: Decimal,
    pub availability: bool,
}

/// `id` path-parameter rule, used by get-one, replace, partial-update and
/// delete.
pub fn validate_id(raw: &str) -> Result<i32, Vec<FieldError>> {
    let mut errors = Vec::new();
    match check_id(raw, &mut errors) {
        Some(id) => Ok(id),
        None => Err(errors),
    }
}

/// Create-body rules: non-empty `name`, then the three `price` rules.
pub fn validate_create(payload: &ProductPayload) -> Result<NewProduct, Vec<FieldError>> {
    let mut errors = Vec::new();
    let name = check_name(payload, &mut errors);
    let price = check_price(payload, &mut errors);

    if let (Some(name), Some(price)) = (name, price) {
        if errors.is_empty() {
            return Ok(NewProduct { name, price });
        }
    }
    Err(errors)
}

/// Replace rules: the `id` rule first, then the create-body rules, then
/// `availability`. All of them run even when earlier ones fail.
pub fn validate_replace(
    raw_id: &str,
    payload: &ProductPayload,
) -> Result<(i32, ReplaceProduct), Vec<FieldError>> {
    let mut errors = Vec::new();
    let id = check_id(raw_id, &mut errors);
    let name = check_name(payload, &mut errors);
    let price = check_price(payload, &mut errors);
    let availability = check_availability(payload, &mut errors);

    if let (Some(id), Some(name), Some(price), Some(availability)) =
        (id, name, price, availability)
    {
        if errors.is_empty() {
            return Ok((
                id,
                ReplaceProduct {
                    name,
                    price,
                    availability,
                },
            ));
        }
    }
    Err(errors)
}

fn check_id(raw: &str, errors: &mut Vec<FieldError>) -> Option<i32> {
    match raw.parse::<i32>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(FieldError::new("id", MSG_ID_NOT_A_NUMBER));
            None
        }
    }
}

fn check_name(payload: &ProductPayload, errors: &mut Vec<FieldError>) -> Option<String> {
    match &payload.name {
        Some(Value::String(name)) if !name.is_empty() => Some(name.clone()),
        _ => {
            errors.push(FieldError::new("name", MSG_NAME_REQUIRED));
            None
        }
    }
}

/// Three independent price rules: present, numeric, strictly positive. A
/// missing price fails all three; a non-numeric one fails the last two.
fn check_price(payload: &ProductPayload, errors: &mut Vec<FieldError>) -> Option<Decimal> {
    let value = payload.price.as_ref();

    if !is_present(value) {
        errors.push(FieldError::new("price", MSG_PRICE_REQUIRED));
    }

    let numeric = value.and_then(numeric_value);
    if numeric.is_none() {
        errors.push(FieldError::new("price", MSG_PRICE_NOT_A_NUMBER));
    }

    match numeric {
        Some(price) if price > Decimal::ZERO => Some(price),
        _ => {
            errors.push(FieldError::new("price", MSG_PRICE_NOT_POSITIVE));
            None
        }
    }
}

fn check_availability(payload: &ProductPayload, errors: &mut Vec<FieldError>) -> Option<bool> {
    match &payload.availability {
        Some(Value::Bool(flag)) => Some(*flag),
        Some(Value::String(raw)) if raw == "true" || raw == "false" => Some(raw == "true"),
        _ => {
            errors.push(FieldError::new("availability", MSG_AVAILABILITY_REQUIRED));
            None
        }
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(raw)) => !raw.is_empty(),
        Some(_) => true,
    }
}

fn numeric_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => number.as_f64().and_then(Decimal::from_f64_retain),
        Value::String(raw) => Decimal::from_str(raw.trim()).ok(),
        _ => None,
    }
}
