//! Data Transfer Objects
//!
//! Request and response bodies for the HTTP layer. Decimal inputs accept JSON
//! numbers or strings; decimal outputs are written as JSON numbers. `serde_json`
//! runs with `arbitrary_precision`, so numbers travel as their literal digits and
//! never pass through `f64`.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{
    item::{ItemFilter, ItemPatch, NewItem},
    list::ListPatch,
};
use crate::entities::{ListStatus, item, shopping_list};
use crate::errors::{Error, Result};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================
// Health DTOs
// ============================================

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// Crate version
    pub version: String,
    /// Seconds since startup
    pub uptime_secs: u64,
}

// ============================================
// List DTOs
// ============================================

/// Request to create a list
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListRequest {
    /// Display name
    pub name: String,
    /// Currency code; the configured default when omitted
    #[serde(default)]
    pub currency: Option<String>,
    /// Optional budget
    #[serde(default, alias = "budget")]
    pub budget_amount: Option<Decimal>,
}

/// Partial list update; omitted fields are left alone, `null` budget clears it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListRequest {
    /// New display name
    #[serde(default)]
    pub name: Option<String>,
    /// New currency code
    #[serde(default)]
    pub currency: Option<String>,
    /// New budget, or `null` to clear
    #[serde(default, alias = "budget", deserialize_with = "double_option")]
    pub budget_amount: Option<Option<Decimal>>,
    /// New status
    #[serde(default)]
    pub status: Option<ListStatus>,
}

impl From<UpdateListRequest> for ListPatch {
    fn from(request: UpdateListRequest) -> Self {
        Self {
            name: request.name,
            currency: request.currency,
            budget: request.budget_amount,
            status: request.status,
        }
    }
}

/// Query string for listing lists
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Only lists in this status
    pub status: Option<ListStatus>,
}

/// A shopping list as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListResponse {
    /// List id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Currency code
    pub currency: String,
    /// Budget, `null` when unset
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub budget_amount: Option<Decimal>,
    /// Lifecycle status
    pub status: ListStatus,
    /// Creation time (UTC)
    pub created_at: NaiveDateTime,
    /// Last modification time (UTC)
    pub updated_at: NaiveDateTime,
}

impl TryFrom<shopping_list::Model> for ListResponse {
    type Error = Error;

    fn try_from(model: shopping_list::Model) -> Result<Self> {
        Ok(Self {
            budget_amount: model.budget()?,
            id: model.id,
            name: model.name,
            currency: model.currency,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

// ============================================
// Item DTOs
// ============================================

/// Request to add an item to a list
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    /// What to buy
    pub name: String,
    /// Amount, defaults to 1
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// Unit label
    #[serde(default)]
    pub unit: Option<String>,
    /// Grouping label
    #[serde(default)]
    pub category: Option<String>,
    /// Estimated price per unit
    #[serde(default, alias = "unit_price")]
    pub estimated_unit_price: Option<Decimal>,
    /// Free-text note
    #[serde(default)]
    pub note: Option<String>,
}

impl From<CreateItemRequest> for NewItem {
    fn from(request: CreateItemRequest) -> Self {
        Self {
            name: request.name,
            quantity: request.quantity,
            unit: request.unit,
            category: request.category,
            unit_price: request.estimated_unit_price,
            note: request.note,
        }
    }
}

/// Partial item update; `null` clears `category` or `estimated_unit_price`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemRequest {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New quantity
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// New unit label
    #[serde(default)]
    pub unit: Option<String>,
    /// New category, or `null` to clear
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    /// New price, or `null` to clear
    #[serde(default, alias = "unit_price", deserialize_with = "double_option")]
    pub estimated_unit_price: Option<Option<Decimal>>,
    /// New bought state
    #[serde(default)]
    pub bought: Option<bool>,
    /// New note
    #[serde(default)]
    pub note: Option<String>,
}

impl From<UpdateItemRequest> for ItemPatch {
    fn from(request: UpdateItemRequest) -> Self {
        Self {
            name: request.name,
            quantity: request.quantity,
            unit: request.unit,
            category: request.category,
            unit_price: request.estimated_unit_price,
            bought: request.bought,
            note: request.note,
        }
    }
}

/// Query string for listing items
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemQuery {
    /// Only bought (`true`) or pending (`false`) items
    pub bought: Option<bool>,
    /// Only items in this category
    pub category: Option<String>,
}

impl From<ItemQuery> for ItemFilter {
    fn from(query: ItemQuery) -> Self {
        Self {
            bought: query.bought,
            category: query.category,
        }
    }
}

/// An item as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemResponse {
    /// Item id
    pub id: i64,
    /// Owning list id
    pub list_id: i64,
    /// What to buy
    pub name: String,
    /// Amount
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub quantity: Decimal,
    /// Unit label
    pub unit: String,
    /// Grouping label
    pub category: Option<String>,
    /// Estimated price per unit
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub estimated_unit_price: Option<Decimal>,
    /// Bought flag
    pub bought: bool,
    /// Free-text note
    pub note: String,
    /// Creation time (UTC)
    pub created_at: NaiveDateTime,
    /// Last modification time (UTC)
    pub updated_at: NaiveDateTime,
}

impl TryFrom<item::Model> for ItemResponse {
    type Error = Error;

    fn try_from(model: item::Model) -> Result<Self> {
        Ok(Self {
            quantity: model.quantity_value()?,
            estimated_unit_price: model.unit_price_value()?,
            id: model.id,
            list_id: model.list_id,
            name: model.name,
            unit: model.unit,
            category: model.category,
            bought: model.bought,
            note: model.note,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_decimal_inputs_accept_numbers_and_strings() {
        let from_number: CreateItemRequest =
            serde_json::from_str(r#"{"name": "Milk", "quantity": 2, "unit_price": 1.25}"#)
                .unwrap();
        assert_eq!(from_number.quantity, Some(Decimal::new(2, 0)));
        assert_eq!(from_number.estimated_unit_price, Some(Decimal::new(125, 2)));

        let from_string: CreateItemRequest = serde_json::from_str(
            r#"{"name": "Milk", "quantity": "2", "estimated_unit_price": "1.25"}"#,
        )
        .unwrap();
        assert_eq!(from_string.quantity, Some(Decimal::new(2, 0)));
        assert_eq!(from_string.estimated_unit_price, Some(Decimal::new(125, 2)));
    }

    #[test]
    fn test_decimal_numbers_keep_every_digit() {
        let request: CreateItemRequest = serde_json::from_str(
            r#"{"name": "Saffron", "quantity": 1.00000000000000000001, "unit_price": 0.123456789012345678}"#,
        )
        .unwrap();
        assert_eq!(
            request.quantity,
            Some(Decimal::from_str("1.00000000000000000001").unwrap())
        );
        assert_eq!(
            request.estimated_unit_price,
            Some(Decimal::from_str("0.123456789012345678").unwrap())
        );

        let budget: CreateListRequest =
            serde_json::from_str(r#"{"name": "Big", "budget_amount": 12345678901234567.89}"#)
                .unwrap();
        assert_eq!(
            budget.budget_amount,
            Some(Decimal::from_str("12345678901234567.89").unwrap())
        );
    }

    #[test]
    fn test_responses_write_exact_numbers() {
        let now = chrono::Utc::now().naive_utc();
        let response = ItemResponse {
            id: 1,
            list_id: 2,
            name: "Saffron".to_string(),
            quantity: Decimal::from_str("1.00000000000000000001").unwrap(),
            unit: "g".to_string(),
            category: None,
            estimated_unit_price: Some(Decimal::from_str("0.123456789012345678").unwrap()),
            bought: false,
            note: String::new(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""quantity":1.00000000000000000001"#), "{json}");
        assert!(
            json.contains(r#""estimated_unit_price":0.123456789012345678"#),
            "{json}"
        );
    }

    #[test]
    fn test_update_list_distinguishes_null_from_absent() {
        let absent: UpdateListRequest = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(absent.budget_amount, None);

        let cleared: UpdateListRequest =
            serde_json::from_str(r#"{"budget_amount": null}"#).unwrap();
        assert_eq!(cleared.budget_amount, Some(None));

        let set: UpdateListRequest = serde_json::from_str(r#"{"budget": "12.50"}"#).unwrap();
        assert_eq!(set.budget_amount, Some(Some(Decimal::new(1250, 2))));
    }

    #[test]
    fn test_update_item_status_and_clearing() {
        let request: UpdateItemRequest =
            serde_json::from_str(r#"{"category": null, "bought": true}"#).unwrap();
        let patch = ItemPatch::from(request);
        assert_eq!(patch.category, Some(None));
        assert_eq!(patch.unit_price, None);
        assert_eq!(patch.bought, Some(true));
    }

    #[test]
    fn test_list_status_wire_format() {
        let query: UpdateListRequest = serde_json::from_str(r#"{"status": "archived"}"#).unwrap();
        assert_eq!(query.status, Some(ListStatus::Archived));
        assert!(serde_json::from_str::<UpdateListRequest>(r#"{"status": "gone"}"#).is_err());
    }
}
