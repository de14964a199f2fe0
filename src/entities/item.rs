//! Item entity - A purchasable entry within a shopping list.
//!
//! Quantity and estimated unit price are exact decimals stored as text.

use crate::core::money;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the list this item belongs to; never changes after creation
    pub list_id: i64,
    /// What to buy (e.g., "Milk")
    pub name: String,
    /// Amount to buy as decimal text, always > 0
    pub quantity: String,
    /// Unit label (e.g., "kg", "pcs"); may be empty
    pub unit: String,
    /// Optional grouping label (e.g., "dairy")
    pub category: Option<String>,
    /// Optional estimated price per unit as decimal text
    pub estimated_unit_price: Option<String>,
    /// Whether the item has been bought
    pub bought: bool,
    /// Free-text note; may be empty
    pub note: String,
    /// When the item was created
    pub created_at: DateTime,
    /// When the item was last modified
    pub updated_at: DateTime,
}

impl Model {
    /// Parses the stored `quantity`.
    pub fn quantity_value(&self) -> crate::errors::Result<Decimal> {
        money::parse_stored("quantity", &self.quantity)
    }

    /// Parses the stored `estimated_unit_price`, if any.
    pub fn unit_price_value(&self) -> crate::errors::Result<Option<Decimal>> {
        self.estimated_unit_price
            .as_deref()
            .map(|raw| money::parse_stored("estimated_unit_price", raw))
            .transpose()
    }
}

/// Defines relationships between Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one shopping list
    #[sea_orm(
        belongs_to = "super::shopping_list::Entity",
        from = "Column::ListId",
        to = "super::shopping_list::Column::Id",
        on_delete = "Cascade"
    )]
    ShoppingList,
}

impl Related<super::shopping_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingList.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
