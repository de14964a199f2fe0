//! Shopping list entity - A named, owned collection of items with an optional budget.
//!
//! The budget is stored as canonical decimal text so that it round-trips through
//! `SQLite` without ever passing through a float. Use [`Model::budget`] to read it.

use crate::core::money;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a shopping list
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ListStatus {
    /// In use
    #[sea_orm(string_value = "active")]
    Active,
    /// Soft-retired; still readable and restorable
    #[sea_orm(string_value = "archived")]
    Archived,
}

/// Shopping list database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shopping_lists")]
pub struct Model {
    /// Unique identifier for the list
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the owning user; never changes after creation
    pub owner_id: i64,
    /// Display name (e.g., "Weekly groceries")
    pub name: String,
    /// ISO 4217 currency code, upper-case
    pub currency: String,
    /// Optional budget amount as decimal text
    pub budget_amount: Option<String>,
    /// Active or archived
    pub status: ListStatus,
    /// When the list was created
    pub created_at: DateTime,
    /// When the list was last modified
    pub updated_at: DateTime,
}

impl Model {
    /// Parses the stored budget, if any.
    pub fn budget(&self) -> crate::errors::Result<Option<Decimal>> {
        self.budget_amount
            .as_deref()
            .map(|raw| money::parse_stored("budget_amount", raw))
            .transpose()
    }
}

/// Defines relationships between `ShoppingList` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each list belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    /// One list has many items
    #[sea_orm(has_many = "super::item::Entity")]
    Items,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
