//! User entity - The owner of shopping lists.
//!
//! Users are provisioned from `config.toml` at startup; the service exposes no
//! registration endpoint. The `api_token` column is the bearer credential.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across the system
    #[sea_orm(unique)]
    pub username: String,
    /// Bearer token presented in the `Authorization` header
    #[sea_orm(unique)]
    #[serde(skip_serializing)]
    pub api_token: String,
    /// When the user was first seeded
    pub created_at: DateTime,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user owns many shopping lists
    #[sea_orm(has_many = "super::shopping_list::Entity")]
    ShoppingLists,
}

impl Related<super::shopping_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingLists.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
