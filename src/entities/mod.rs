//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod item;
pub mod shopping_list;
pub mod user;

// Re-export specific types to avoid conflicts
pub use item::{Column as ItemColumn, Entity as Item, Model as ItemModel};
pub use shopping_list::{
    Column as ShoppingListColumn, Entity as ShoppingList, ListStatus, Model as ShoppingListModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
