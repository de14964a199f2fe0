//! Shared test utilities for the Shop API.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        list::{self, NewList},
        user,
    },
    entities,
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user whose bearer token is `"<username>-token"`.
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::user::Model> {
    user::upsert_user(db, username, &format!("{username}-token")).await
}

/// Creates a test list for `owner_id`.
///
/// # Defaults
/// * `currency`: "USD"
pub async fn create_test_list(
    db: &DatabaseConnection,
    owner_id: i64,
    name: &str,
    budget: Option<Decimal>,
) -> Result<entities::shopping_list::Model> {
    list::create_list(
        db,
        owner_id,
        NewList {
            name: name.to_string(),
            currency: "USD".to_string(),
            budget,
        },
    )
    .await
}
