//! Shopping list business logic - Handles all list-related operations.
//!
//! Every function takes the caller's `owner_id` explicitly. A list that exists but
//! belongs to someone else is reported exactly like a missing one
//! ([`Error::ListNotFound`]), so callers cannot discover other users' lists.

use crate::{
    core::money,
    entities::{Item, ListStatus, ShoppingList, item, shopping_list},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Input for [`create_list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewList {
    /// Display name
    pub name: String,
    /// Currency code; validated and upper-cased
    pub currency: String,
    /// Optional non-negative budget
    pub budget: Option<Decimal>,
}

/// Partial update for [`update_list`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPatch {
    /// New display name
    pub name: Option<String>,
    /// New currency code
    pub currency: Option<String>,
    /// `Some(None)` clears the budget, `Some(Some(x))` sets it
    pub budget: Option<Option<Decimal>>,
    /// New lifecycle status
    pub status: Option<ListStatus>,
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("List name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_budget(budget: Option<Decimal>) -> Result<Option<String>> {
    budget
        .map(|amount| money::ensure_non_negative("Budget", amount).map(money::to_stored))
        .transpose()
}

/// Fetches a list by id, but only if `owner_id` owns it.
///
/// This is the access check every list and item operation goes through.
pub async fn get_owned_list<C>(db: &C, owner_id: i64, list_id: i64) -> Result<shopping_list::Model>
where
    C: ConnectionTrait,
{
    ShoppingList::find_by_id(list_id)
        .filter(shopping_list::Column::OwnerId.eq(owner_id))
        .one(db)
        .await?
        .ok_or(Error::ListNotFound { id: list_id })
}

/// Retrieves the owner's lists ordered by name, optionally filtered by status.
pub async fn list_lists(
    db: &DatabaseConnection,
    owner_id: i64,
    status: Option<ListStatus>,
) -> Result<Vec<shopping_list::Model>> {
    let mut query = ShoppingList::find().filter(shopping_list::Column::OwnerId.eq(owner_id));
    if let Some(status) = status {
        query = query.filter(shopping_list::Column::Status.eq(status));
    }

    query
        .order_by_asc(shopping_list::Column::Name)
        .order_by_asc(shopping_list::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new active list for `owner_id`, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The currency is not a three-letter code
/// - The budget is negative
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_list(
    db: &DatabaseConnection,
    owner_id: i64,
    new: NewList,
) -> Result<shopping_list::Model> {
    let name = validate_name(&new.name)?;
    let currency = money::normalize_currency(&new.currency)?;
    let budget_amount = validate_budget(new.budget)?;

    let now = chrono::Utc::now().naive_utc();

    let list = shopping_list::ActiveModel {
        owner_id: Set(owner_id),
        name: Set(name),
        currency: Set(currency),
        budget_amount: Set(budget_amount),
        status: Set(ListStatus::Active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = list.insert(db).await?;
    info!(list_id = created.id, "Created shopping list");
    Ok(created)
}

/// Applies `patch` to an owned list and refreshes its updated timestamp.
///
/// The owner reference is never touched. All fields are validated before anything
/// is written.
#[instrument(skip(db))]
pub async fn update_list(
    db: &DatabaseConnection,
    owner_id: i64,
    list_id: i64,
    patch: ListPatch,
) -> Result<shopping_list::Model> {
    let name = patch.name.as_deref().map(validate_name).transpose()?;
    let currency = patch
        .currency
        .as_deref()
        .map(money::normalize_currency)
        .transpose()?;
    let budget = patch.budget.map(validate_budget).transpose()?;

    let mut list: shopping_list::ActiveModel =
        get_owned_list(db, owner_id, list_id).await?.into();

    if let Some(name) = name {
        list.name = Set(name);
    }
    if let Some(currency) = currency {
        list.currency = Set(currency);
    }
    if let Some(budget_amount) = budget {
        list.budget_amount = Set(budget_amount);
    }
    if let Some(status) = patch.status {
        list.status = Set(status);
    }
    list.updated_at = Set(chrono::Utc::now().naive_utc());

    list.update(db).await.map_err(Into::into)
}

/// Moves an owned list to `status`. Archiving an archived list is a no-op update.
pub async fn set_status(
    db: &DatabaseConnection,
    owner_id: i64,
    list_id: i64,
    status: ListStatus,
) -> Result<shopping_list::Model> {
    update_list(
        db,
        owner_id,
        list_id,
        ListPatch {
            status: Some(status),
            ..ListPatch::default()
        },
    )
    .await
}

/// Archives an owned list.
pub async fn archive_list(
    db: &DatabaseConnection,
    owner_id: i64,
    list_id: i64,
) -> Result<shopping_list::Model> {
    set_status(db, owner_id, list_id, ListStatus::Archived).await
}

/// Restores an archived list to active.
pub async fn restore_list(
    db: &DatabaseConnection,
    owner_id: i64,
    list_id: i64,
) -> Result<shopping_list::Model> {
    set_status(db, owner_id, list_id, ListStatus::Active).await
}

/// Hard-deletes an owned list together with all of its items.
///
/// Items are removed explicitly in the same transaction, so the cascade does not
/// depend on the connection having foreign-key enforcement switched on.
#[instrument(skip(db))]
pub async fn delete_list(db: &DatabaseConnection, owner_id: i64, list_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let list = get_owned_list(&txn, owner_id, list_id).await?;
    let removed = Item::delete_many()
        .filter(item::Column::ListId.eq(list.id))
        .exec(&txn)
        .await?;
    ShoppingList::delete_by_id(list.id).exec(&txn).await?;

    txn.commit().await?;

    info!(
        list_id,
        items_removed = removed.rows_affected,
        "Deleted shopping list"
    );
    Ok(())
}
