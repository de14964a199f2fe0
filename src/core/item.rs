//! Item business logic - Handles all item-related operations.
//!
//! Items are always reached through their owning list: every operation first
//! resolves the list with [`get_owned_list`], so an item on somebody else's list
//! is indistinguishable from a missing one.
//!
//! Every write also bumps the owning list's `updated_at`, in the same transaction
//! as the item change.

use crate::{
    core::{list::get_owned_list, money},
    entities::{Item, ShoppingList, item, shopping_list},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{JoinType, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait, prelude::*};
use tracing::{debug, instrument};

/// Input for [`create_item`]. Only `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    /// What to buy
    pub name: String,
    /// Defaults to 1
    pub quantity: Option<Decimal>,
    /// Defaults to empty
    pub unit: Option<String>,
    /// Optional grouping label
    pub category: Option<String>,
    /// Optional estimated price per unit
    pub unit_price: Option<Decimal>,
    /// Defaults to empty
    pub note: Option<String>,
}

impl NewItem {
    /// An item with just a name and every other field defaulted.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial update for [`update_item`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    /// New name
    pub name: Option<String>,
    /// New quantity
    pub quantity: Option<Decimal>,
    /// New unit label
    pub unit: Option<String>,
    /// `Some(None)` clears the category
    pub category: Option<Option<String>>,
    /// `Some(None)` clears the price
    pub unit_price: Option<Option<Decimal>>,
    /// New bought state
    pub bought: Option<bool>,
    /// New note
    pub note: Option<String>,
}

/// Filters for [`list_items`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Only items with this bought state
    pub bought: Option<bool>,
    /// Only items in this category
    pub category: Option<String>,
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("Item name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: Option<Decimal>) -> Result<Option<String>> {
    price
        .map(|amount| money::ensure_non_negative("Unit price", amount).map(money::to_stored))
        .transpose()
}

/// Blank categories are stored as "no category".
fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Fetches an item whose list is owned by `owner_id`.
pub async fn get_owned_item<C>(db: &C, owner_id: i64, item_id: i64) -> Result<item::Model>
where
    C: ConnectionTrait,
{
    Item::find_by_id(item_id)
        .join(JoinType::InnerJoin, item::Relation::ShoppingList.def())
        .filter(shopping_list::Column::OwnerId.eq(owner_id))
        .one(db)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })
}

/// Retrieves the items of an owned list ordered by id, applying `filter`.
pub async fn list_items(
    db: &DatabaseConnection,
    owner_id: i64,
    list_id: i64,
    filter: ItemFilter,
) -> Result<Vec<item::Model>> {
    let list = get_owned_list(db, owner_id, list_id).await?;

    let mut query = Item::find().filter(item::Column::ListId.eq(list.id));
    if let Some(bought) = filter.bought {
        query = query.filter(item::Column::Bought.eq(bought));
    }
    if let Some(category) = normalize_category(filter.category) {
        query = query.filter(item::Column::Category.eq(category));
    }

    query
        .order_by_asc(item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds an item to an owned list, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The list does not exist or is not owned by `owner_id`
/// - The name is empty or whitespace-only
/// - The quantity is zero or negative
/// - The unit price is negative
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_item(
    db: &DatabaseConnection,
    owner_id: i64,
    list_id: i64,
    new: NewItem,
) -> Result<item::Model> {
    let name = validate_name(&new.name)?;
    let quantity = money::ensure_positive_quantity(new.quantity.unwrap_or(Decimal::ONE))?;
    let price = validate_price(new.unit_price)?;

    let txn = db.begin().await?;
    let list = get_owned_list(&txn, owner_id, list_id).await?;
    let now = chrono::Utc::now().naive_utc();

    let item = item::ActiveModel {
        list_id: Set(list.id),
        name: Set(name),
        quantity: Set(money::to_stored(quantity)),
        unit: Set(new.unit.map(|u| u.trim().to_string()).unwrap_or_default()),
        category: Set(normalize_category(new.category)),
        estimated_unit_price: Set(price),
        bought: Set(false),
        note: Set(new.note.unwrap_or_default()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = item.insert(&txn).await?;
    touch_list(&txn, list.id).await?;
    txn.commit().await?;
    debug!(item_id = created.id, list_id = list.id, "Created item");
    Ok(created)
}

/// Fetches one item through its owning list.
pub async fn get_item(db: &DatabaseConnection, owner_id: i64, item_id: i64) -> Result<item::Model> {
    get_owned_item(db, owner_id, item_id).await
}

/// Applies `patch` to an owned item. The owning list never changes.
#[instrument(skip(db))]
pub async fn update_item(
    db: &DatabaseConnection,
    owner_id: i64,
    item_id: i64,
    patch: ItemPatch,
) -> Result<item::Model> {
    let name = patch.name.as_deref().map(validate_name).transpose()?;
    let quantity = patch
        .quantity
        .map(money::ensure_positive_quantity)
        .transpose()?;
    let price = patch.unit_price.map(validate_price).transpose()?;

    let txn = db.begin().await?;
    let existing = get_owned_item(&txn, owner_id, item_id).await?;
    let list_id = existing.list_id;
    let mut item: item::ActiveModel = existing.into();

    if let Some(name) = name {
        item.name = Set(name);
    }
    if let Some(quantity) = quantity {
        item.quantity = Set(money::to_stored(quantity));
    }
    if let Some(unit) = patch.unit {
        item.unit = Set(unit.trim().to_string());
    }
    if let Some(category) = patch.category {
        item.category = Set(normalize_category(category));
    }
    if let Some(price) = price {
        item.estimated_unit_price = Set(price);
    }
    if let Some(bought) = patch.bought {
        item.bought = Set(bought);
    }
    if let Some(note) = patch.note {
        item.note = Set(note);
    }
    item.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = item.update(&txn).await?;
    touch_list(&txn, list_id).await?;
    txn.commit().await?;
    Ok(updated)
}

/// Flips the bought flag of an owned item and persists it.
///
/// No other item is affected and no summary is cached, so callers should
/// recompute the list summary afterwards.
#[instrument(skip(db))]
pub async fn toggle_bought(
    db: &DatabaseConnection,
    owner_id: i64,
    item_id: i64,
) -> Result<item::Model> {
    let txn = db.begin().await?;
    let existing = get_owned_item(&txn, owner_id, item_id).await?;
    let list_id = existing.list_id;
    let bought = !existing.bought;

    let mut item: item::ActiveModel = existing.into();
    item.bought = Set(bought);
    item.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = item.update(&txn).await?;
    touch_list(&txn, list_id).await?;
    txn.commit().await?;
    debug!(item_id, bought, "Toggled bought flag");
    Ok(updated)
}

/// Deletes an owned item.
#[instrument(skip(db))]
pub async fn delete_item(db: &DatabaseConnection, owner_id: i64, item_id: i64) -> Result<()> {
    let txn = db.begin().await?;
    let existing = get_owned_item(&txn, owner_id, item_id).await?;
    Item::delete_by_id(existing.id).exec(&txn).await?;
    touch_list(&txn, existing.list_id).await?;
    txn.commit().await?;
    Ok(())
}

/// Bumps the list's `updated_at` after its contents changed.
async fn touch_list<C>(db: &C, list_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    ShoppingList::update_many()
        .col_expr(
            shopping_list::Column::UpdatedAt,
            Expr::value(chrono::Utc::now().naive_utc()),
        )
        .filter(shopping_list::Column::Id.eq(list_id))
        .exec(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_item_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_item(&db, 1, 1, NewItem::named("  ")).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_item(
            &db,
            1,
            1,
            NewItem {
                quantity: Some(Decimal::ZERO),
                ..NewItem::named("Milk")
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_item(
            &db,
            1,
            1,
            NewItem {
                unit_price: Some(Decimal::new(-50, 2)),
                ..NewItem::named("Milk")
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_item_defaults() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "alice").await?;
        let list = create_test_list(&db, owner.id, "Groceries", None).await?;

        let item = create_item(&db, owner.id, list.id, NewItem::named(" Milk ")).await?;

        assert_eq!(item.name, "Milk");
        assert_eq!(item.list_id, list.id);
        assert_eq!(item.quantity_value()?, Decimal::ONE);
        assert_eq!(item.unit_price_value()?, None);
        assert_eq!(item.unit, "");
        assert_eq!(item.note, "");
        assert_eq!(item.category, None);
        assert!(!item.bought);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_item_on_foreign_list_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "alice").await?;
        let bob = create_test_user(&db, "bob").await?;
        let list = create_test_list(&db, alice.id, "Alice's", None).await?;

        let result = create_item(&db, bob.id, list.id, NewItem::named("Sneaky")).await;
        assert!(matches!(result, Err(Error::ListNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_item_hides_foreign_items() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "alice").await?;
        let bob = create_test_user(&db, "bob").await?;
        let list = create_test_list(&db, alice.id, "Alice's", None).await?;
        let item = create_item(&db, alice.id, list.id, NewItem::named("Tea")).await?;

        assert_eq!(get_item(&db, alice.id, item.id).await?.id, item.id);
        assert!(matches!(
            get_item(&db, bob.id, item.id).await,
            Err(Error::ItemNotFound { .. })
        ));
        assert!(matches!(
            toggle_bought(&db, bob.id, item.id).await,
            Err(Error::ItemNotFound { .. })
        ));
        assert!(matches!(
            delete_item(&db, bob.id, item.id).await,
            Err(Error::ItemNotFound { .. })
        ));
        assert!(matches!(
            update_item(
                &db,
                bob.id,
                item.id,
                ItemPatch {
                    name: Some("Coffee".to_string()),
                    bought: Some(true),
                    ..ItemPatch::default()
                },
            )
            .await,
            Err(Error::ItemNotFound { id }) if id == item.id
        ));

        let untouched = get_item(&db, alice.id, item.id).await?;
        assert!(!untouched.bought);
        assert_eq!(untouched.name, "Tea");

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_bought_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "alice").await?;
        let list = create_test_list(&db, owner.id, "Groceries", None).await?;
        let item = create_item(&db, owner.id, list.id, NewItem::named("Bread")).await?;
        let other = create_item(&db, owner.id, list.id, NewItem::named("Butter")).await?;

        let toggled = toggle_bought(&db, owner.id, item.id).await?;
        assert!(toggled.bought);
        assert!(!get_item(&db, owner.id, other.id).await?.bought);

        let back = toggle_bought(&db, owner.id, item.id).await?;
        assert!(!back.bought);
        assert_eq!(back.name, item.name);
        assert_eq!(back.quantity, item.quantity);

        Ok(())
    }

    async fn list_updated_at(
        db: &DatabaseConnection,
        list_id: i64,
    ) -> Result<chrono::NaiveDateTime> {
        let list = ShoppingList::find_by_id(list_id).one(db).await?.unwrap();
        Ok(list.updated_at)
    }

    #[tokio::test]
    async fn test_item_writes_touch_the_list() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "alice").await?;
        let bob = create_test_user(&db, "bob").await?;
        let list = create_test_list(&db, alice.id, "Groceries", None).await?;
        let item = create_item(&db, alice.id, list.id, NewItem::named("Eggs")).await?;

        let before = list_updated_at(&db, list.id).await?;
        std::thread::sleep(std::time::Duration::from_millis(5));
        toggle_bought(&db, alice.id, item.id).await?;
        let after_toggle = list_updated_at(&db, list.id).await?;
        assert!(after_toggle > before);

        // A rejected write leaves the list alone.
        std::thread::sleep(std::time::Duration::from_millis(5));
        let denied = toggle_bought(&db, bob.id, item.id).await;
        assert!(matches!(denied, Err(Error::ItemNotFound { .. })));
        assert_eq!(list_updated_at(&db, list.id).await?, after_toggle);
        assert!(get_item(&db, alice.id, item.id).await?.bought);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_patch() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "alice").await?;
        let list = create_test_list(&db, owner.id, "Groceries", None).await?;
        let item = create_item(
            &db,
            owner.id,
            list.id,
            NewItem {
                category: Some("dairy".to_string()),
                unit_price: Some(Decimal::new(199, 2)),
                ..NewItem::named("Yoghurt")
            },
        )
        .await?;

        let updated = update_item(
            &db,
            owner.id,
            item.id,
            ItemPatch {
                quantity: Some(Decimal::new(25, 1)),
                unit: Some("kg".to_string()),
                category: Some(None),
                unit_price: Some(None),
                ..ItemPatch::default()
            },
        )
        .await?;

        assert_eq!(updated.quantity_value()?, Decimal::new(25, 1));
        assert_eq!(updated.unit, "kg");
        assert_eq!(updated.category, None);
        assert_eq!(updated.unit_price_value()?, None);
        assert_eq!(updated.name, "Yoghurt");
        assert_eq!(updated.list_id, list.id);

        let invalid = update_item(
            &db,
            owner.id,
            item.id,
            ItemPatch {
                quantity: Some(Decimal::NEGATIVE_ONE),
                ..ItemPatch::default()
            },
        )
        .await;
        assert!(matches!(invalid, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_items_filters() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "alice").await?;
        let list = create_test_list(&db, owner.id, "Groceries", None).await?;

        let milk = create_item(
            &db,
            owner.id,
            list.id,
            NewItem {
                category: Some("dairy".to_string()),
                ..NewItem::named("Milk")
            },
        )
        .await?;
        let cheese = create_item(
            &db,
            owner.id,
            list.id,
            NewItem {
                category: Some("dairy".to_string()),
                ..NewItem::named("Cheese")
            },
        )
        .await?;
        let apples = create_item(
            &db,
            owner.id,
            list.id,
            NewItem {
                category: Some("fruit".to_string()),
                ..NewItem::named("Apples")
            },
        )
        .await?;
        toggle_bought(&db, owner.id, cheese.id).await?;

        let all = list_items(&db, owner.id, list.id, ItemFilter::default()).await?;
        assert_eq!(
            all.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![milk.id, cheese.id, apples.id]
        );

        let dairy = list_items(
            &db,
            owner.id,
            list.id,
            ItemFilter {
                category: Some("dairy".to_string()),
                ..ItemFilter::default()
            },
        )
        .await?;
        assert_eq!(dairy.len(), 2);

        let pending_dairy = list_items(
            &db,
            owner.id,
            list.id,
            ItemFilter {
                bought: Some(false),
                category: Some("dairy".to_string()),
            },
        )
        .await?;
        assert_eq!(pending_dairy.len(), 1);
        assert_eq!(pending_dairy[0].id, milk.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_item() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "alice").await?;
        let list = create_test_list(&db, owner.id, "Groceries", None).await?;
        let item = create_item(&db, owner.id, list.id, NewItem::named("Jam")).await?;

        delete_item(&db, owner.id, item.id).await?;
        assert!(matches!(
            get_item(&db, owner.id, item.id).await,
            Err(Error::ItemNotFound { .. })
        ));

        Ok(())
    }
}
