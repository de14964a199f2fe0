//! Budget summary computation.
//!
//! [`compute_summary`] is a pure reduction over a list and its items. It never
//! touches the database; [`get_list_summary`] is the thin loader that reads a
//! consistent snapshot, checks ownership, and hands the data to the engine.

use crate::{
    core::{list, money},
    entities::{Item, ShoppingListModel, item},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::instrument;

/// The priced view of one item that the engine works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLine {
    /// Amount to buy, always > 0
    pub quantity: Decimal,
    /// Estimated price per unit; `None` contributes nothing
    pub unit_price: Option<Decimal>,
    /// Whether the item has been bought
    pub bought: bool,
}

impl SummaryLine {
    /// `unit_price × quantity`, or zero when unpriced. `None` on overflow.
    #[must_use]
    pub fn contribution(&self) -> Option<Decimal> {
        self.unit_price
            .map_or(Some(Decimal::ZERO), |price| price.checked_mul(self.quantity))
    }
}

impl TryFrom<&item::Model> for SummaryLine {
    type Error = Error;

    fn try_from(model: &item::Model) -> Result<Self> {
        Ok(Self {
            quantity: model.quantity_value()?,
            unit_price: model.unit_price_value()?,
            bought: model.bought,
        })
    }
}

/// Totals report for one shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetSummary {
    /// List identity
    pub id: i64,
    /// List display name
    pub name: String,
    /// Currency the amounts are expressed in
    pub currency: String,
    /// The list's budget amount as stored, zero when the list has none
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub budget: Decimal,
    /// Estimated cost of all items, rounded to the currency's minor unit
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_estimated: Decimal,
    /// Estimated cost of bought items only, rounded the same way
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub bought_estimated: Decimal,
    /// `budget - total_estimated`; negative means overspend
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub remaining: Decimal,
    /// Number of items regardless of bought state
    pub item_count: u64,
    /// Number of bought items
    pub bought_count: u64,
}

impl BudgetSummary {
    /// Whether the estimate exceeds the budget.
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.remaining < Decimal::ZERO
    }
}

/// Computes the summary for `list` over `lines`.
///
/// Contributions are summed exactly and rounded once at the end, half away from
/// zero, to the list currency's minor unit. The budget is reported as given.
/// Order of `lines` does not matter.
///
/// Inputs that passed [`money`] validation cannot overflow; anything else that
/// would exceed the decimal range yields [`Error::AmountOutOfRange`].
pub fn compute_summary(
    list_id: i64,
    name: &str,
    currency: &str,
    budget: Option<Decimal>,
    lines: &[SummaryLine],
) -> Result<BudgetSummary> {
    let out_of_range = || Error::AmountOutOfRange { list_id };

    let mut total = Decimal::ZERO;
    let mut bought_total = Decimal::ZERO;
    let mut bought_count = 0_u64;

    for line in lines {
        let contribution = line.contribution().ok_or_else(out_of_range)?;
        total = total.checked_add(contribution).ok_or_else(out_of_range)?;
        if line.bought {
            bought_total = bought_total
                .checked_add(contribution)
                .ok_or_else(out_of_range)?;
            bought_count += 1;
        }
    }

    let budget = budget.unwrap_or(Decimal::ZERO);
    let total_estimated = money::round_to_currency(total, currency);
    let remaining = budget
        .checked_sub(total_estimated)
        .ok_or_else(out_of_range)?;

    Ok(BudgetSummary {
        id: list_id,
        name: name.to_string(),
        currency: currency.to_string(),
        budget,
        total_estimated,
        bought_estimated: money::round_to_currency(bought_total, currency),
        remaining,
        item_count: lines.len() as u64,
        bought_count,
    })
}

/// Runs [`compute_summary`] over a loaded list model and its item models.
pub fn summarize(list: &ShoppingListModel, items: &[item::Model]) -> Result<BudgetSummary> {
    let lines = items
        .iter()
        .map(SummaryLine::try_from)
        .collect::<Result<Vec<_>>>()?;

    compute_summary(list.id, &list.name, &list.currency, list.budget()?, &lines)
}

/// Loads list `list_id` for `owner_id` together with all its items and summarizes it.
///
/// The list and its items are read inside one transaction so the report reflects a
/// single snapshot. Returns [`crate::errors::Error::ListNotFound`] when the list does
/// not exist or belongs to someone else.
#[instrument(skip(db))]
pub async fn get_list_summary(
    db: &DatabaseConnection,
    owner_id: i64,
    list_id: i64,
) -> Result<BudgetSummary> {
    let txn = db.begin().await?;

    let list = list::get_owned_list(&txn, owner_id, list_id).await?;
    let items = Item::find()
        .filter(item::Column::ListId.eq(list.id))
        .order_by_asc(item::Column::Id)
        .all(&txn)
        .await?;

    txn.commit().await?;

    summarize(&list, &items)
}
