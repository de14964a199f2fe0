//! Core business logic - framework-agnostic list, item and budget summary operations.
//!
//! Nothing in here knows about HTTP. Every function that reads or writes user data
//! takes the caller's identity as an explicit `owner_id` argument.

/// Shopping item operations, including the bought-flag toggle
pub mod item;
/// Shopping list operations and the ownership check
pub mod list;
/// Exact-decimal parsing, validation and currency rounding
pub mod money;
/// The budget summary engine
pub mod summary;
/// User lookup and seeding
pub mod user;
