//! User business logic - token lookup and seeding from configuration.
//!
//! Accounts are not created over HTTP. They come from the `[[users]]` table in
//! `config.toml` and are upserted by username at startup.

use crate::{
    config::settings::UserConfig,
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

/// Resolves a bearer token to its user, if any.
pub async fn find_by_token(db: &DatabaseConnection, token: &str) -> Result<Option<user::Model>> {
    if token.is_empty() {
        return Ok(None);
    }

    User::find()
        .filter(user::Column::ApiToken.eq(token))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by username.
pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a user or, if the username already exists, replaces its token.
///
/// # Errors
/// Returns an error if the username or token is blank, or the database write fails
/// (for example because another user already holds the token).
pub async fn upsert_user(
    db: &DatabaseConnection,
    username: &str,
    api_token: &str,
) -> Result<user::Model> {
    let username = username.trim();
    let api_token = api_token.trim();
    if username.is_empty() {
        return Err(Error::validation("Username cannot be empty"));
    }
    if api_token.is_empty() {
        return Err(Error::validation(format!(
            "API token for user {username} cannot be empty"
        )));
    }

    if let Some(existing) = find_by_username(db, username).await? {
        if existing.api_token == api_token {
            return Ok(existing);
        }
        let mut active: user::ActiveModel = existing.into();
        active.api_token = Set(api_token.to_string());
        return active.update(db).await.map_err(Into::into);
    }

    let user = user::ActiveModel {
        username: Set(username.to_string()),
        api_token: Set(api_token.to_string()),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    user.insert(db).await.map_err(Into::into)
}

/// Seeds every configured user. Safe to run on every startup.
#[instrument(skip_all, fields(count = users.len()))]
pub async fn seed_users(db: &DatabaseConnection, users: &[UserConfig]) -> Result<Vec<user::Model>> {
    let mut seeded = Vec::with_capacity(users.len());
    for entry in users {
        seeded.push(upsert_user(db, &entry.username, &entry.token).await?);
    }
    info!("Seeded {} user(s) from configuration", seeded.len());
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_find_by_token() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "alice").await?;

        let found = find_by_token(&db, &alice.api_token).await?;
        assert_eq!(found.map(|u| u.id), Some(alice.id));
        assert!(find_by_token(&db, "nope").await?.is_none());
        assert!(find_by_token(&db, "").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_users_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let users = vec![
            UserConfig {
                username: "alice".to_string(),
                token: "alice-token".to_string(),
            },
            UserConfig {
                username: "bob".to_string(),
                token: "bob-token".to_string(),
            },
        ];

        let first = seed_users(&db, &users).await?;
        let second = seed_users(&db, &users).await?;
        assert_eq!(first, second);
        assert_eq!(User::find().all(&db).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_rotates_token() -> Result<()> {
        let db = setup_test_db().await?;
        let original = upsert_user(&db, "alice", "old").await?;
        let rotated = upsert_user(&db, "alice", "new").await?;

        assert_eq!(original.id, rotated.id);
        assert!(find_by_token(&db, "old").await?.is_none());
        assert_eq!(find_by_token(&db, "new").await?.unwrap().id, original.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_rejects_blank_fields() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(matches!(
            upsert_user(&db, " ", "token").await,
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            upsert_user(&db, "alice", "").await,
            Err(Error::Validation { .. })
        ));
        Ok(())
    }
}
