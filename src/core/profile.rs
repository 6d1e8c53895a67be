//! Linked airlines - which game airline a Discord user plays.

use crate::{
    api::models::Airline,
    entities::{UserProfile, user_profile},
    errors::Result,
};
use sea_orm::{Set, prelude::*};

/// Links `user_id` to `airline`, replacing any previous link.
pub async fn link_airline(
    db: &DatabaseConnection,
    user_id: &str,
    airline: &Airline,
) -> Result<user_profile::Model> {
    let now = chrono::Utc::now();

    if let Some(existing) = get_profile(db, user_id).await? {
        let mut active: user_profile::ActiveModel = existing.into();
        active.airline_id = Set(airline.id);
        active.airline_name = Set(airline.name.clone());
        active.realism = Set(airline.realism);
        active.updated_at = Set(now);
        return active.update(db).await.map_err(Into::into);
    }

    user_profile::ActiveModel {
        user_id: Set(user_id.to_string()),
        airline_id: Set(airline.id),
        airline_name: Set(airline.name.clone()),
        realism: Set(airline.realism),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// The link stored for `user_id`, if any.
pub async fn get_profile(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<user_profile::Model>> {
    UserProfile::find()
        .filter(user_profile::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Removes the link for `user_id`. Returns false when there was none.
pub async fn unlink(db: &DatabaseConnection, user_id: &str) -> Result<bool> {
    let result = UserProfile::delete_many()
        .filter(user_profile::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{airline, setup_test_db};

    #[tokio::test]
    async fn test_link_then_relink_keeps_one_row() -> Result<()> {
        let db = setup_test_db().await?;
        link_airline(&db, "111", &airline(1, "First Air")).await?;
        let relinked = link_airline(&db, "111", &airline(2, "Second Air")).await?;

        assert_eq!(relinked.airline_id, 2);
        assert_eq!(UserProfile::find().all(&db).await?.len(), 1);
        let stored = get_profile(&db, "111").await?.unwrap();
        assert_eq!(stored.airline_name, "Second Air");
        Ok(())
    }

    #[tokio::test]
    async fn test_unlink() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(!unlink(&db, "222").await?);

        link_airline(&db, "222", &airline(5, "Fly")).await?;
        assert!(unlink(&db, "222").await?);
        assert!(get_profile(&db, "222").await?.is_none());
        Ok(())
    }
}
