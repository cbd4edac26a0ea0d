use sea_orm::*;

use crate::models::store::{self, Entity as Store, STORE_TYPE_GODOWN};
use crate::models::user::{self, Entity as User};
use crate::models::user_profile::{self, Entity as UserProfile};

use super::ServiceError;

/// Resolve the central godown. The godown is a singleton by convention, so
/// zero or multiple matches are configuration errors and fail loudly.
pub async fn find_godown<C: ConnectionTrait>(conn: &C) -> Result<store::Model, ServiceError> {
    let mut godowns = Store::find()
        .filter(store::Column::StoreType.eq(STORE_TYPE_GODOWN))
        .all(conn)
        .await?;

    match godowns.len() {
        0 => Err(ServiceError::InvalidState(
            "Central godown is not configured.".to_string(),
        )),
        1 => Ok(godowns.remove(0)),
        _ => Err(ServiceError::InvalidState(
            "Multiple godown stores configured; exactly one is required.".to_string(),
        )),
    }
}

/// Resolve the store an operator is bound to via their profile.
/// Missing profile, missing store binding and dangling store id all surface
/// the same "not assigned" message.
pub async fn assigned_store<C: ConnectionTrait>(
    conn: &C,
    username: &str,
) -> Result<store::Model, ServiceError> {
    let user = User::find()
        .filter(user::Column::Username.eq(username))
        .one(conn)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let store_id = UserProfile::find()
        .filter(user_profile::Column::UserId.eq(user.id))
        .one(conn)
        .await?
        .and_then(|p| p.store_id);

    let store = match store_id {
        Some(id) => Store::find_by_id(id).one(conn).await?,
        None => None,
    };

    store.ok_or_else(|| {
        ServiceError::InvalidState("You are not assigned to any store.".to_string())
    })
}
