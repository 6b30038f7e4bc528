use crate::data::seed_catalog;
use crate::error::{ApiError, ApiResult};
use crate::mapping::timestamp_now;
use crate::storage::Storage;
use crate::types::{ContentItem, Session};

pub const MOVIES_SLOT: &str = "netflex_movies";
pub const USER_SLOT: &str = "netflex_user";

fn decode<T: serde::de::DeserializeOwned>(slot: &str, raw: &str) -> ApiResult<T> {
    serde_json::from_str(raw).map_err(|source| {
        tracing::warn!(slot, error = %source, "slot holds malformed json");
        ApiError::Corrupt { slot: slot.to_string(), source }
    })
}

fn encode<T: serde::Serialize>(value: &T) -> ApiResult<String> {
    serde_json::to_string(value).map_err(|e| ApiError::Storage(e.into()))
}

/// Whole collection in storage order. An absent slot reads as empty.
pub async fn load_movies(store: &dyn Storage) -> ApiResult<Vec<ContentItem>> {
    match store.get_slot(MOVIES_SLOT).await? {
        Some(raw) => decode(MOVIES_SLOT, &raw),
        None => Ok(Vec::new()),
    }
}

pub async fn save_movies(store: &dyn Storage, movies: &[ContentItem]) -> ApiResult<()> {
    store.put_slot(MOVIES_SLOT, &encode(&movies)?).await?;
    Ok(())
}

/// Write the example catalog if the collection slot has never been written.
/// Returns whether seeding happened. An existing slot, even `[]`, is left alone.
pub async fn seed_if_absent(store: &dyn Storage) -> ApiResult<bool> {
    if store.get_slot(MOVIES_SLOT).await?.is_some() { return Ok(false); }
    let mocks = seed_catalog(&timestamp_now());
    save_movies(store, &mocks).await?;
    tracing::info!(count = mocks.len(), "seeded example catalog");
    Ok(true)
}

pub async fn load_session(store: &dyn Storage) -> ApiResult<Option<Session>> {
    match store.get_slot(USER_SLOT).await? {
        Some(raw) => decode(USER_SLOT, &raw).map(Some),
        None => Ok(None),
    }
}

pub async fn save_session(store: &dyn Storage, session: &Session) -> ApiResult<()> {
    store.put_slot(USER_SLOT, &encode(session)?).await?;
    Ok(())
}

pub async fn clear_session(store: &dyn Storage) -> ApiResult<()> {
    store.remove_slot(USER_SLOT).await?;
    Ok(())
}
