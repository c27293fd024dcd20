use serde_json::Value;
use thiserror::Error;

/// Records kept per calendar date of a NEO feed.
pub const NEO_RECORDS_PER_DATE: usize = 1;

const COLLECTION_FIELD: &str = "near_earth_objects";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReshapeError {
    #[error("malformed NEO feed: `near_earth_objects` is missing or not an object")]
    MissingCollection,
}

/// Caps every date's record list at `cap` entries.
///
/// Keys, element order and all other top-level fields are left untouched.
/// Non-array values under a date key are kept as they are.
pub fn cap_neo_feed(mut payload: Value, cap: usize) -> Result<Value, ReshapeError> {
    let collection = payload
        .get_mut(COLLECTION_FIELD)
        .and_then(Value::as_object_mut)
        .ok_or(ReshapeError::MissingCollection)?;

    for records in collection.values_mut() {
        if let Some(list) = records.as_array_mut() {
            list.truncate(cap);
        }
    }
    Ok(payload)
}
