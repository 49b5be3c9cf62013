//! Tag list codec.
//!
//! Tags are persisted in the `tags` json column as a JSON array of strings,
//! so any tag content round-trips losslessly; there is no hand-rolled text
//! format to corrupt. An empty or `null` stored value decodes to an empty
//! list, never to a single empty tag.

use serde_json::Value;

use crate::{EngineError, ResultEngine};

/// Encode a tag list for storage. An empty list becomes an empty array.
pub fn encode(tags: &[String]) -> Value {
    Value::Array(tags.iter().map(|tag| Value::String(tag.clone())).collect())
}

/// Decode a stored tags value back into a list.
///
/// Anything other than `null` or an array of strings is a corrupted row and
/// surfaces as [`EngineError::Decode`].
pub fn decode(value: &Value) -> ResultEngine<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| EngineError::Decode(format!("tag is not a string: {item}")))
            })
            .collect(),
        other => Err(EngineError::Decode(format!(
            "tags column is not an array: {other}"
        ))),
    }
}
