//! Structured output extraction from free-form model replies
//!
//! Models tend to wrap JSON in prose or code fences. The parser locates the
//! first JSON object or array literal and decodes it; anything unparsable
//! collapses to a caller-supplied default so that downstream stages only
//! ever see well-formed payloads.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Decode `text` as JSON, or the first JSON literal found inside it
///
/// The literal spans from the first `{` (or `[`) to the last matching
/// closing brace (or bracket). Returns `default` when the text is empty, no
/// literal is found, or the span is not valid JSON.
pub fn parse_structured(text: &str, default: Value) -> Value {
    if text.trim().is_empty() {
        return default;
    }

    if let Ok(value) = serde_json::from_str(text) {
        return value;
    }

    let Some(span) = literal_span(text) else {
        debug!("No JSON literal in model reply");
        return default;
    };

    serde_json::from_str(span).unwrap_or_else(|e| {
        debug!(error = %e, "Model reply is not valid JSON");
        default
    })
}

/// Decode a reply into a typed payload
///
/// Shape mismatches, such as a top-level array or a record missing a
/// required field, yield `T::default()`.
pub fn parse_payload<T>(text: &str) -> T
where
    T: DeserializeOwned + Default,
{
    decode_value(parse_structured(text, Value::Object(serde_json::Map::new())))
}

/// Deserialize an already-parsed value, falling back to `T::default()`
pub fn decode_value<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(value).unwrap_or_else(|e| {
        debug!(error = %e, "Model reply does not match the expected shape");
        T::default()
    })
}

fn literal_span(text: &str) -> Option<&str> {
    text.char_indices()
        .filter(|(_, c)| matches!(c, '{' | '['))
        .find_map(|(start, open)| {
            let close = if open == '{' { '}' } else { ']' };
            text.rfind(close)
                .filter(|&end| end > start)
                .map(|end| &text[start..=end])
        })
}
