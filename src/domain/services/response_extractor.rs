//! Heuristics for pulling the generated text out of a remote reply.
//!
//! The remote API does not commit to a single reply shape, so extraction is an
//! ordered list of independent matchers. The first matcher that produces text
//! wins; a matcher that does not recognise the shape simply yields `None`.

use serde_json::{Map, Value};

type Matcher = fn(&Map<String, Value>) -> Option<String>;

const MATCHERS: &[Matcher] = &[candidate_text, keyed_text, candidates_fallback];

const TOP_LEVEL_KEYS: [&str; 3] = ["output", "result", "message"];
const NESTED_KEYS: [&str; 3] = ["text", "content", "message"];

/// Extract usable text from a decoded reply, or `None` if nothing matched.
pub fn extract_text(reply: &Value) -> Option<String> {
    let object = reply.as_object()?;
    MATCHERS.iter().find_map(|matcher| matcher(object))
}

/// `candidates[0].content.parts[0].text`
pub fn candidate_text(reply: &Map<String, Value>) -> Option<String> {
    let text = reply
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?
        .first()?
        .get("text")?;
    non_blank(text)
}

/// `output` / `result` / `message`, either as a string or as an object holding
/// `text` / `content` / `message`.
pub fn keyed_text(reply: &Map<String, Value>) -> Option<String> {
    TOP_LEVEL_KEYS.iter().find_map(|key| match reply.get(*key)? {
        value @ Value::String(_) => non_blank(value),
        Value::Object(nested) => NESTED_KEYS
            .iter()
            .find_map(|sub| nested.get(*sub).and_then(non_blank)),
        _ => None,
    })
}

/// Any `candidates` field at all, serialized as JSON.
pub fn candidates_fallback(reply: &Map<String, Value>) -> Option<String> {
    reply.get("candidates").map(Value::to_string)
}

fn non_blank(value: &Value) -> Option<String> {
    let trimmed = value.as_str()?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
