//! Normalization of untrusted submissions into [`RsvpFields`].
//!
//! Every coercion rule lives here as an explicit default substitution. Only
//! the first violated rule is reported: guest name before contributions.

use serde_json::Value;

use super::RsvpFields;

pub const GUEST_NAME_REQUIRED: &str = "Guest name is required.";
pub const CONTRIBUTION_REQUIRED: &str = "At least one contribution is required.";

const DEFAULT_GUEST_COUNT: u32 = 1;

/// A client-caused rejection. The message is safe to show to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: &str) -> Self {
        Self(message.to_string())
    }
}

/// Validate a raw payload. A non-object payload behaves like an empty object.
pub fn validate(raw: &Value) -> Result<RsvpFields, ValidationError> {
    let guest_name = raw
        .get("guestName")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if guest_name.is_empty() {
        return Err(ValidationError::new(GUEST_NAME_REQUIRED));
    }

    let contributions = raw
        .get("contributions")
        .map(normalize_contributions)
        .unwrap_or_default();
    if contributions.is_empty() {
        return Err(ValidationError::new(CONTRIBUTION_REQUIRED));
    }

    let notes = raw
        .get("notes")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();

    Ok(RsvpFields {
        guest_name: guest_name.to_string(),
        guest_count: raw
            .get("guestCount")
            .and_then(parse_guest_count)
            .unwrap_or(DEFAULT_GUEST_COUNT),
        notes: notes.to_string(),
        contributions,
    })
}

/// Returns `None` whenever the value should fall back to the default count.
fn parse_guest_count(value: &Value) -> Option<u32> {
    let parsed = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => {
                let f = n.as_f64()?.trunc();
                if f < i64::MIN as f64 || f > i64::MAX as f64 {
                    return None;
                }
                f as i64
            }
        },
        Value::String(s) => parse_integer_prefix(s)?,
        _ => return None,
    };
    u32::try_from(parsed).ok().filter(|count| *count > 0)
}

/// Parse a leading integer, ignoring surrounding whitespace and any trailing
/// non-digit text: `" 12 guests"` → 12, `"abc"` → `None`.
fn parse_integer_prefix(s: &str) -> Option<i64> {
    let s = s.trim();
    let (sign, digits) = match s.as_bytes().first()? {
        b'-' => (-1, &s[1..]),
        b'+' => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}

fn normalize_contributions(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| non_empty(&item_text(item)))
            .collect(),
        Value::String(s) => s.split(',').filter_map(non_empty).collect(),
        _ => Vec::new(),
    }
}

fn item_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
