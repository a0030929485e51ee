//! Structured-output recovery from free-form model text.
//!
//! Models asked to "return only the JSON" still wrap it in prose or markdown
//! fences often enough that extraction is an ordered list of fallible
//! strategies, tried until one succeeds. The final brace scan is a known
//! low-confidence heuristic (stray braces in surrounding prose can widen the
//! match); create-mode validation downstream is the real safety net, so the
//! tier order here must stay as-is.

use serde_json::Value;

/// Recover a JSON object from model text. `None` when every strategy fails.
pub fn extract_json(text: &str) -> Option<Value> {
    parse_whole(text)
        .or_else(|| parse_fenced_block(text))
        .or_else(|| parse_brace_span(text))
}

/// Strategy 1: the whole reply is already JSON.
fn parse_whole(text: &str) -> Option<Value> {
    serde_json::from_str(text.trim()).ok()
}

/// Strategy 2: a fenced code block, optionally tagged `json`.
fn parse_fenced_block(text: &str) -> Option<Value> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    // Skip the info string ("json", "JSON", ...) up to the first newline
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    serde_json::from_str(body[..close].trim()).ok()
}

/// Strategy 3: first `{` through last `}`, inclusive.
fn parse_brace_span(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Best-effort token count from a vendor response `usage` block.
///
/// OpenAI-shaped bodies carry `total_tokens`; Anthropic reports
/// `input_tokens`/`output_tokens` separately. Anything else yields `None`.
pub fn extract_tokens(response: &Value) -> Option<u64> {
    let usage = response.get("usage")?.as_object()?;
    if let Some(total) = usage.get("total_tokens").and_then(Value::as_u64) {
        if total > 0 {
            return Some(total);
        }
    }
    let input = usage.get("input_tokens").and_then(Value::as_u64).unwrap_or(0);
    let output = usage
        .get("output_tokens")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    if input + output > 0 {
        Some(input + output)
    } else {
        None
    }
}
