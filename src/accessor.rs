//! Accessor-expression resolution over vendor response JSON.
//!
//! Provider profiles carry a `response_path` like
//! `choices[0].message.content` or `candidates[0].content.parts[0].text`
//! that locates the reply text inside an arbitrary vendor body. Missing data
//! is "empty", not exceptional: any dead end in the walk yields `""` so a
//! misconfigured path degrades to an empty reply instead of a hard error.

use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
enum PathSeg {
    Key(String),
    Index(usize),
}

/// Parse a dotted/array path like `a.b[0].c[2]` into segments
fn parse_path(path: &str) -> Vec<PathSeg> {
    let mut segs = Vec::new();
    for part in path.split('.') {
        if part.is_empty() {
            continue;
        }
        // Key up to the first '['
        let mut key = String::new();
        let mut chars = part.chars().peekable();
        while let Some(&ch) = chars.peek() {
            if ch == '[' {
                break;
            }
            key.push(ch);
            chars.next();
        }
        if !key.is_empty() {
            segs.push(PathSeg::Key(key));
        }
        // Zero or more [number]
        while let Some(&ch) = chars.peek() {
            if ch != '[' {
                break;
            }
            chars.next(); // '['
            let mut num = String::new();
            while let Some(&d) = chars.peek() {
                if d == ']' {
                    break;
                }
                num.push(d);
                chars.next();
            }
            let _ = chars.next(); // ']'
            // Non-numeric bracket content is a key lookup, not an index.
            match num.parse::<usize>() {
                Ok(idx) => segs.push(PathSeg::Index(idx)),
                Err(_) if !num.is_empty() => segs.push(PathSeg::Key(num)),
                Err(_) => {}
            }
        }
    }
    segs
}

/// Resolve an accessor expression against a JSON value.
///
/// Empty expression returns the whole value: verbatim if it is a string,
/// otherwise its compact JSON serialization. The same terminal rule applies
/// at the end of a non-empty walk.
pub fn resolve_path(value: &Value, expression: &str) -> String {
    if expression.is_empty() {
        return stringify(value);
    }

    let mut cur = value;
    for seg in parse_path(expression) {
        if cur.is_null() {
            return String::new();
        }
        match (seg, cur) {
            (PathSeg::Key(k), Value::Object(map)) => match map.get(&k) {
                Some(next) => cur = next,
                None => return String::new(),
            },
            (PathSeg::Index(i), Value::Array(arr)) => match arr.get(i) {
                Some(next) => cur = next,
                None => return String::new(),
            },
            _ => return String::new(),
        }
    }

    stringify(cur)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
