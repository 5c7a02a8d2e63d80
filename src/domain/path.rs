//! Dotted-path addressing over JSON values.
//!
//! Paths are ASCII identifiers joined by `.` — no escaping, no array index
//! segments, no wildcards. Reads degrade to `None` instead of failing and
//! writes create intermediate objects as needed, so both operations are total
//! over arbitrary nesting depth.

use serde_json::{Map, Value};

/// Resolve `path` against `root`, walking one object level per segment.
///
/// Returns `None` for an empty path or as soon as an intermediate segment is
/// missing or not an object.
pub fn get_by_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Write `value` at `path`, creating intermediate objects for every segment
/// except the last. An empty path is a no-op. Intermediate values that are
/// not objects are replaced by empty objects.
pub fn set_by_path(root: &mut Value, path: &str, value: Value) {
    if path.is_empty() {
        return;
    }
    let (parents, last) = match path.rsplit_once('.') {
        Some((parents, last)) => (parents, last),
        None => ("", path),
    };

    let mut current = root;
    if !parents.is_empty() {
        for segment in parents.split('.') {
            current = ensure_object(current)
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
    }
    ensure_object(current).insert(last.to_string(), value);
}

/// Coerce `value` into an object container, replacing anything else.
fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just made an object"),
    }
}

/// Rebuild the nested envelope implied by a response root path: each segment
/// becomes a single-key object wrapping the next, innermost first.
///
/// This is the inverse of [`get_by_path`]: for any non-empty `path`,
/// `get_by_path(&wrap_by_root_path(v, path), path)` yields `v` again. An
/// empty path returns the value unchanged.
pub fn wrap_by_root_path(value: Value, path: &str) -> Value {
    if path.is_empty() {
        return value;
    }
    path.rsplit('.').fold(value, |inner, segment| {
        let mut envelope = Map::new();
        envelope.insert(segment.to_string(), inner);
        Value::Object(envelope)
    })
}
