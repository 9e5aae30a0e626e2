//! Dotted-path access into nested attribute objects (`address.city`).

use serde_json::{Map, Value};

use super::Attributes;

pub(crate) fn get<'a>(attributes: &'a Attributes, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = attributes.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

pub(crate) fn set(attributes: &mut Attributes, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    set_in(attributes, &segments, value);
}

pub(crate) fn remove(attributes: &mut Attributes, path: &str) -> Option<Value> {
    let segments: Vec<&str> = path.split('.').collect();
    remove_in(attributes, &segments)
}

fn set_in(map: &mut Attributes, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let entry = map
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            // Scalars in the way are replaced by an object.
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(child) = entry {
                set_in(child, rest, value);
            }
        }
    }
}

fn remove_in(map: &mut Attributes, segments: &[&str]) -> Option<Value> {
    match segments {
        [] => None,
        [last] => map.shift_remove(*last),
        [head, rest @ ..] => map
            .get_mut(*head)?
            .as_object_mut()
            .and_then(|child| remove_in(child, rest)),
    }
}
