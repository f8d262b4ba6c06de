use serde_json::{Map, Value};

/// Recursively merges `source` into `target`. Objects merge key by key;
/// `null` in `source` never overwrites anything.
pub(crate) fn merge_non_null_json_value(source: Value, target: &mut Value) {
    match (source, target) {
        (Value::Null, _) => {}
        (Value::Object(source), Value::Object(target)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => merge_non_null_json_value(value, existing),
                    None if !value.is_null() => {
                        target.insert(key, value);
                    }
                    None => {}
                }
            }
        }
        (source, target) => *target = source,
    }
}

/// The parts of `update` that differ from `current`, as a sparse object.
pub(crate) fn json_difference(current: Value, update: &Value) -> Value {
    match (current, update) {
        (Value::Object(mut current), Value::Object(update)) => {
            let mut diff = Map::new();
            for (key, update_value) in update {
                match current.remove(key) {
                    Some(current_value) if current_value == *update_value => {}
                    Some(current_value @ Value::Object(_)) if update_value.is_object() => {
                        diff.insert(key.clone(), json_difference(current_value, update_value));
                    }
                    _ => {
                        diff.insert(key.clone(), update_value.clone());
                    }
                }
            }
            Value::Object(diff)
        }
        (_, update) => update.clone(),
    }
}
