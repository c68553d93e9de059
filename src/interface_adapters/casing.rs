// Backend payloads use snake_case keys; schema structs read camelCase.

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::sync::LazyLock;

static SNAKE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([a-z])").expect("static snake case pattern"));

pub fn snake_to_camel(key: &str) -> String {
    SNAKE_SEGMENT
        .replace_all(key, |caps: &Captures<'_>| caps[1].to_uppercase())
        .into_owned()
}

/// Renames object keys recursively. Values, array order and `null` are kept
/// as-is, and already camelCased keys pass through unchanged.
pub fn to_camel_case(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (snake_to_camel(&key), to_camel_case(inner)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(to_camel_case).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn when_nested_arrays_have_snake_keys_then_order_is_kept() {
        let input = json!({"user_list": [{"user_id": "1"}, {"user_id": "2"}]});

        let output = to_camel_case(input);

        assert_eq!(output, json!({"userList": [{"userId": "1"}, {"userId": "2"}]}));
    }

    #[test]
    fn when_applied_twice_then_result_is_unchanged() {
        let input = json!({
            "group_breakdown": [{"group_id": "a", "percent_of_total": 12.5}],
            "alreadyCamel": {"inner_key": null},
            "plain": [1, "two_three", false]
        });

        let once = to_camel_case(input);
        let twice = to_camel_case(once.clone());

        assert_eq!(once, twice);
        assert_eq!(once["alreadyCamel"]["innerKey"], Value::Null);
        assert_eq!(once["plain"][1], json!("two_three"));
    }

    #[test]
    fn when_value_is_primitive_then_it_is_returned_untouched() {
        assert_eq!(to_camel_case(Value::Null), Value::Null);
        assert_eq!(to_camel_case(json!("snake_value")), json!("snake_value"));
        assert_eq!(to_camel_case(json!(42)), json!(42));
    }

    #[test]
    fn when_key_has_digits_or_uppercase_after_underscore_then_only_lowercase_is_folded() {
        assert_eq!(snake_to_camel("week_2_total"), "week_2Total");
        assert_eq!(snake_to_camel("already_Camel"), "already_Camel");
    }
}
