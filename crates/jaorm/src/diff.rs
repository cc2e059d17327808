//! Structural diff between two attribute bags.

use crate::value::{Fields, Value};

/// Compute the changed attributes of `after` relative to `before`.
///
/// Walks `after` in order and keeps every attribute whose value differs from
/// the one in `before` (an attribute missing from `before` counts as changed).
/// When both sides are objects, the nested diff is stored instead of the
/// whole new value. Attributes that only exist in `before` are never reported.
///
/// ```
/// use jaorm::{diff, fields};
///
/// let before = fields! { "name" => "a", "age" => 1 };
/// let after = fields! { "name" => "b", "age" => 1 };
/// assert_eq!(diff(&after, &before), fields! { "name" => "b" });
/// ```
pub fn diff(after: &Fields, before: &Fields) -> Fields {
    let mut result = Fields::new();
    for (name, value) in after.iter() {
        let old = before.get(name);
        if old == Some(value) {
            continue;
        }
        let changed = match (value, old) {
            (Value::Object(new), Some(Value::Object(old))) => Value::Object(diff(new, old)),
            _ => value.clone(),
        };
        result.insert(name, changed);
    }
    result
}

/// True when `after` carries no change relative to `before`.
pub fn is_unchanged(after: &Fields, before: &Fields) -> bool {
    after
        .iter()
        .all(|(name, value)| before.get(name) == Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    #[test]
    fn identical_bags_have_empty_diff() {
        let bag = fields! { "a" => 1, "b" => fields! { "c" => "x" } };
        assert!(diff(&bag, &bag.clone()).is_empty());
        assert!(is_unchanged(&bag, &bag));
    }

    #[test]
    fn single_scalar_change() {
        let before = fields! { "key" => "value", "other" => 1 };
        let after = fields! { "key" => "edited", "other" => 1 };

        let changes = diff(&after, &before);
        assert_eq!(changes, fields! { "key" => "edited" });
        assert!(!is_unchanged(&after, &before));
    }

    #[test]
    fn new_key_is_reported() {
        let before = fields! { "a" => 1 };
        let after = fields! { "a" => 1, "b" => Value::Null };
        assert_eq!(diff(&after, &before), fields! { "b" => Value::Null });
    }

    #[test]
    fn removed_key_is_not_reported() {
        let before = fields! { "a" => 1, "b" => 2 };
        let after = fields! { "a" => 1 };
        assert!(diff(&after, &before).is_empty());
    }

    #[test]
    fn nested_objects_recurse() {
        let before = fields! {
            "name" => "n",
            "address" => fields! { "city" => "Seoul", "zip" => "04524" },
        };
        let after = fields! {
            "name" => "n",
            "address" => fields! { "city" => "Busan", "zip" => "04524" },
        };

        assert_eq!(
            diff(&after, &before),
            fields! { "address" => fields! { "city" => "Busan" } }
        );
    }

    #[test]
    fn object_replacing_scalar_is_stored_whole() {
        let before = fields! { "meta" => "none" };
        let after = fields! { "meta" => fields! { "a" => 1 } };
        assert_eq!(diff(&after, &before), after);
    }

    #[test]
    fn lists_are_compared_whole() {
        let before = fields! { "tags" => vec!["a", "b"] };
        let after = fields! { "tags" => vec!["a", "c"] };
        assert_eq!(diff(&after, &before), after);
    }

    #[test]
    fn result_follows_after_order() {
        let before = fields! { "a" => 1, "b" => 1, "c" => 1 };
        let after = fields! { "c" => 2, "a" => 2, "b" => 1 };
        let keys: Vec<_> = diff(&after, &before).keys().map(String::from).collect();
        assert_eq!(keys, vec!["c", "a"]);
    }
}
