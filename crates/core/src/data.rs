//! Per-stack payloads.

/// Arbitrary structured payload attached to a stack (durability, enchantments, ...).
///
/// Compared by deep structural equality (`serde_json::Value: PartialEq`).
pub type ItemData = serde_json::Value;

/// Structural equality of optional payloads.
///
/// Two absent payloads are equal; an absent payload never equals a present one,
/// including an explicit `null`.
pub fn data_eq(a: Option<&ItemData>, b: Option<&ItemData>) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_objects_compare_by_value() {
        let a = json!({ "durability": 5, "enchant": { "kind": "fire", "level": 2 } });
        let b = json!({ "enchant": { "level": 2, "kind": "fire" }, "durability": 5 });
        assert!(data_eq(Some(&a), Some(&b)));
    }

    #[test]
    fn absent_matches_only_absent() {
        assert!(data_eq(None, None));
        assert!(!data_eq(None, Some(&ItemData::Null)));
        assert!(!data_eq(Some(&json!(1)), None));
    }
}
