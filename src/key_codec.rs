//! Canonical string keys for unordered criteria mappings.
//!
//! A criteria mapping is rendered as `key:value` pairs sorted by key and
//! joined with `|`, so `{cpu: 4-cpu, vendor: fortigate}` becomes
//! `cpu:4-cpu|vendor:fortigate` regardless of insertion order.
//!
//! Values are not escaped. A value containing `:` or `|` can collide with a
//! different mapping; catalogs are expected to use simple tokens.

/// Separates a criterion id from its value.
pub const PAIR_SEPARATOR: &str = ":";

/// Separates consecutive pairs.
pub const ENTRY_SEPARATOR: &str = "|";

/// Builds the canonical key for any criteria mapping.
///
/// Accepts anything that iterates `(&key, &value)` pairs, so both the
/// ordered [`MatchCriteria`](crate::catalog_model::MatchCriteria) and a plain
/// `HashMap<String, String>` work. An empty mapping yields an empty string.
///
/// ```rust
/// use std::collections::HashMap;
/// use addon_catalog::key_codec::canonical_key;
///
/// let mut criteria = HashMap::new();
/// criteria.insert("vendor".to_string(), "fortigate".to_string());
/// criteria.insert("cpu".to_string(), "4-cpu".to_string());
///
/// assert_eq!(canonical_key(&criteria), "cpu:4-cpu|vendor:fortigate");
/// ```
pub fn canonical_key<'a, I>(criteria: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut pairs: Vec<(&String, &String)> = criteria.into_iter().collect();
    pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));

    pairs
        .iter()
        .map(|(name, value)| format!("{name}{PAIR_SEPARATOR}{value}"))
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn empty_criteria_is_empty_key() {
        let criteria: HashMap<String, String> = HashMap::new();
        assert_eq!(canonical_key(&criteria), "");
    }

    #[test]
    fn single_pair_has_no_entry_separator() {
        let mut criteria = BTreeMap::new();
        criteria.insert("vendor".to_string(), "fortigate".to_string());
        assert_eq!(canonical_key(&criteria), "vendor:fortigate");
    }

    #[test]
    fn sorts_by_code_point_not_locale() {
        let mut criteria = HashMap::new();
        criteria.insert("b".to_string(), "2".to_string());
        criteria.insert("B".to_string(), "1".to_string());
        criteria.insert("a".to_string(), "3".to_string());
        // uppercase sorts before lowercase by code point
        assert_eq!(canonical_key(&criteria), "B:1|a:3|b:2");
    }
}
