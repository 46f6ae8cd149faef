//! Resolution of a criteria mapping against an addon's option tree.
//!
//! Resolution follows a single path from the root: at each node the value
//! stored under the node's id is matched against that node's options, and
//! the walk continues into the matched option's children. It stops at the
//! first node whose criterion is missing or empty, whose value matches no
//! option, or whose matched option has no children. Siblings are never
//! explored.

use crate::catalog_model::{MatchCriteria, SelectedOptions, TreeNode, TreeOption};

/// Collects the option chosen at every tree level reached by `criteria`.
pub fn resolve(tree: &TreeNode, criteria: &MatchCriteria) -> SelectedOptions {
    let mut selected = SelectedOptions::new();
    resolve_into(tree, criteria, &mut selected);
    selected
}

/// Returns the first node on the path that `criteria` does not settle, or
/// `None` when the path ends on an option without children.
pub fn pending_dimension<'t>(tree: &'t TreeNode, criteria: &MatchCriteria) -> Option<&'t TreeNode> {
    let mut node = tree;
    loop {
        match select_option(node, criteria) {
            Some(option) => match option.children.as_deref() {
                Some(children) => node = children,
                None => return None,
            },
            None => return Some(node),
        }
    }
}

fn resolve_into(node: &TreeNode, criteria: &MatchCriteria, selected: &mut SelectedOptions) {
    let Some(option) = select_option(node, criteria) else {
        return;
    };

    selected.insert(node.id.clone(), option.clone());

    if let Some(children) = option.children.as_deref() {
        resolve_into(children, criteria, selected);
    }
}

// First match in option order wins.
fn select_option<'t>(node: &'t TreeNode, criteria: &MatchCriteria) -> Option<&'t TreeOption> {
    let value = criteria.get(&node.id).filter(|value| !value.is_empty())?;
    node.options.iter().find(|option| &option.value == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vendor_tree() -> TreeNode {
        serde_json::from_value(json!({
            "id": "vendor",
            "label": "Vendor",
            "options": [
                {
                    "value": "fortigate",
                    "label": "Fortigate",
                    "children": {
                        "id": "cpu",
                        "options": [
                            { "value": "4-cpu", "label": "4 CPU" },
                            { "value": "8-cpu", "label": "8 CPU" }
                        ]
                    }
                },
                { "value": "pfsense", "label": "pfSense" }
            ]
        }))
        .unwrap()
    }

    fn criteria(pairs: &[(&str, &str)]) -> MatchCriteria {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_value_stops_the_walk() {
        let selected = resolve(&vendor_tree(), &criteria(&[("vendor", ""), ("cpu", "4-cpu")]));
        assert!(selected.is_empty());
    }

    #[test]
    fn absent_root_key_stops_before_deeper_levels() {
        let selected = resolve(&vendor_tree(), &criteria(&[("cpu", "4-cpu")]));
        assert!(selected.is_empty());
    }

    #[test]
    fn repeated_option_value_picks_first_in_order() {
        let tree: TreeNode = serde_json::from_value(json!({
            "id": "license",
            "options": [
                { "value": "subscription", "label": "first" },
                { "value": "subscription", "label": "second" }
            ]
        }))
        .unwrap();

        let selected = resolve(&tree, &criteria(&[("license", "subscription")]));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected["license"].label, "first");
    }

    #[test]
    fn pending_dimension_points_at_first_unsettled_node() {
        let tree = vendor_tree();

        let pending = pending_dimension(&tree, &criteria(&[])).unwrap();
        assert_eq!(pending.id, "vendor");

        let pending = pending_dimension(&tree, &criteria(&[("vendor", "fortigate")])).unwrap();
        assert_eq!(pending.id, "cpu");

        let unknown_cpu = criteria(&[("vendor", "fortigate"), ("cpu", "16-cpu")]);
        let pending = pending_dimension(&tree, &unknown_cpu).unwrap();
        assert_eq!(pending.id, "cpu");

        let complete = criteria(&[("vendor", "fortigate"), ("cpu", "8-cpu")]);
        assert!(pending_dimension(&tree, &complete).is_none());
        assert!(pending_dimension(&tree, &criteria(&[("vendor", "pfsense")])).is_none());
    }
}
