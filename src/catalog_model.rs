//! Data model definitions for the addon catalog.
//!
//! This module defines the structures deserialized from the catalog document
//! supplied by the host application, plus the derived shapes returned by the
//! lookup operations. The document is read once; nothing here is mutated
//! after the catalog is built.
//!
//! All types use camelCase field names on the wire, matching the document
//! produced by the host:
//!
//! ```json
//! {
//!   "attributes": {
//!     "controlType": "addonConfigurator",
//!     "configGroupName": "security",
//!     "addons": [ { "id": "firewall", "tree": { "id": "vendor", "options": [] } } ],
//!     "products": [
//!       { "id": "8800190627841", "addonType": "firewall",
//!         "matchCriteria": { "vendor": "fortigate", "cpu": "4-cpu" } }
//!     ]
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Criterion dimension id (e.g. `"vendor"`) to selected option value
/// (e.g. `"fortigate"`).
///
/// Kept ordered so serialized output is stable; lookups never depend on the
/// order, see [`canonical_key`](crate::key_codec::canonical_key).
pub type MatchCriteria = BTreeMap<String, String>;

/// Criterion dimension id to the option chosen for it along the resolved path.
pub type SelectedOptions = BTreeMap<String, TreeOption>;

/// Top-level catalog document.
///
/// The `attributes` member is mandatory; a document without it is rejected
/// as malformed when the catalog is built.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogDocument {
    pub attributes: CatalogAttributes,
}

/// Payload of a [`CatalogDocument`].
///
/// Missing `addons` or `products` sequences are read as empty.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogAttributes {
    #[serde(default)]
    pub control_type: String,

    #[serde(default)]
    pub config_group_name: String,

    #[serde(default)]
    pub addons: Vec<Addon>,

    #[serde(default)]
    pub products: Vec<Product>,
}

/// A single orderable product, identified by `id` and selected through its
/// `match_criteria`.
///
/// # Examples
///
/// ```rust
/// use addon_catalog::catalog_model::Product;
/// use serde_json::json;
///
/// let product: Product = serde_json::from_value(json!({
///     "id": "8800190627841",
///     "addonType": "firewall",
///     "matchCriteria": { "vendor": "fortigate", "cpu": "4-cpu" }
/// }))?;
///
/// assert_eq!(product.addon_type, "firewall");
/// assert_eq!(product.match_criteria["cpu"], "4-cpu");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier within the catalog.
    pub id: String,

    /// Id of the [`Addon`] family this product belongs to.
    ///
    /// Enrichment fails with "not found" when no addon carries this id.
    pub addon_type: String,

    /// The criteria that select this product.
    pub match_criteria: MatchCriteria,
}

/// A configurable product family with its decision tree of options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Arabic display name, carried through untouched.
    #[serde(default)]
    pub name_ar: String,

    #[serde(default)]
    pub max_instances: u32,

    #[serde(default)]
    pub item_choice_key: String,

    #[serde(default)]
    pub pricing_key: String,

    /// Root dimension of the option tree.
    pub tree: TreeNode,
}

/// One criterion dimension of an addon's option tree (e.g. `"cpu"`).
///
/// The node's `id` is the key looked up in a [`MatchCriteria`] while the tree
/// is resolved.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub label_ar: String,

    /// Host-defined control type for this dimension (e.g. `"select"`).
    #[serde(rename = "type", default)]
    pub node_type: String,

    #[serde(default)]
    pub required: bool,

    /// Selectable values, in display order.
    #[serde(default)]
    pub options: Vec<TreeOption>,
}

/// One selectable value of a [`TreeNode`].
///
/// Choosing an option may reveal a nested dimension through `children`,
/// e.g. selecting a vendor reveals its CPU tiers.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreeOption {
    pub value: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub label_ar: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Box<TreeNode>>,
}

/// Row returned by the listing and plain search operations.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ProductEntry {
    pub id: String,
    pub criteria: MatchCriteria,
}

/// Display-ready view of one product: its stored criteria, the option picked
/// at each tree level, and the owning addon.
///
/// Derived on demand; never stored in the catalog.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCriteria {
    pub product_id: String,
    pub addon_type: String,
    pub match_criteria: MatchCriteria,
    pub selected_options: SelectedOptions,
    pub addon: Addon,
}
