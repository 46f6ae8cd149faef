//! In-memory lookup maps built once from a catalog document.
//!
//! [`CatalogIndex`] holds four maps:
//!
//! - canonical criteria key → product id
//! - product id → stored criteria
//! - product id → product record (so enrichment never scans)
//! - addon id → addon definition
//!
//! plus the first-load order of product ids, which fixes the order of the
//! listing and search results. Duplicates are resolved by the configured
//! [`CollisionPolicy`]; the default is last write wins.

use std::collections::HashMap;

use log::{debug, warn};

use crate::app_response::AppResponse;
use crate::catalog_model::{Addon, CatalogAttributes, MatchCriteria, Product, ProductEntry};
use crate::catalog_options::{CatalogOptions, CollisionPolicy};
use crate::key_codec::canonical_key;

#[derive(Debug, Default, Clone)]
pub struct CatalogIndex {
    id_by_key: HashMap<String, String>,
    criteria_by_id: HashMap<String, MatchCriteria>,
    products_by_id: HashMap<String, Product>,
    addons_by_id: HashMap<String, Addon>,
    product_order: Vec<String>,
}

impl CatalogIndex {
    /// Builds the index from the document payload, taking ownership of its
    /// addon and product records.
    ///
    /// Addons are registered before products. Under
    /// [`CollisionPolicy::Reject`] the first duplicate aborts the build with
    /// [`AppResponse::Collision`]; the other policies never fail.
    ///
    /// For a duplicated product id the criteria are last write wins, while
    /// [`product`](Self::product) keeps the first record listed.
    pub fn build(
        attributes: CatalogAttributes,
        options: CatalogOptions,
    ) -> Result<Self, AppResponse> {
        let policy = options.collision_policy;
        let mut index = CatalogIndex::default();

        for addon in attributes.addons {
            if index.addons_by_id.contains_key(&addon.id) {
                on_collision(policy, "addon id", &addon.id)?;
            }
            index.addons_by_id.insert(addon.id.clone(), addon);
        }

        for product in attributes.products {
            let key = canonical_key(&product.match_criteria);
            let duplicate_id = index.criteria_by_id.contains_key(&product.id);

            // one report per product record
            match (duplicate_id, index.id_by_key.get(&key)) {
                (false, None) => {}
                (true, None) => on_collision(policy, "product id", &product.id)?,
                (false, Some(previous)) => on_collision(
                    policy,
                    "criteria key",
                    &format!("{key} (was {previous}, now {})", product.id),
                )?,
                (true, Some(previous)) => on_collision(
                    policy,
                    "product id and criteria key",
                    &format!("{} with {key} (key was {previous})", product.id),
                )?,
            }

            if !duplicate_id {
                index.product_order.push(product.id.clone());
            }

            index.id_by_key.insert(key, product.id.clone());
            index
                .criteria_by_id
                .insert(product.id.clone(), product.match_criteria.clone());
            index
                .products_by_id
                .entry(product.id.clone())
                .or_insert(product);
        }

        debug!(
            "Catalog index built: {} addons, {} products, {} criteria keys",
            index.addons_by_id.len(),
            index.product_order.len(),
            index.id_by_key.len()
        );

        Ok(index)
    }

    /// Exact lookup: the criteria must canonicalize to a stored key.
    pub fn id_for_criteria(&self, criteria: &MatchCriteria) -> Option<&str> {
        self.id_by_key
            .get(&canonical_key(criteria))
            .map(String::as_str)
    }

    pub fn criteria_for_id(&self, product_id: &str) -> Option<&MatchCriteria> {
        self.criteria_by_id.get(product_id)
    }

    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products_by_id.get(product_id)
    }

    pub fn addon(&self, addon_id: &str) -> Option<&Addon> {
        self.addons_by_id.get(addon_id)
    }

    /// Every distinct product id with its stored criteria, in first-load order.
    pub fn all_products(&self) -> Vec<ProductEntry> {
        self.entries().collect()
    }

    /// Products whose criteria contain every pair of `partial`.
    ///
    /// Extra keys on the product side don't matter, and an empty `partial`
    /// matches everything. A product lacking one of the keys never matches.
    pub fn find_by_partial_criteria(&self, partial: &MatchCriteria) -> Vec<ProductEntry> {
        self.entries()
            .filter(|entry| matches_partial(&entry.criteria, partial))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.product_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.product_order.is_empty()
    }

    pub fn addon_count(&self) -> usize {
        self.addons_by_id.len()
    }

    fn entries(&self) -> impl Iterator<Item = ProductEntry> + '_ {
        self.product_order.iter().filter_map(|id| {
            self.criteria_by_id.get(id).map(|criteria| ProductEntry {
                id: id.clone(),
                criteria: criteria.clone(),
            })
        })
    }
}

pub(crate) fn matches_partial(criteria: &MatchCriteria, partial: &MatchCriteria) -> bool {
    partial
        .iter()
        .all(|(key, value)| criteria.get(key) == Some(value))
}

fn on_collision(policy: CollisionPolicy, what: &str, subject: &str) -> Result<(), AppResponse> {
    match policy {
        CollisionPolicy::Overwrite => Ok(()),
        CollisionPolicy::Warn => {
            warn!("Duplicate {what} in catalog: {subject}");
            Ok(())
        }
        CollisionPolicy::Reject => {
            Err(AppResponse::Collision(format!("Duplicate {what}: {subject}")))
        }
    }
}
