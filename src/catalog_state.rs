use log::{debug, info};

use crate::app_response::AppResponse;
use crate::catalog_index::CatalogIndex;
use crate::catalog_model::{
    Addon, CatalogDocument, EnrichedCriteria, MatchCriteria, Product, ProductEntry,
};
use crate::catalog_options::CatalogOptions;
use crate::tree_resolver;

/// Loaded catalog plus its lookup maps.
///
/// Immutable between [`reload`](CatalogState::reload) calls, so shared
/// references can be read from any number of threads.
#[derive(Debug, Clone)]
pub struct CatalogState {
    control_type: String,
    config_group_name: String,
    index: CatalogIndex,
    options: CatalogOptions,
}

impl CatalogState {
    pub fn init(
        document: CatalogDocument,
        options: CatalogOptions,
    ) -> Result<Self, AppResponse> {
        let attributes = document.attributes;
        let control_type = attributes.control_type.clone();
        let config_group_name = attributes.config_group_name.clone();
        let index = CatalogIndex::build(attributes, options)?;

        info!(
            "Catalog '{}' loaded: {} addons, {} products",
            config_group_name,
            index.addon_count(),
            index.len()
        );

        Ok(Self {
            control_type,
            config_group_name,
            index,
            options,
        })
    }

    /// Parses a JSON catalog document and builds the catalog from it.
    ///
    /// A document missing `attributes` (or with a required field of the
    /// wrong shape) fails with [`AppResponse::MalformedInput`]; text that is
    /// not JSON fails with [`AppResponse::SerializationError`].
    pub fn from_json(json: &str, options: CatalogOptions) -> Result<Self, AppResponse> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::init(document, options)
    }

    /// Replaces the whole catalog.
    ///
    /// The new index is built before anything is swapped, so a failed reload
    /// leaves the current catalog untouched.
    pub fn reload(&mut self, document: CatalogDocument) -> Result<(), AppResponse> {
        let fresh = Self::init(document, self.options)?;
        *self = fresh;
        Ok(())
    }

    pub fn get_product_id_by_criteria(&self, criteria: &MatchCriteria) -> Option<&str> {
        let found = self.index.id_for_criteria(criteria);
        if found.is_none() {
            debug!("No product for criteria {:?}", criteria);
        }
        found
    }

    /// Stored criteria for a product id, without enrichment.
    pub fn get_criteria(&self, product_id: &str) -> Option<&MatchCriteria> {
        self.index.criteria_for_id(product_id)
    }

    /// Stored criteria plus the option picked at each level of the addon tree.
    ///
    /// `None` if the product is unknown or its `addonType` names no addon.
    pub fn get_enriched_criteria(&self, product_id: &str) -> Option<EnrichedCriteria> {
        let criteria = self.index.criteria_for_id(product_id)?;
        let product = self.index.product(product_id)?;
        self.enrich(product, criteria)
    }

    pub fn search_by_partial_criteria(&self, partial: &MatchCriteria) -> Vec<ProductEntry> {
        self.index.find_by_partial_criteria(partial)
    }

    /// Same matching as [`search_by_partial_criteria`](Self::search_by_partial_criteria),
    /// enriched per result. Products whose addon is missing are left out.
    pub fn search_enriched_by_partial_criteria(
        &self,
        partial: &MatchCriteria,
    ) -> Vec<EnrichedCriteria> {
        self.index
            .find_by_partial_criteria(partial)
            .into_iter()
            .filter_map(|entry| {
                let enriched = self
                    .index
                    .product(&entry.id)
                    .and_then(|product| self.enrich(product, &entry.criteria));
                if enriched.is_none() {
                    debug!("Skipping product {} in enriched search: addon not found", entry.id);
                }
                enriched
            })
            .collect()
    }

    pub fn get_all_products(&self) -> Vec<ProductEntry> {
        self.index.all_products()
    }

    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.index.product(product_id)
    }

    pub fn addon(&self, addon_id: &str) -> Option<&Addon> {
        self.index.addon(addon_id)
    }

    pub fn control_type(&self) -> &str {
        &self.control_type
    }

    pub fn config_group_name(&self) -> &str {
        &self.config_group_name
    }

    pub fn options(&self) -> CatalogOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn enrich(&self, product: &Product, criteria: &MatchCriteria) -> Option<EnrichedCriteria> {
        let addon = self.index.addon(&product.addon_type)?;
        let selected_options = tree_resolver::resolve(&addon.tree, criteria);

        Some(EnrichedCriteria {
            product_id: product.id.clone(),
            addon_type: product.addon_type.clone(),
            match_criteria: criteria.clone(),
            selected_options,
            addon: addon.clone(),
        })
    }
}
