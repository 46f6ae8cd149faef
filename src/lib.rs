//! # Addon Catalog
//!
//! A small bidirectional lookup library that maps product-selection criteria
//! (vendor, CPU tier, license type, ...) to a product identifier and back,
//! with an optional enrichment step that resolves an addon's option tree for
//! display. Designed to be linked into a host application through FFI, and
//! usable directly from Rust.
//!
//! ## Features
//!
//! - **Order-independent keys**: criteria are canonicalized, so
//!   `{cpu, vendor}` and `{vendor, cpu}` find the same product
//! - **O(1) lookups** in both directions after a single load pass
//! - **Tree enrichment**: the option chosen at each level of the addon tree,
//!   with labels carried through untouched
//! - **Configurable collisions**: overwrite, warn, or reject duplicates
//! - **Safe error handling**: no `unwrap()` calls in production code
//!
//! ## Quick Start
//!
//! ```rust
//! use addon_catalog::catalog_model::MatchCriteria;
//! use addon_catalog::catalog_options::CatalogOptions;
//! use addon_catalog::catalog_state::CatalogState;
//!
//! let json = r#"{"attributes":{
//!     "addons":[{"id":"firewall","tree":{"id":"vendor","options":[
//!         {"value":"fortigate","label":"Fortigate","children":
//!             {"id":"cpu","options":[{"value":"4-cpu","label":"4 CPU"}]}}]}}],
//!     "products":[{"id":"8800190627841","addonType":"firewall",
//!         "matchCriteria":{"vendor":"fortigate","cpu":"4-cpu"}}]}}"#;
//!
//! let catalog = CatalogState::from_json(json, CatalogOptions::default())?;
//!
//! let mut criteria = MatchCriteria::new();
//! criteria.insert("cpu".to_string(), "4-cpu".to_string());
//! criteria.insert("vendor".to_string(), "fortigate".to_string());
//! assert_eq!(catalog.get_product_id_by_criteria(&criteria), Some("8800190627841"));
//!
//! let enriched = catalog.get_enriched_criteria("8800190627841").unwrap();
//! assert_eq!(enriched.selected_options["cpu"].label, "4 CPU");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## FFI Functions
//!
//! Every function returning `*const c_char` returns a JSON-serialized
//! [`AppResponse`](app_response::AppResponse) that must be released with
//! [`free_response`]:
//!
//! - [`create_catalog`] / [`create_catalog_with_options`] - Build a catalog instance
//! - [`reload_catalog`] - Replace the catalog document
//! - [`get_product_id_by_criteria`] - Criteria to product id
//! - [`get_criteria_by_product_id`] - Product id to stored criteria
//! - [`get_enriched_criteria`] - Product id to criteria with resolved options
//! - [`search_by_partial_criteria`] / [`search_enriched_by_partial_criteria`] - Partial match
//! - [`get_all_products`] - Every product with its criteria
//! - [`close_catalog`] - Release the instance

pub mod app_response;
pub mod catalog_index;
pub mod catalog_model;
pub mod catalog_options;
pub mod catalog_state;
pub mod key_codec;
pub mod tree_resolver;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};
use serde::Serialize;

use crate::app_response::AppResponse;
use crate::catalog_model::{CatalogDocument, MatchCriteria};
use crate::catalog_options::CatalogOptions;
use crate::catalog_state::CatalogState;

/// Builds a catalog instance from a JSON catalog document, using default
/// options (last write wins on duplicates).
///
/// # Parameters
///
/// * `json_ptr` - A null-terminated C string containing the catalog document
///
/// # Returns
///
/// Returns a pointer to the [`CatalogState`] instance on success, or a null
/// pointer on failure. Release it with [`close_catalog`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use addon_catalog::{create_catalog, close_catalog, free_response};
///
/// let json = CString::new(r#"{"attributes":{"addons":[],"products":[]}}"#).unwrap();
/// let catalog = create_catalog(json.as_ptr());
///
/// if !catalog.is_null() {
///     free_response(close_catalog(catalog));
/// }
/// ```
///
/// # Errors
///
/// Returns null pointer if:
/// - Input pointer is null or not valid UTF-8
/// - The document is not JSON or lacks `attributes`
/// - A required product or addon field is missing
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_catalog(json_ptr: *const c_char) -> *mut CatalogState {
    build_catalog(json_ptr, CatalogOptions::default())
}

/// Builds a catalog instance with explicit options.
///
/// `options_ptr` holds a JSON [`CatalogOptions`] object such as
/// `{"collisionPolicy":"reject"}`. A null `options_ptr` means defaults.
/// Returns null on failure, exactly like [`create_catalog`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_catalog_with_options(
    json_ptr: *const c_char,
    options_ptr: *const c_char,
) -> *mut CatalogState {
    if options_ptr.is_null() {
        return build_catalog(json_ptr, CatalogOptions::default());
    }

    let options_str = match unsafe { CStr::from_ptr(options_ptr).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in options parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    match serde_json::from_str::<CatalogOptions>(options_str) {
        Ok(options) => build_catalog(json_ptr, options),
        Err(e) => {
            warn!("❌ Invalid catalog options: {e}");
            std::ptr::null_mut()
        }
    }
}

fn build_catalog(json_ptr: *const c_char, options: CatalogOptions) -> *mut CatalogState {
    if json_ptr.is_null() {
        warn!("Null document pointer passed to create_catalog");
        return std::ptr::null_mut();
    }

    let json_str = match unsafe { CStr::from_ptr(json_ptr).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in catalog document: {e}");
            return std::ptr::null_mut();
        }
    };

    match CatalogState::from_json(json_str, options) {
        Ok(state) => {
            info!("✅ Catalog initialized successfully");
            Box::into_raw(Box::new(state))
        }
        Err(e) => {
            warn!("❌ Failed to initialize catalog: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// Replaces the catalog document of an existing instance.
///
/// The new document is fully indexed before the old one is dropped; on
/// failure the instance keeps answering from the previous document.
///
/// # Returns
///
/// `Ok` with the new product count, `MalformedInput` /
/// `SerializationError` / `Collision` on a bad document, `BadRequest` on
/// null or non-UTF-8 input.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn reload_catalog(
    state: *mut CatalogState,
    json_ptr: *const c_char,
) -> *const c_char {
    let state = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => {
            let error =
                AppResponse::BadRequest("Null state pointer passed to reload_catalog".to_string());
            return response_to_c_string(&error);
        }
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(error_ptr) => return error_ptr,
    };

    let document: CatalogDocument = match serde_json::from_str(&json_str) {
        Ok(d) => d,
        Err(e) => return response_to_c_string(&AppResponse::from(e)),
    };

    match state.reload(document) {
        Ok(()) => {
            let success =
                AppResponse::success(format!("Catalog reloaded with {} products", state.len()));
            response_to_c_string(&success)
        }
        Err(e) => response_to_c_string(&e),
    }
}

/// Looks up the product id for an exact set of criteria.
///
/// # Parameters
///
/// * `state` - Pointer to the catalog instance
/// * `criteria_ptr` - JSON object of criterion id to value, in any key order
///
/// # Returns
///
/// `Ok` carrying the JSON-encoded product id (e.g. `"\"8800190627841\""`),
/// or `NotFound` when no product has exactly these criteria.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use addon_catalog::{create_catalog, get_product_id_by_criteria, free_response};
///
/// let json = CString::new(r#"{"attributes":{"products":[
///     {"id":"p1","addonType":"firewall","matchCriteria":{"vendor":"fortigate"}}]}}"#).unwrap();
/// let catalog = create_catalog(json.as_ptr());
///
/// let criteria = CString::new(r#"{"vendor":"fortigate"}"#).unwrap();
/// let result = get_product_id_by_criteria(catalog, criteria.as_ptr());
/// free_response(result);
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_product_id_by_criteria(
    state: *mut CatalogState,
    criteria_ptr: *const c_char,
) -> *const c_char {
    let state = match state_ref(state, "get_product_id_by_criteria") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let criteria = match criteria_from_c(criteria_ptr) {
        Ok(c) => c,
        Err(error_ptr) => return error_ptr,
    };

    match state.get_product_id_by_criteria(&criteria) {
        Some(product_id) => ok_json(&product_id),
        None => {
            let error = AppResponse::NotFound("No product matches the given criteria".to_string());
            response_to_c_string(&error)
        }
    }
}

/// Returns the stored criteria for a product id, without enrichment.
///
/// `Ok` carries a JSON object of criterion id to value; unknown ids yield
/// `NotFound`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_criteria_by_product_id(
    state: *mut CatalogState,
    id: *const c_char,
) -> *const c_char {
    let state = match state_ref(state, "get_criteria_by_product_id") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let id_str = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(error_ptr) => return error_ptr,
    };

    match state.get_criteria(&id_str) {
        Some(criteria) => ok_json(criteria),
        None => {
            let error = AppResponse::NotFound(format!("No product found with id: {id_str}"));
            response_to_c_string(&error)
        }
    }
}

/// Returns the enriched view of a product: criteria, the option selected at
/// each tree level, and the owning addon.
///
/// # JSON Format
///
/// The `Ok` payload has this shape:
/// ```json
/// {
///   "productId": "8800190627841",
///   "addonType": "firewall",
///   "matchCriteria": { "cpu": "4-cpu", "vendor": "fortigate" },
///   "selectedOptions": {
///     "vendor": {
///       "value": "fortigate", "label": "Fortigate", "labelAr": "",
///       "children": { ... }
///     },
///     "cpu": { "value": "4-cpu", "label": "4 CPU", "labelAr": "" }
///   },
///   "addon": { "id": "firewall", ... }
/// }
/// ```
///
/// `NotFound` when the product id is unknown or its addon is missing.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_enriched_criteria(
    state: *mut CatalogState,
    id: *const c_char,
) -> *const c_char {
    let state = match state_ref(state, "get_enriched_criteria") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let id_str = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(error_ptr) => return error_ptr,
    };

    match state.get_enriched_criteria(&id_str) {
        Some(enriched) => ok_json(&enriched),
        None => {
            let error =
                AppResponse::NotFound(format!("No enrichable product found with id: {id_str}"));
            response_to_c_string(&error)
        }
    }
}

/// Lists products whose criteria contain every pair of the partial criteria.
///
/// `Ok` carries a JSON array of `{"id": ..., "criteria": {...}}`; an empty
/// array is a normal result, not an error.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn search_by_partial_criteria(
    state: *mut CatalogState,
    partial_ptr: *const c_char,
) -> *const c_char {
    let state = match state_ref(state, "search_by_partial_criteria") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let partial = match criteria_from_c(partial_ptr) {
        Ok(c) => c,
        Err(error_ptr) => return error_ptr,
    };

    ok_json(&state.search_by_partial_criteria(&partial))
}

/// Enriched variant of [`search_by_partial_criteria`].
///
/// Each array element has the [`get_enriched_criteria`] shape. Products whose
/// addon is missing are left out.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn search_enriched_by_partial_criteria(
    state: *mut CatalogState,
    partial_ptr: *const c_char,
) -> *const c_char {
    let state = match state_ref(state, "search_enriched_by_partial_criteria") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let partial = match criteria_from_c(partial_ptr) {
        Ok(c) => c,
        Err(error_ptr) => return error_ptr,
    };

    ok_json(&state.search_enriched_by_partial_criteria(&partial))
}

/// Lists every product with its stored criteria, unenriched.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_all_products(state: *mut CatalogState) -> *const c_char {
    let state = match state_ref(state, "get_all_products") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    ok_json(&state.get_all_products())
}

/// Takes back ownership of a catalog instance and drops it.
///
/// The pointer must come from [`create_catalog`] or
/// [`create_catalog_with_options`] and must not be used afterwards.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_catalog(state: *mut CatalogState) -> *const c_char {
    if state.is_null() {
        let error =
            AppResponse::BadRequest("Null state pointer passed to close_catalog".to_string());
        return response_to_c_string(&error);
    }

    drop(unsafe { Box::from_raw(state) });
    info!("Catalog instance released");

    response_to_c_string(&AppResponse::success("Catalog closed successfully"))
}

/// Releases a string returned by any function of this library.
///
/// Passing null is a no-op.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr as *mut c_char) });
}

fn state_ref<'a>(
    state: *mut CatalogState,
    caller: &str,
) -> Result<&'a CatalogState, *const c_char> {
    match unsafe { state.as_ref() } {
        Some(s) => Ok(s),
        None => {
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {caller}"));
            Err(response_to_c_string(&error))
        }
    }
}

fn criteria_from_c(ptr: *const c_char) -> Result<MatchCriteria, *const c_char> {
    let json_str = c_ptr_to_string(ptr, "criteria")?;

    serde_json::from_str(&json_str).map_err(|e| {
        let error = AppResponse::SerializationError(format!("Invalid criteria JSON: {e}"));
        response_to_c_string(&error)
    })
}

/// Wraps a serializable payload in [`AppResponse::Ok`] as a JSON string.
fn ok_json<T: Serialize + ?Sized>(payload: &T) -> *const c_char {
    match serde_json::to_string(payload) {
        Ok(json) => response_to_c_string(&AppResponse::Ok(json)),
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Error serializing result: {e}"));
            response_to_c_string(&error)
        }
    }
}

/// Converts an [`AppResponse`] to a C-compatible string.
///
/// Returns a null pointer if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a Rust String.
///
/// * `Ok(String)` - If conversion was successful
/// * `Err(*const c_char)` - A `BadRequest` response for null pointers or invalid UTF-8
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
