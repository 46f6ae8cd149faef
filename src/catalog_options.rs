//! Build-time options for a catalog.
//!
//! Options are plain serde structs so a host can hand them over as JSON next
//! to the catalog document. Every field is optional on the wire:
//!
//! ```rust
//! use addon_catalog::catalog_options::{CatalogOptions, CollisionPolicy};
//!
//! let options: CatalogOptions = serde_json::from_str(r#"{"collisionPolicy":"warn"}"#)?;
//! assert_eq!(options.collision_policy, CollisionPolicy::Warn);
//!
//! let defaults: CatalogOptions = serde_json::from_str("{}")?;
//! assert_eq!(defaults.collision_policy, CollisionPolicy::Overwrite);
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};

/// What to do when two addons share an id, or two products share an id or
/// a canonical criteria key.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Last write wins, silently.
    #[default]
    Overwrite,
    /// Last write wins, each collision is logged.
    Warn,
    /// The first collision aborts the build.
    Reject,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogOptions {
    pub collision_policy: CollisionPolicy,
}

impl CatalogOptions {
    pub fn with_collision_policy(collision_policy: CollisionPolicy) -> Self {
        Self { collision_policy }
    }
}
