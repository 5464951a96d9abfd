//! famgraph
//!
//! Family tree layout for a social genealogy application. The algorithm
//! lives in the `famgraph-layout` crate; this crate is the adapter layer
//! around it:
//!
//! - `snapshot`: JSON family snapshots as handed over by the data layer
//! - `config`: layout settings, defaults plus an optional YAML file
//! - `error`: errors from reading either of the above
//!
//! ## Example Usage
//!
//! ```rust
//! use famgraph::{FamilySnapshot, LayoutConfig};
//! use famgraph::layout::{Person, RelationshipEdge};
//!
//! let snapshot = FamilySnapshot::new(
//!     vec![Person::new("p1"), Person::new("p2"), Person::new("p3")],
//!     vec![
//!         RelationshipEdge::parent("p1", "p2"),
//!         RelationshipEdge::parent("p1", "p3"),
//!     ],
//! );
//!
//! let tree = snapshot.layout(&LayoutConfig::default());
//! assert_eq!(tree.nodes.len(), 3);
//! assert_eq!(tree.node(&"p2".into()).unwrap().generation, 1);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod snapshot;

/// The layout algorithm crate
pub use famgraph_layout as layout;

pub use config::{LayoutConfig, SpacingConfig};
pub use error::{FamgraphError, FamgraphResult};
pub use snapshot::FamilySnapshot;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
