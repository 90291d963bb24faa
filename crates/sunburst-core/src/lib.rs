#![forbid(unsafe_code)]

//! Semantic model for sunburst charts (headless).
//!
//! - [`tree`]: the weighted hierarchy (`TreeNode` input shape, `Hierarchy` arena)
//! - [`records`]: flat product records to tree, via a feature mapping table
//! - [`config`]: JSON-backed chart configuration with dotted-path access
//! - [`color`] / [`theme`]: d3-style RGB math and the named category palettes

pub mod color;
pub mod config;
pub mod error;
pub mod records;
pub mod sanitize;
pub mod theme;
pub mod tree;

pub use color::Rgb;
pub use config::SunburstConfig;
pub use error::{Error, Result};
pub use records::{FeatureMapping, ProductRecord, build_tree};
pub use theme::Theme;
pub use tree::{HierNode, Hierarchy, NodeId, TreeNode};

/// Reads the builder's root label from `sunburst.rootName`.
pub fn root_name(config: &SunburstConfig) -> &str {
    config
        .get_str("sunburst.rootName")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(records::DEFAULT_ROOT_NAME)
}
