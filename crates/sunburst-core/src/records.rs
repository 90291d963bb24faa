//! Flat product records to [`TreeNode`].
//!
//! Each record carries a product name and a set of `0/1` feature columns. A static
//! [`FeatureMapping`] places every set column under `root / category / label`; the product is
//! appended there as a unit-weight leaf that lists all of its mapped labels.

use crate::sanitize::sanitize_link;
use crate::tree::{DEFAULT_LEAF_VALUE, TreeNode};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_ROOT_NAME: &str = "Sunscreen";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Every other column, in source order.
    #[serde(flatten)]
    pub flags: IndexMap<String, Value>,
}

impl ProductRecord {
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            link: None,
            flags: IndexMap::new(),
        }
    }

    pub fn with_flag(mut self, key: impl Into<String>, on: bool) -> Self {
        self.flags
            .insert(key.into(), Value::from(if on { 1 } else { 0 }));
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Feature columns whose flag is set, in column order.
    ///
    /// CSV loaders hand over strings, so `"1"` counts the same as `1`.
    pub fn set_flags(&self) -> impl Iterator<Item = &str> + '_ {
        self.flags
            .iter()
            .filter(|(_, v)| flag_is_set(v))
            .map(|(k, _)| k.as_str())
    }

    pub fn from_json_array(text: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(text)?)
    }
}

fn flag_is_set(v: &Value) -> bool {
    match v {
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s.trim().parse::<f64>().ok() == Some(1.0),
        Value::Bool(b) => *b,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePlacement {
    pub category: String,
    pub label: String,
}

/// Ordered feature-key to `(category, label)` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMapping(IndexMap<String, FeaturePlacement>);

impl FeatureMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        category: impl Into<String>,
        label: impl Into<String>,
    ) {
        self.0.insert(
            key.into(),
            FeaturePlacement {
                category: category.into(),
                label: label.into(),
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&FeaturePlacement> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The sunscreen catalogue columns.
    pub fn sunscreen() -> Self {
        let mut m = Self::new();
        for (key, category, label) in [
            ("moisturizing", "Skin Concern", "Moisturizing"),
            ("soothing", "Skin Concern", "Soothing"),
            ("visiblepores", "Skin Concern", "Visible Pores"),
            ("uva3", "UVA Rating", "3 Star"),
            ("uva4", "UVA Rating", "4 Star"),
            ("spf30", "SPF Range", "30-49 SPF"),
            ("spf50", "SPF Range", "50+ SPF"),
            ("mineral", "Formulation Type", "Mineral"),
            ("nowhitecast", "Formulation Type", "No White Cast"),
            ("synthetic", "Formulation Type", "Synthetic"),
            ("sensitive", "Skin Type", "Sensitive"),
        ] {
            m.insert(key, category, label);
        }
        m
    }
}

fn find_or_create<'a>(parent: &'a mut TreeNode, name: &str) -> &'a mut TreeNode {
    let idx = match parent.children.iter().position(|c| c.name == name) {
        Some(idx) => idx,
        None => {
            parent.children.push(TreeNode::branch(name, Vec::new()));
            parent.children.len() - 1
        }
    };
    &mut parent.children[idx]
}

/// Builds `root / category / label / product` from flat records.
///
/// Unmapped columns are ignored; a record without any mapped, set column contributes nothing.
pub fn build_tree(
    root_name: &str,
    records: &[ProductRecord],
    mapping: &FeatureMapping,
) -> Result<TreeNode> {
    if root_name.trim().is_empty() {
        return Err(Error::InvalidTree {
            message: "root name must not be empty".to_string(),
        });
    }

    let mut root = TreeNode::branch(root_name, Vec::new());
    let mut skipped = 0usize;
    for record in records {
        let placements = record
            .set_flags()
            .filter_map(|key| mapping.get(key))
            .collect::<Vec<_>>();
        if placements.is_empty() {
            skipped += 1;
            continue;
        }
        let features = placements
            .iter()
            .map(|p| p.label.clone())
            .collect::<Vec<_>>();
        let link = record.link.as_deref().and_then(sanitize_link);

        for placement in &placements {
            let category = find_or_create(&mut root, &placement.category);
            let feature = find_or_create(category, &placement.label);
            feature.children.push(TreeNode {
                name: record.product_name.clone(),
                children: Vec::new(),
                value: Some(DEFAULT_LEAF_VALUE),
                features: features.clone(),
                link: link.clone(),
            });
        }
    }

    tracing::debug!(
        records = records.len(),
        skipped,
        categories = root.children.len(),
        "built tree from records"
    );
    Ok(root)
}
