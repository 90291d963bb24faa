//! Weighted hierarchy.
//!
//! [`TreeNode`] is the nested, serde-friendly shape handed over by the tree builder (or read from
//! JSON). [`Hierarchy`] is the immutable arena the layout engine works on: nodes are addressed by
//! [`NodeId`] (pre-order index, root = 0) and every non-leaf value is the strict sum of its
//! children.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Weight given to a leaf without an explicit value.
pub const DEFAULT_LEAF_VALUE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
    /// Leaf weight; ignored on nodes with children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl TreeNode {
    pub fn branch(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            children,
            value: None,
            features: Vec::new(),
            link: None,
        }
    }

    pub fn leaf(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            value: Some(value),
            features: Vec::new(),
            link: None,
        }
    }

    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierNode {
    pub id: NodeId,
    pub name: String,
    pub parent: Option<NodeId>,
    /// Insertion order.
    pub children: Vec<NodeId>,
    pub depth: usize,
    pub value: f64,
    pub features: Vec<String>,
    pub link: Option<String>,
}

impl HierNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hierarchy {
    nodes: Vec<HierNode>,
    height: usize,
}

impl Hierarchy {
    pub fn from_tree(root: &TreeNode) -> Result<Self> {
        if root.name.trim().is_empty() {
            return Err(Error::InvalidTree {
                message: "root node has an empty name".to_string(),
            });
        }

        let mut nodes: Vec<HierNode> = Vec::new();
        push_node(&mut nodes, root, None, 0)?;
        compute_sum(&mut nodes, NodeId::ROOT);
        let height = nodes.iter().map(|n| n.depth).max().unwrap_or(0);

        tracing::debug!(
            nodes = nodes.len(),
            height,
            value = nodes[0].value,
            "built hierarchy"
        );
        Ok(Self { nodes, height })
    }

    pub fn root(&self) -> &HierNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> &HierNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&HierNode> {
        self.nodes.get(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth of the deepest leaf (root alone = 0).
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn nodes(&self) -> &[HierNode] {
        &self.nodes
    }

    /// Node ids in pre-order (which is also id order).
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).is_leaf()
    }

    /// `id` followed by its ancestors up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![id];
        let mut cur = self.node(id).parent;
        while let Some(p) = cur {
            out.push(p);
            cur = self.node(p).parent;
        }
        out
    }

    /// The depth-1 ancestor of `id` (or `id` itself at depth 1); `None` for the root.
    pub fn category_of(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id)
            .into_iter()
            .find(|&a| self.node(a).depth == 1)
    }

    /// Names from the root down to `id`.
    pub fn path_names(&self, id: NodeId) -> Vec<&str> {
        let mut names = self
            .ancestors(id)
            .into_iter()
            .map(|a| self.node(a).name.as_str())
            .collect::<Vec<_>>();
        names.reverse();
        names
    }

    /// Resolves a path of names below the root (`[]` is the root itself).
    pub fn find_path(&self, names: &[&str]) -> Option<NodeId> {
        let mut cur = NodeId::ROOT;
        for name in names {
            cur = self
                .node(cur)
                .children
                .iter()
                .copied()
                .find(|&c| self.node(c).name == *name)?;
        }
        Some(cur)
    }

    /// Every node, parents before their children, siblings in input order.
    pub fn descendants_pre_order(&self) -> impl Iterator<Item = &HierNode> + '_ {
        self.nodes.iter()
    }

    pub fn leaves(&self) -> impl Iterator<Item = &HierNode> + '_ {
        self.descendants_pre_order().filter(|n| n.is_leaf())
    }
}

fn push_node(
    nodes: &mut Vec<HierNode>,
    node: &TreeNode,
    parent: Option<NodeId>,
    depth: usize,
) -> Result<NodeId> {
    let id = NodeId(nodes.len());
    let own_value = if node.is_leaf() {
        node.value.unwrap_or(DEFAULT_LEAF_VALUE)
    } else {
        0.0
    };
    if !(own_value.is_finite() && own_value >= 0.0) {
        return Err(Error::InvalidTree {
            message: format!("leaf `{}` has invalid value {own_value}", node.name),
        });
    }

    nodes.push(HierNode {
        id,
        name: node.name.clone(),
        parent,
        children: Vec::new(),
        depth,
        value: own_value,
        features: node.features.clone(),
        link: node.link.clone(),
    });

    if let Some(parent_id) = parent {
        nodes[parent_id.0].children.push(id);
    }

    for child in &node.children {
        push_node(nodes, child, Some(id), depth + 1)?;
    }
    Ok(id)
}

fn compute_sum(nodes: &mut [HierNode], id: NodeId) -> f64 {
    if nodes[id.0].children.is_empty() {
        return nodes[id.0].value;
    }
    let children = nodes[id.0].children.clone();
    let mut sum = 0.0;
    for c in children {
        sum += compute_sum(nodes, c);
    }
    nodes[id.0].value = sum;
    sum
}
