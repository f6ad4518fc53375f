use crate::data::dataset::{ClassLabel, FeatureValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Decision tree node
///
/// A `Split` routes a sample by the value of one named feature; every value observed while
/// training that node has exactly one child. A `Leaf` carries the predicted class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeNode<V: FeatureValue, L: ClassLabel> {
    Leaf {
        label: L,
    },
    Split {
        feature: String,
        children: BTreeMap<V, TreeNode<V, L>>,
    },
}

impl<V: FeatureValue, L: ClassLabel> TreeNode<V, L> {
    pub fn leaf(label: L) -> Self {
        TreeNode::Leaf { label }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Class label of a leaf, `None` for splits.
    pub fn label(&self) -> Option<&L> {
        match self {
            TreeNode::Leaf { label } => Some(label),
            TreeNode::Split { .. } => None,
        }
    }

    /// Feature name a split tests, `None` for leaves.
    pub fn feature(&self) -> Option<&str> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Split { feature, .. } => Some(feature),
        }
    }

    pub fn children(&self) -> Option<&BTreeMap<V, TreeNode<V, L>>> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Split { children, .. } => Some(children),
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { children, .. } => children.values().map(Self::leaf_count).sum(),
        }
    }

    /// Number of split levels on the longest path down to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Split { children, .. } => {
                1 + children.values().map(Self::depth).max().unwrap_or(0)
            }
        }
    }
}

/// Nested map rendering, e.g. `{"Work": {0: "no", 1: "yes"}}`.
impl<V: FeatureValue, L: ClassLabel> Display for TreeNode<V, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TreeNode::Leaf { label } => write!(f, "{:?}", label),
            TreeNode::Split { feature, children } => {
                write!(f, "{{{:?}: {{", feature)?;
                for (i, (value, child)) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", value, child)?;
                }
                write!(f, "}}}}")
            }
        }
    }
}
