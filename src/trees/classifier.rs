//! Decision Tree Classifier
use super::builder::TreeBuilder;
use super::node::TreeNode;
use super::params::{Criterion, TreeClassifierParams};
use crate::data::dataset::{ClassLabel, Dataset, FeatureValue};
use crate::errors::TreeError;
use crate::metrics::confusion::ClassificationMetrics;
use log::{debug, info};
use nalgebra::{DMatrix, DVector};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Walks `tree` for one sample and returns the predicted label.
///
/// `feature_labels` names the slots of `row`, so the row may list its features in any order
/// as long as the names agree. A value the tree never saw at a split yields `unknown`.
///
/// # Errors
///
/// * [`TreeError::UnknownFeature`] if a split feature is missing from `feature_labels`.
/// * [`TreeError::ShortRow`] if the row has no value at that feature's slot.
pub fn classify<V: FeatureValue, L: ClassLabel>(
    tree: &TreeNode<V, L>,
    feature_labels: &[String],
    row: &[V],
    unknown: &L,
) -> Result<L, TreeError> {
    let mut node = tree;
    loop {
        match node {
            TreeNode::Leaf { label } => return Ok(label.clone()),
            TreeNode::Split { feature, children } => {
                let index = feature_labels
                    .iter()
                    .position(|name| name == feature)
                    .ok_or_else(|| TreeError::UnknownFeature(feature.clone()))?;
                let value = row.get(index).ok_or(TreeError::ShortRow {
                    index,
                    len: row.len(),
                })?;
                match children.get(value) {
                    Some(child) => node = child,
                    None => {
                        debug!("Value {:?} of {} was not seen in training", value, feature);
                        return Ok(unknown.clone());
                    }
                }
            }
        }
    }
}

/// Classifies every row of `rows` independently, keeping the input order.
pub fn classify_all<V: FeatureValue, L: ClassLabel>(
    tree: &TreeNode<V, L>,
    feature_labels: &[String],
    rows: &DMatrix<V>,
    unknown: &L,
) -> Result<Vec<L>, TreeError> {
    (0..rows.nrows())
        .into_par_iter()
        .map(|index| {
            let row: Vec<V> = rows.row(index).iter().cloned().collect();
            classify(tree, feature_labels, &row, unknown)
        })
        .collect()
}

/// Decision Tree Classifier
#[derive(Clone, Debug)]
pub struct DecisionTreeClassifier<V: FeatureValue, L: ClassLabel> {
    root: Option<TreeNode<V, L>>,
    feature_labels: Vec<String>,
    unknown_label: L,
    tree_params: TreeClassifierParams<L>,
}

impl<V: FeatureValue, L: ClassLabel> ClassificationMetrics<L> for DecisionTreeClassifier<V, L> {}

impl<V: FeatureValue, L: ClassLabel> DecisionTreeClassifier<V, L> {
    /// Creates an unfitted classifier using the Gini criterion.
    ///
    /// # Arguments
    ///
    /// * `unknown_label` - Label predicted for samples holding a value the tree never saw.
    pub fn new(unknown_label: L) -> Self {
        Self::with_params(TreeClassifierParams::new(), unknown_label)
    }

    pub fn with_params(tree_params: TreeClassifierParams<L>, unknown_label: L) -> Self {
        Self {
            root: None,
            feature_labels: Vec::new(),
            unknown_label,
            tree_params,
        }
    }

    /// Wraps an already built (for example deserialized) tree.
    pub fn from_tree(tree: TreeNode<V, L>, feature_labels: Vec<String>, unknown_label: L) -> Self {
        Self {
            root: Some(tree),
            feature_labels,
            unknown_label,
            tree_params: TreeClassifierParams::new(),
        }
    }

    pub fn set_criterion(&mut self, criterion: Criterion<L>) {
        self.tree_params.set_criterion(criterion);
    }

    pub fn criterion(&self) -> &Criterion<L> {
        self.tree_params.criterion()
    }

    pub fn tree(&self) -> Option<&TreeNode<V, L>> {
        self.root.as_ref()
    }

    pub fn feature_labels(&self) -> &[String] {
        &self.feature_labels
    }

    pub fn unknown_label(&self) -> &L {
        &self.unknown_label
    }

    /// Builds the decision tree from a dataset.
    ///
    /// # Arguments
    ///
    /// * `dataset` - The dataset containing features and labels.
    /// * `feature_labels` - One name per feature column, in column order.
    ///
    /// # Errors
    ///
    /// This method will return an error if the dataset is empty or the names don't match
    /// the feature columns.
    pub fn fit(
        &mut self,
        dataset: &Dataset<V, L>,
        feature_labels: &[String],
    ) -> Result<String, TreeError> {
        let builder = TreeBuilder::new(self.criterion().clone());
        let root = builder.build(dataset, feature_labels.to_vec())?;
        info!(
            "Built tree from {} rows and {} features using {}: depth {}, {} leaves",
            dataset.nrows(),
            dataset.nfeatures(),
            self.criterion().name(),
            root.depth(),
            root.leaf_count()
        );
        self.root = Some(root);
        self.feature_labels = feature_labels.to_vec();
        Ok("Finished building the tree.".into())
    }

    /// Predicts the labels for new data whose columns follow the fitted feature names.
    ///
    /// # Errors
    ///
    /// This method will return an error if the tree wasn't built yet.
    pub fn predict(&self, features: &DMatrix<V>) -> Result<DVector<L>, TreeError> {
        let root = self.root.as_ref().ok_or(TreeError::NotFitted)?;
        let predictions = classify_all(root, &self.feature_labels, features, &self.unknown_label)?;
        Ok(DVector::from_vec(predictions))
    }
}
