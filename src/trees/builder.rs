//! Recursive tree induction.
use super::impurity::split_impurity;
use super::node::TreeNode;
use super::params::Criterion;
use crate::data::dataset::{ClassLabel, Dataset, FeatureValue};
use crate::errors::TreeError;
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Grows a tree by repeatedly splitting on the feature with the lowest impurity.
///
/// Every split consumes its feature, so the recursion is at most as deep as the
/// number of features.
#[derive(Clone, Debug)]
pub struct TreeBuilder<L: ClassLabel> {
    criterion: Criterion<L>,
}

impl<L: ClassLabel> Default for TreeBuilder<L> {
    fn default() -> Self {
        Self::new(Criterion::Gini)
    }
}

impl<L: ClassLabel> TreeBuilder<L> {
    pub fn new(criterion: Criterion<L>) -> Self {
        Self { criterion }
    }

    pub fn criterion(&self) -> &Criterion<L> {
        &self.criterion
    }

    /// Builds a tree from `dataset`, naming split nodes after `feature_labels`.
    ///
    /// # Errors
    ///
    /// * [`TreeError::EmptyDataset`] if a (sub)set without rows is reached.
    /// * [`TreeError::ArityMismatch`] if a mixed (sub)set doesn't have exactly one name per
    ///   feature column. Pure rows become a leaf whatever names are passed.
    pub fn build<V: FeatureValue>(
        &self,
        dataset: &Dataset<V, L>,
        feature_labels: Vec<String>,
    ) -> Result<TreeNode<V, L>, TreeError> {
        if dataset.nrows() == 0 {
            return Err(TreeError::EmptyDataset);
        }
        let first = &dataset.y[0];
        if dataset.y.iter().all(|label| label == first) {
            return Ok(TreeNode::leaf(first.clone()));
        }
        if feature_labels.len() != dataset.nfeatures() {
            return Err(TreeError::ArityMismatch {
                expected: dataset.nfeatures(),
                found: feature_labels.len(),
            });
        }
        if dataset.nfeatures() == 0 {
            let labels: Vec<&L> = dataset.y.iter().collect();
            let label = majority_label(&labels).ok_or(TreeError::EmptyDataset)?;
            debug!("No features left, majority leaf {:?}", label);
            return Ok(TreeNode::leaf(label.clone()));
        }

        let best_feature = self.best_feature(dataset)?;
        let mut remaining_labels = feature_labels;
        let feature = remaining_labels.remove(best_feature);
        debug!(
            "Splitting {} rows on {} ({} features left)",
            dataset.nrows(),
            feature,
            remaining_labels.len()
        );

        let mut children = BTreeMap::new();
        for value in dataset.unique_values(best_feature) {
            let subset = dataset.partition(best_feature, &value);
            let child = self.build(&subset, remaining_labels.clone())?;
            children.insert(value, child);
        }

        Ok(TreeNode::Split { feature, children })
    }

    /// Index of the feature with the strictly lowest impurity; ties keep the earlier feature.
    fn best_feature<V: FeatureValue>(&self, dataset: &Dataset<V, L>) -> Result<usize, TreeError> {
        let mut best: Option<(usize, f64)> = None;
        for feature_index in 0..dataset.nfeatures() {
            let impurity = split_impurity(dataset, feature_index, &self.criterion)?;
            if best.map_or(true, |(_, best_impurity)| impurity < best_impurity) {
                best = Some((feature_index, impurity));
            }
        }
        // unreachable: build only asks when at least one feature is left
        best.map(|(feature_index, _)| feature_index)
            .ok_or(TreeError::EmptyDataset)
    }
}

/// Most frequent label. Among equally frequent labels the one seen first wins.
pub fn majority_label<'a, L: ClassLabel>(labels: &[&'a L]) -> Option<&'a L> {
    let mut counts: HashMap<&L, usize> = HashMap::new();
    let mut order: Vec<&L> = Vec::new();
    for &label in labels {
        let count = counts.entry(label).or_insert(0);
        if *count == 0 {
            order.push(label);
        }
        *count += 1;
    }

    let mut best: Option<(&L, usize)> = None;
    for label in order {
        let count = counts[label];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_majority_label() {
        assert_eq!(majority_label(&[&"a", &"b", &"b"]), Some(&"b"));
        assert_eq!(majority_label::<&str>(&[]), None);
    }

    #[test]
    fn test_majority_label_tie_goes_to_first_seen() {
        assert_eq!(majority_label(&[&"b", &"a", &"a", &"b"]), Some(&"b"));
        assert_eq!(majority_label(&[&2, &1, &3, &1, &2]), Some(&2));
    }

    #[test]
    fn test_build_empty_dataset() {
        let dataset = Dataset::<u8, u8>::from_rows(vec![]).unwrap();
        let builder = TreeBuilder::default();
        assert_eq!(
            builder.build(&dataset, vec![]).unwrap_err(),
            TreeError::EmptyDataset
        );
    }

    #[test]
    fn test_build_arity_mismatch() {
        let dataset = Dataset::from_rows(vec![(vec![0, 1], "a"), (vec![1, 0], "b")]).unwrap();
        let builder = TreeBuilder::default();
        assert_eq!(
            builder.build(&dataset, names(&["only"])).unwrap_err(),
            TreeError::ArityMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_pure_rows_give_leaf() {
        let dataset = Dataset::from_rows(vec![
            (vec![0, 1], "yes"),
            (vec![1, 0], "yes"),
            (vec![2, 2], "yes"),
        ])
        .unwrap();
        let builder = TreeBuilder::default();
        let tree = builder.build(&dataset, names(&["a", "b"])).unwrap();
        assert_eq!(tree, TreeNode::leaf("yes"));
    }

    #[test]
    fn test_pure_rows_give_leaf_whatever_the_names() {
        let dataset = Dataset::from_rows(vec![(vec![0, 1], "yes"), (vec![1, 0], "yes")]).unwrap();
        let builder = TreeBuilder::default();
        assert_eq!(builder.build(&dataset, vec![]).unwrap(), TreeNode::leaf("yes"));
        assert_eq!(
            builder.build(&dataset, names(&["a", "b", "c"])).unwrap(),
            TreeNode::leaf("yes")
        );
    }

    #[test]
    fn test_no_features_left_gives_majority_leaf() {
        let dataset = Dataset::from_rows(vec![
            (vec![], "no"),
            (vec![], "yes"),
            (vec![], "yes"),
        ])
        .unwrap();
        let builder = TreeBuilder::default();
        assert_eq!(
            builder.build::<u8>(&dataset, vec![]).unwrap(),
            TreeNode::leaf("yes")
        );
    }

    #[test]
    fn test_exhausted_features_with_conflicting_rows() {
        let dataset = Dataset::from_rows(vec![
            (vec![0], "no"),
            (vec![0], "yes"),
            (vec![1], "yes"),
        ])
        .unwrap();
        let builder = TreeBuilder::default();
        let tree = builder.build(&dataset, names(&["flag"])).unwrap();
        assert_eq!(
            tree,
            TreeNode::Split {
                feature: "flag".into(),
                children: BTreeMap::from([
                    (0, TreeNode::leaf("no")),
                    (1, TreeNode::leaf("yes")),
                ]),
            }
        );
    }

    #[test]
    fn test_tied_features_split_on_first() {
        let dataset = Dataset::from_rows(vec![
            (vec![0, 0], "a"),
            (vec![1, 1], "b"),
        ])
        .unwrap();
        let builder = TreeBuilder::default();
        let tree = builder.build(&dataset, names(&["first", "second"])).unwrap();
        assert_eq!(tree.feature(), Some("first"));
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_sibling_subtrees_keep_their_own_feature_names() {
        // the root splits on "c"; both branches must still be able to use "a" and "b"
        let dataset = Dataset::from_rows(vec![
            (vec![0, 0, 0], "x"),
            (vec![1, 0, 0], "y"),
            (vec![0, 0, 1], "z"),
            (vec![0, 1, 1], "w"),
            (vec![0, 0, 2], "v"),
        ])
        .unwrap();
        let builder = TreeBuilder::default();
        let tree = builder.build(&dataset, names(&["a", "b", "c"])).unwrap();
        assert_eq!(tree.feature(), Some("c"));

        let children = tree.children().unwrap();
        assert_eq!(children[&0].feature(), Some("a"));
        assert_eq!(children[&1].feature(), Some("b"));
        assert_eq!(children[&2], TreeNode::leaf("v"));
    }
}
