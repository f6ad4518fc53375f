//! Split scoring.
//!
//! A feature is scored by partitioning the rows on each of its values and summing the
//! impurity of every partition, weighted by the share of rows it holds.
use super::params::Criterion;
use crate::data::dataset::{ClassLabel, Dataset, FeatureValue};
use crate::errors::TreeError;
use std::collections::HashMap;

/// Weighted impurity left after splitting `dataset` on `feature_index`. Lower is better.
///
/// # Errors
///
/// Returns [`TreeError::DegenerateSplit`] if a value yields an empty partition.
pub fn split_impurity<V: FeatureValue, L: ClassLabel>(
    dataset: &Dataset<V, L>,
    feature_index: usize,
    criterion: &Criterion<L>,
) -> Result<f64, TreeError> {
    let num_samples = dataset.nrows() as f64;
    let mut impurity = 0.0;

    for value in dataset.unique_values(feature_index) {
        let subset = dataset.partition(feature_index, &value);
        if subset.nrows() == 0 {
            return Err(TreeError::DegenerateSplit {
                feature: feature_index,
                value: format!("{:?}", value),
            });
        }
        let weight = subset.nrows() as f64 / num_samples;
        let labels: Vec<&L> = subset.y.iter().collect();
        impurity += weight * node_impurity(&labels, criterion);
    }
    Ok(impurity)
}

/// Impurity of a single group of labels.
pub fn node_impurity<L: ClassLabel>(labels: &[&L], criterion: &Criterion<L>) -> f64 {
    match criterion {
        Criterion::Gini => gini_index(labels),
        Criterion::Entropy => entropy(labels),
        Criterion::BinaryGini { negative } => binary_gini_index(labels, negative),
    }
}

fn class_probabilities<L: ClassLabel>(labels: &[&L]) -> Vec<f64> {
    let total = labels.len() as f64;
    let counts = labels.iter().fold(HashMap::new(), |mut acc, &label| {
        *acc.entry(label).or_insert(0usize) += 1;
        acc
    });
    counts
        .into_values()
        .map(|count| count as f64 / total)
        .collect()
}

pub fn gini_index<L: ClassLabel>(labels: &[&L]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    1.0 - class_probabilities(labels).iter().map(|p| p * p).sum::<f64>()
}

pub fn entropy<L: ClassLabel>(labels: &[&L]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    -class_probabilities(labels)
        .iter()
        .map(|p| p * p.log2())
        .sum::<f64>()
}

pub fn binary_gini_index<L: ClassLabel>(labels: &[&L], negative: &L) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let p = labels.iter().filter(|&&label| label == negative).count() as f64 / labels.len() as f64;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn loan_dataset() -> Dataset<u8, &'static str> {
        Dataset::from_rows(vec![
            (vec![0, 0, 0, 0], "no"),
            (vec![0, 0, 0, 1], "no"),
            (vec![0, 1, 0, 1], "yes"),
            (vec![0, 1, 1, 0], "yes"),
            (vec![0, 0, 0, 0], "no"),
            (vec![1, 0, 0, 0], "no"),
            (vec![1, 0, 0, 1], "no"),
            (vec![1, 1, 1, 1], "yes"),
        ])
        .unwrap()
    }

    #[test]
    fn test_gini_index() {
        assert_relative_eq!(gini_index(&[&"a", &"a", &"a"]), 0.0);
        assert_relative_eq!(gini_index(&[&"a", &"b"]), 0.5);
        assert_relative_eq!(gini_index(&[&1, &2, &3]), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_entropy() {
        assert_relative_eq!(entropy(&[&"a", &"a"]), 0.0);
        assert_relative_eq!(entropy(&[&"a", &"b"]), 1.0);
        assert_relative_eq!(entropy(&[&1, &2, &3, &4]), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_binary_gini_matches_gini_for_two_classes() {
        let labels = [&"no", &"no", &"yes", &"no", &"yes"];
        assert_relative_eq!(
            binary_gini_index(&labels, &"no"),
            gini_index(&labels),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_binary_gini_with_absent_negative_is_zero() {
        assert_relative_eq!(binary_gini_index(&[&"no", &"yes"], &"N"), 0.0);
    }

    #[test]
    fn test_split_impurity_gini() {
        let dataset = loan_dataset();
        let criterion = Criterion::Gini;
        assert_relative_eq!(
            split_impurity(&dataset, 0, &criterion).unwrap(),
            7.0 / 15.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(split_impurity(&dataset, 1, &criterion).unwrap(), 0.0);
        assert_relative_eq!(
            split_impurity(&dataset, 2, &criterion).unwrap(),
            5.0 / 24.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            split_impurity(&dataset, 3, &criterion).unwrap(),
            0.4375,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_split_impurity_entropy_prefers_pure_split() {
        let dataset = loan_dataset();
        let criterion = Criterion::Entropy;
        let work = split_impurity(&dataset, 1, &criterion).unwrap();
        let house = split_impurity(&dataset, 2, &criterion).unwrap();
        assert_relative_eq!(work, 0.0);
        assert!(house > work);
    }

    #[test]
    fn test_split_impurity_single_value_feature() {
        let dataset = Dataset::from_rows(vec![(vec![3], "a"), (vec![3], "b")]).unwrap();
        assert_relative_eq!(
            split_impurity(&dataset, 0, &Criterion::Gini).unwrap(),
            0.5
        );
    }
}
