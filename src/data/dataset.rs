use crate::errors::TreeError;
use nalgebra::{DMatrix, DVector};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::fmt::{self, Debug, Formatter};
use std::hash::Hash;

/// A discrete token usable in the dataset: integers, chars, strings and the like.
pub trait DataValue: Debug + Clone + Ord + Hash + Send + Sync + 'static {}

impl<T> DataValue for T where T: Debug + Clone + Ord + Hash + Send + Sync + 'static {}

pub trait FeatureValue: DataValue {}
impl<T> FeatureValue for T where T: DataValue {}

pub trait ClassLabel: DataValue {}
impl<T> ClassLabel for T where T: DataValue {}

/// Categorical dataset: one feature row per sample plus its class label.
pub struct Dataset<V: FeatureValue, L: ClassLabel> {
    pub x: DMatrix<V>,
    pub y: DVector<L>,
}

impl<V: FeatureValue, L: ClassLabel> Clone for Dataset<V, L> {
    fn clone(&self) -> Self {
        Self::new(self.x.clone(), self.y.clone())
    }
}

impl<V: FeatureValue, L: ClassLabel> Debug for Dataset<V, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Dataset {{\n    x: [\n")?;

        for i in 0..self.x.nrows() {
            write!(f, "        [")?;
            for j in 0..self.x.ncols() {
                write!(f, "{:?}, ", self.x[(i, j)])?;
            }
            writeln!(f, "],")?;
        }

        write!(f, "    ],\n    y: [")?;
        for i in 0..self.y.len() {
            write!(f, "{:?}, ", self.y[i])?;
        }
        write!(f, "]\n}}")
    }
}

impl<V: FeatureValue, L: ClassLabel> Dataset<V, L> {
    pub fn new(x: DMatrix<V>, y: DVector<L>) -> Self {
        Self { x, y }
    }

    /// Builds a dataset from `(features, label)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::RaggedRows`] if the rows don't all have the same number of features.
    pub fn from_rows(rows: Vec<(Vec<V>, L)>) -> Result<Self, TreeError> {
        let ncols = rows.first().map_or(0, |(features, _)| features.len());
        let mut values = Vec::with_capacity(rows.len() * ncols);
        let mut labels = Vec::with_capacity(rows.len());

        for (row, (features, label)) in rows.into_iter().enumerate() {
            if features.len() != ncols {
                return Err(TreeError::RaggedRows {
                    row,
                    expected: ncols,
                    found: features.len(),
                });
            }
            values.extend(features);
            labels.push(label);
        }

        Ok(Self::new(
            DMatrix::from_row_slice(labels.len(), ncols, &values),
            DVector::from_vec(labels),
        ))
    }

    pub fn nrows(&self) -> usize {
        self.y.len()
    }

    /// Number of feature columns, the label excluded.
    pub fn nfeatures(&self) -> usize {
        self.x.ncols()
    }

    /// Features of row `index` in column order.
    pub fn row(&self, index: usize) -> Vec<V> {
        self.x.row(index).iter().cloned().collect()
    }

    /// Sorted distinct values found in a feature column.
    pub fn unique_values(&self, feature_index: usize) -> Vec<V> {
        let mut values: Vec<_> = self.x.column(feature_index).iter().cloned().collect();
        values.sort();
        values.dedup();
        values
    }

    /// Rows whose `feature_index` value equals `value`, with that column removed.
    ///
    /// The remaining columns keep their order and every kept row keeps its label.
    pub fn partition(&self, feature_index: usize, value: &V) -> Self {
        let indices: Vec<usize> = self
            .x
            .column(feature_index)
            .iter()
            .enumerate()
            .filter(|(_, v)| *v == value)
            .map(|(index, _)| index)
            .collect();

        debug_assert!(feature_index < self.x.ncols());
        let ncols = self.x.ncols().saturating_sub(1);
        let values: Vec<V> = indices
            .iter()
            .flat_map(|&index| {
                self.x
                    .row(index)
                    .iter()
                    .enumerate()
                    .filter(|&(col, _)| col != feature_index)
                    .map(|(_, v)| v.clone())
                    .collect::<Vec<_>>()
            })
            .collect();
        let labels: Vec<L> = indices.iter().map(|&index| self.y[index].clone()).collect();

        Self::new(
            DMatrix::from_row_slice(indices.len(), ncols, &values),
            DVector::from_vec(labels),
        )
    }

    /// Shuffles the rows and splits them into a training and a test part.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidParameter`] if `train_size` is outside `0.0..=1.0`.
    pub fn train_test_split(
        &self,
        train_size: f64,
        seed: Option<u64>,
    ) -> Result<(Self, Self), TreeError> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(TreeError::InvalidParameter(
                "train_size".into(),
                "a value between 0.0 and 1.0".into(),
                train_size.to_string(),
            ));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.nrows()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.nrows() as f64 * train_size).floor() as usize;
        let (train_indices, test_indices) = indices.split_at(train_size);

        Ok((self.select(train_indices), self.select(test_indices)))
    }

    fn select(&self, indices: &[usize]) -> Self {
        let values: Vec<V> = indices.iter().flat_map(|&index| self.row(index)).collect();
        let labels: Vec<L> = indices.iter().map(|&index| self.y[index].clone()).collect();
        Self::new(
            DMatrix::from_row_slice(indices.len(), self.nfeatures(), &values),
            DVector::from_vec(labels),
        )
    }
}

impl<T: DataValue> Dataset<T, T> {
    /// Builds a dataset from token rows whose last element is the class label.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::RaggedRows`] if a row is empty or its length differs from the first row.
    pub fn from_labeled_rows(rows: Vec<Vec<T>>) -> Result<Self, TreeError> {
        let arity = rows.first().map_or(0, Vec::len);
        let mut pairs = Vec::with_capacity(rows.len());
        for (row, mut values) in rows.into_iter().enumerate() {
            if values.len() != arity {
                return Err(TreeError::RaggedRows {
                    row,
                    expected: arity,
                    found: values.len(),
                });
            }
            let Some(label) = values.pop() else {
                return Err(TreeError::RaggedRows {
                    row,
                    expected: 1,
                    found: 0,
                });
            };
            pairs.push((values, label));
        }
        Self::from_rows(pairs)
    }
}
