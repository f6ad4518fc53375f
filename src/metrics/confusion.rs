use std::collections::BTreeSet;

use nalgebra::{DMatrix, DVector};

use crate::data::dataset::ClassLabel;
use crate::errors::TreeError;

type ConfusionMatrix = DMatrix<usize>;

pub trait ClassificationMetrics<L: ClassLabel> {
    /// Sorted classes found in either the true or the predicted labels.
    ///
    /// Row and column `i` of the confusion matrix belong to the `i`-th class of this list.
    fn classes(&self, y_true: &DVector<L>, y_pred: &DVector<L>) -> Vec<L> {
        let classes: BTreeSet<&L> = y_true.iter().chain(y_pred.iter()).collect();
        classes.into_iter().cloned().collect()
    }

    /// Computes the confusion matrix based on the true labels and predicted labels.
    ///
    /// Rows are true classes, columns are predicted classes. A prediction of the
    /// "unknown" label simply becomes one more class.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::LengthMismatch`] if the two vectors differ in length.
    fn confusion_matrix(
        &self,
        y_true: &DVector<L>,
        y_pred: &DVector<L>,
    ) -> Result<ConfusionMatrix, TreeError> {
        if y_true.len() != y_pred.len() {
            return Err(TreeError::LengthMismatch(y_true.len(), y_pred.len()));
        }

        let classes = self.classes(y_true, y_pred);
        let mut matrix = DMatrix::zeros(classes.len(), classes.len());

        for (y_t, y_p) in y_true.iter().zip(y_pred.iter()) {
            // both searches succeed: every label went into `classes`
            if let (Ok(row), Ok(col)) = (classes.binary_search(y_t), classes.binary_search(y_p)) {
                matrix[(row, col)] += 1;
            }
        }

        Ok(matrix)
    }

    /// Share of predictions equal to the true label.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::LengthMismatch`] if the two vectors differ in length.
    fn accuracy(&self, y_true: &DVector<L>, y_pred: &DVector<L>) -> Result<f64, TreeError> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;

        if y_true.is_empty() {
            return Ok(0.0);
        }
        let correct: usize = matrix.diagonal().iter().sum();

        Ok(correct as f64 / y_true.len() as f64)
    }
}
