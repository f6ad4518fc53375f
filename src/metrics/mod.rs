/// Confusion matrix and accuracy of predicted class labels
pub mod confusion;
