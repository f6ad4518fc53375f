//! # cart-tree
//!
//! `cart-tree` builds decision tree classifiers from categorical data. Each split tests one
//! feature and has a branch per value seen in training; splits are chosen by the lowest
//! weighted Gini impurity (or entropy), and leaves hold the majority class.
//!
//! ## Example Usage
//!
//! ```rust
//! use cart_tree::data::dataset::Dataset;
//! use cart_tree::trees::classifier::DecisionTreeClassifier;
//! use cart_tree::trees::codec;
//! use nalgebra::DMatrix;
//!
//! let dataset = Dataset::from_rows(vec![
//!     (vec![0, 0], "no"),
//!     (vec![0, 1], "yes"),
//!     (vec![1, 1], "yes"),
//! ])
//! .unwrap();
//! let names = vec!["House".to_string(), "Work".to_string()];
//!
//! let mut model = DecisionTreeClassifier::new("unknown");
//! model.fit(&dataset, &names).unwrap();
//!
//! let predictions = model.predict(&DMatrix::from_row_slice(2, 2, &[1, 0, 0, 2])).unwrap();
//! assert_eq!(predictions.as_slice(), &["no", "unknown"]);
//!
//! let tree = model.tree().unwrap();
//! let bytes = codec::to_bytes(tree).unwrap();
//! assert_eq!(&codec::from_bytes::<i32, String>(&bytes).unwrap().to_string(), &tree.to_string());
//! ```

/// Dataset and data manipulation utilities
pub mod data;
/// Error types
pub mod errors;
/// Functions for evaluating model performance
pub mod metrics;
/// Decision trees
pub mod trees;
