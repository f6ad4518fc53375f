//! Persisted form of a tree.
//!
//! Trees are stored as JSON. Split children become a JSON object keyed by the feature
//! value, so feature values must serialize as strings or integers.
use super::node::TreeNode;
use crate::data::dataset::{ClassLabel, FeatureValue};
use crate::errors::TreeError;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serializes a tree into bytes.
pub fn to_bytes<V, L>(tree: &TreeNode<V, L>) -> Result<Vec<u8>, TreeError>
where
    V: FeatureValue + Serialize,
    L: ClassLabel + Serialize,
{
    Ok(serde_json::to_vec(tree)?)
}

/// Reads a tree back from bytes produced by [`to_bytes`].
///
/// # Errors
///
/// Returns [`TreeError::CodecMismatch`] if the bytes don't describe a tree.
pub fn from_bytes<V, L>(bytes: &[u8]) -> Result<TreeNode<V, L>, TreeError>
where
    V: FeatureValue + DeserializeOwned,
    L: ClassLabel + DeserializeOwned,
{
    Ok(serde_json::from_slice(bytes)?)
}

/// Save a tree to a file.
///
/// * `path` - Path to save the tree to.
pub fn save<V, L, P>(tree: &TreeNode<V, L>, path: P) -> Result<(), TreeError>
where
    V: FeatureValue + Serialize,
    L: ClassLabel + Serialize,
    P: AsRef<Path>,
{
    let bytes = to_bytes(tree)?;
    fs::write(path.as_ref(), &bytes)?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.as_ref().display());
    Ok(())
}

/// Load a tree from a file written by [`save`].
///
/// * `path` - Path to load the tree from.
pub fn load<V, L, P>(path: P) -> Result<TreeNode<V, L>, TreeError>
where
    V: FeatureValue + DeserializeOwned,
    L: ClassLabel + DeserializeOwned,
    P: AsRef<Path>,
{
    let bytes = fs::read(path.as_ref())?;
    from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::Dataset;
    use crate::trees::builder::TreeBuilder;
    use crate::trees::params::Criterion;
    use std::collections::BTreeMap;

    fn built_tree() -> TreeNode<u8, String> {
        let dataset = Dataset::from_rows(vec![
            (vec![0, 0, 0], "x".to_string()),
            (vec![1, 0, 0], "y".to_string()),
            (vec![0, 0, 1], "z".to_string()),
            (vec![0, 1, 1], "w".to_string()),
            (vec![0, 0, 2], "v".to_string()),
        ])
        .unwrap();
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        TreeBuilder::new(Criterion::Gini)
            .build(&dataset, names)
            .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let tree = built_tree();
        let bytes = to_bytes(&tree).unwrap();
        let restored: TreeNode<u8, String> = from_bytes(&bytes).unwrap();
        assert_eq!(restored, tree);
        assert_eq!(restored.depth(), 2);
    }

    #[test]
    fn test_round_trip_string_values() {
        let tree: TreeNode<String, String> = TreeNode::Split {
            feature: "outlook".into(),
            children: BTreeMap::from([
                ("rain".to_string(), TreeNode::leaf("no".to_string())),
                ("sunny".to_string(), TreeNode::leaf("yes".to_string())),
            ]),
        };
        let restored: TreeNode<String, String> = from_bytes(&to_bytes(&tree).unwrap()).unwrap();
        assert_eq!(restored, tree);
    }

    #[test]
    fn test_round_trip_leaf() {
        let tree: TreeNode<u8, u8> = TreeNode::leaf(3);
        assert_eq!(from_bytes::<u8, u8>(&to_bytes(&tree).unwrap()).unwrap(), tree);
    }

    #[test]
    fn test_malformed_bytes() {
        let result = from_bytes::<u8, String>(b"{\"Split\": 12}");
        assert!(matches!(result, Err(TreeError::CodecMismatch(_))));

        let result = from_bytes::<u8, String>(&[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(TreeError::CodecMismatch(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        let tree = built_tree();

        save(&tree, &path).unwrap();
        let restored: TreeNode<u8, String> = load(&path).unwrap();
        assert_eq!(restored, tree);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load::<u8, String, _>(dir.path().join("missing.json"));
        assert!(matches!(result, Err(TreeError::Io(_))));
    }
}
