use crate::data::dataset::ClassLabel;
use crate::errors::TreeError;

/// Measure of class mixing used to score candidate splits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Criterion<L> {
    /// `1 - Σ p_c²` over every class present.
    Gini,
    /// Shannon entropy in bits.
    Entropy,
    /// Two-class Gini, `1 - p² - (1 - p)²` with `p` the share of the `negative` label.
    BinaryGini { negative: L },
}

impl<L: ClassLabel> Criterion<L> {
    /// Parses a criterion name. `binary_gini` needs the negative class label.
    pub fn from_name(name: &str, negative: Option<L>) -> Result<Self, TreeError> {
        match (name, negative) {
            ("gini", _) => Ok(Criterion::Gini),
            ("entropy", _) => Ok(Criterion::Entropy),
            ("binary_gini", Some(negative)) => Ok(Criterion::BinaryGini { negative }),
            ("binary_gini", None) => Err(TreeError::InvalidParameter(
                "negative".into(),
                "a negative class label for binary_gini".into(),
                "none".into(),
            )),
            (other, _) => Err(TreeError::InvalidParameter(
                "criterion".into(),
                "one of gini, entropy, binary_gini".into(),
                other.into(),
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Criterion::Gini => "gini",
            Criterion::Entropy => "entropy",
            Criterion::BinaryGini { .. } => "binary_gini",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreeClassifierParams<L> {
    pub criterion: Criterion<L>,
}

impl<L: ClassLabel> Default for TreeClassifierParams<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ClassLabel> TreeClassifierParams<L> {
    pub fn new() -> Self {
        Self {
            criterion: Criterion::Gini,
        }
    }

    pub fn set_criterion(&mut self, criterion: Criterion<L>) {
        self.criterion = criterion;
    }

    /// Sets the criterion by name, see [`Criterion::from_name`].
    pub fn set_criterion_name(&mut self, name: &str, negative: Option<L>) -> Result<(), TreeError> {
        self.criterion = Criterion::from_name(name, negative)?;
        Ok(())
    }

    pub fn criterion(&self) -> &Criterion<L> {
        &self.criterion
    }
}
