//! Categorical feature encoding
//!
//! A `CategoryEncoder` maps each distinct label seen at fit time to a
//! non-negative integer code. Codes follow the sorted order of the labels,
//! so fitting the same set of labels always yields the same mapping. Labels
//! never seen at fit time encode to [`UNSEEN_CODE`].
//!
//! The mapping is frozen once fitted: `encode` takes `&self` and there is
//! no way to add labels afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Code assigned to labels not observed at fit time
pub const UNSEEN_CODE: i64 = -1;

/// Frozen label-to-code mapping for one categorical feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEncoder {
    /// Feature name, for logs
    feature: String,

    /// Label -> code
    codes: BTreeMap<String, i64>,
}

impl CategoryEncoder {
    /// Fit an encoder over the labels of one feature
    ///
    /// # Example
    /// ```
    /// use loginrisk_model::{CategoryEncoder, UNSEEN_CODE};
    ///
    /// let encoder = CategoryEncoder::fit("location", ["Mumbai", "Delhi", "Delhi"]);
    /// assert_eq!(encoder.encode("Delhi"), 0);
    /// assert_eq!(encoder.encode("Mumbai"), 1);
    /// assert_eq!(encoder.encode("Moscow"), UNSEEN_CODE);
    /// ```
    pub fn fit<I, S>(feature: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();

        let codes = distinct
            .into_iter()
            .enumerate()
            .map(|(code, label)| (label, code as i64))
            .collect();

        Self {
            feature: feature.into(),
            codes,
        }
    }

    /// Code for a label, or [`UNSEEN_CODE`]
    pub fn encode(&self, label: &str) -> i64 {
        self.codes.get(label).copied().unwrap_or(UNSEEN_CODE)
    }

    /// Whether the label was observed at fit time
    pub fn contains(&self, label: &str) -> bool {
        self.codes.contains_key(label)
    }

    /// Feature name
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Observed labels in code order
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
