//! Feature Vector - scoring model input
//!
//! Carries the layout version and hash alongside the values so a vector
//! logged today can be matched against the layout it was built with.

use serde::{Deserialize, Serialize};
use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, layout_hash};

/// Versioned URL feature vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [u64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from raw values with current version
    pub fn from_values(values: [u64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Comma-joined decimal text, the `text/csv` body sent to the endpoint
    pub fn to_csv(&self) -> String {
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::HashMap<_, _>>(),
        })
    }
}

// Lookup helpers used by tests to address values by layout name
#[cfg(test)]
impl FeatureVector {
    pub fn as_array(&self) -> &[u64; FEATURE_COUNT] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<u64> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<u64> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_carries_layout() {
        let vector = FeatureVector::from_values([1, 2, 3, 4, 5, 6]);
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
    }

    #[test]
    fn test_get_by_name() {
        let vector = FeatureVector::from_values([24, 2, 0, 0, 0, 1]);
        assert_eq!(vector.get_by_name("url_length"), Some(24));
        assert_eq!(vector.get_by_name("has_login"), Some(1));
        assert_eq!(vector.get_by_name("nonexistent"), None);
        assert_eq!(vector.get(FEATURE_COUNT), None);
    }

    #[test]
    fn test_to_csv() {
        let vector = FeatureVector::from_values([20, 1, 1, 1, 0, 1]);
        assert_eq!(vector.to_csv(), "20,1,1,1,0,1");

        let zeros = FeatureVector::from_values([0; FEATURE_COUNT]);
        assert_eq!(zeros.to_csv(), "0,0,0,0,0,0");
    }

    #[test]
    fn test_to_log_entry() {
        let vector = FeatureVector::from_values([24, 2, 0, 0, 0, 1]);
        let log = vector.to_log_entry();
        assert_eq!(log["feature_version"], FEATURE_VERSION);
        assert_eq!(log["named_values"]["dot_count"], 2);
        assert!(log["layout_hash"].as_u64().is_some());
    }
}
