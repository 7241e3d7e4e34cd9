//! Feature Layout - URL feature schema
//!
//! **The scoring model is trained against this exact order.**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! The deployed endpoint must be retrained whenever the version changes.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    "url_length",    // 0: Length of the URL in characters
    "dot_count",     // 1: Occurrences of '.'
    "hyphen_count",  // 2: Occurrences of '-'
    "at_count",      // 3: Occurrences of '@'
    "has_https",     // 4: 1 if "https" appears anywhere
    "has_login",     // 5: 1 if "login" appears anywhere
];

/// Total number of features
pub const FEATURE_COUNT: usize = 6;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 of the version and the ordered feature names
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout description served to clients and written to startup logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Get feature index by name
#[cfg(test)]
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 6);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_stable() {
        assert_eq!(layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("url_length"), Some(0));
        assert_eq!(feature_index("at_count"), Some(3));
        assert_eq!(feature_index("has_login"), Some(5));
        assert_eq!(feature_index("cpu_percent"), None);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.hash, layout_hash());
        assert_eq!(info.feature_names[4], "has_https");
    }
}
