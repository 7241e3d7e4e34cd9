//! Features Module - URL feature extraction
//!
//! Turns a raw URL into the fixed-order vector the scoring model expects.

pub mod layout;
pub mod url;
pub mod vector;

// Re-export common types
pub use layout::LayoutInfo;
pub use url::extract;
