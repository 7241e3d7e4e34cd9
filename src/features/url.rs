//! URL lexical features
//!
//! Plain, case-sensitive substring counts. No decoding, no lowercasing,
//! no URL parsing: the model was trained on the raw string.

use super::vector::FeatureVector;

/// Extract the six lexical features of `url`
///
/// Total over all strings; the empty string yields all zeros.
pub fn extract(url: &str) -> FeatureVector {
    FeatureVector::from_values([
        url.chars().count() as u64,
        count_char(url, '.'),
        count_char(url, '-'),
        count_char(url, '@'),
        flag(url.contains("https")),
        flag(url.contains("login")),
    ])
}

fn count_char(url: &str, needle: char) -> u64 {
    url.chars().filter(|&c| c == needle).count() as u64
}

fn flag(present: bool) -> u64 {
    u64::from(present)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::layout::FEATURE_COUNT;

    #[test]
    fn test_empty_url() {
        assert_eq!(extract("").values, [0; FEATURE_COUNT]);
    }

    #[test]
    fn test_mixed_url() {
        // 20 characters, one '.', "http" but no "https"
        let vector = extract("http://a.b-c@d/login");
        assert_eq!(vector.values, [20, 1, 1, 1, 0, 1]);
    }

    #[test]
    fn test_https_and_repeats() {
        let vector = extract("https://secure-login.pay-pal.example.com/@@");
        assert_eq!(vector.get_by_name("url_length"), Some(43));
        assert_eq!(vector.get_by_name("dot_count"), Some(3));
        assert_eq!(vector.get_by_name("hyphen_count"), Some(2));
        assert_eq!(vector.get_by_name("at_count"), Some(2));
        assert_eq!(vector.get_by_name("has_https"), Some(1));
        assert_eq!(vector.get_by_name("has_login"), Some(1));
    }

    #[test]
    fn test_case_sensitive() {
        let vector = extract("HTTPS://LOGIN.example");
        assert_eq!(vector.get_by_name("has_https"), Some(0));
        assert_eq!(vector.get_by_name("has_login"), Some(0));
    }

    #[test]
    fn test_length_counts_characters() {
        // 'é' is two bytes in UTF-8
        assert_eq!(extract("café").get_by_name("url_length"), Some(4));
    }

    #[test]
    fn test_no_decoding() {
        let vector = extract("http://x%2Ey%40z");
        assert_eq!(vector.get_by_name("dot_count"), Some(0));
        assert_eq!(vector.get_by_name("at_count"), Some(0));
    }

    #[test]
    fn test_always_six_values() {
        for url in ["", "a", "http://example.com/login", "...---@@@"] {
            assert_eq!(extract(url).as_array().len(), FEATURE_COUNT);
        }
    }
}
