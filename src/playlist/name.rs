//! Channel-name normalization and deduplication
//!
//! Portal channel names carry embedded routing tags (`^tag|1234`),
//! control characters, and decorative placeholder rows. Normalization
//! cleans the text; the dedup filter then rejects empty, placeholder,
//! and repeated names over one generation pass.

use regex::Regex;
use std::collections::HashSet;

/// Pure text transform for channel display names
pub struct NameNormalizer {
    /// Caret-prefixed routing hints, e.g. `^intl|007`
    routing_tag: Regex,
    /// Control ranges 0x00-0x1F and 0x7F-0x9F
    control: Regex,
    whitespace: Regex,
}

impl NameNormalizer {
    pub fn new() -> Self {
        Self {
            routing_tag: Regex::new(r"\^[a-zA-Z|\d]+").expect("valid routing tag pattern"),
            control: Regex::new(r"[\x00-\x1F\x7F-\u{9F}]").expect("valid control char pattern"),
            whitespace: Regex::new(r"\s+").expect("valid whitespace pattern"),
        }
    }

    /// Clean `raw` when `enabled`; identity otherwise.
    ///
    /// Callers still apply placeholder and duplicate filtering on the
    /// returned name regardless of the flag.
    pub fn normalize(&self, raw: &str, enabled: bool) -> String {
        if !enabled {
            return raw.to_string();
        }
        let name = self.routing_tag.replace_all(raw, "");
        let name = self.control.replace_all(&name, "");
        let name = self.whitespace.replace_all(&name, " ");
        name.trim().to_string()
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-pass filter rejecting placeholder and repeated names
pub struct DedupFilter {
    /// Rows of `#`, a lone `-`, or rows of `=` are visual separators
    placeholder: Regex,
    seen: HashSet<String>,
}

impl DedupFilter {
    pub fn new() -> Self {
        Self {
            placeholder: Regex::new(r"^#+$|^-$|^=+$").expect("valid placeholder pattern"),
            seen: HashSet::new(),
        }
    }

    /// True if `name` is a decorative separator rather than a channel name
    pub fn is_placeholder_only(&self, name: &str) -> bool {
        self.placeholder.is_match(name)
    }

    /// Accept `name` and mark it seen, or reject it.
    ///
    /// Rejects empty names, placeholder shapes, and case-sensitive
    /// repeats of an earlier accepted name.
    pub fn accept(&mut self, name: &str) -> bool {
        if name.is_empty() || self.is_placeholder_only(name) {
            return false;
        }
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        true
    }
}

impl Default for DedupFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_disabled_is_identity() {
        let normalizer = NameNormalizer::new();
        let raw = "  ^tag|123  Weird\u{0007}Name  ";
        assert_eq!(normalizer.normalize(raw, false), raw);
    }

    #[test]
    fn test_normalize_strips_routing_tags() {
        let normalizer = NameNormalizer::new();
        assert_eq!(normalizer.normalize("^intl|007 Sports", true), "Sports");
        assert_eq!(normalizer.normalize("^de HD Kanal", true), "HD Kanal");
    }

    #[test]
    fn test_normalize_strips_control_chars() {
        let normalizer = NameNormalizer::new();
        assert_eq!(normalizer.normalize("News\u{0000}\u{001F} 24", true), "News 24");
        assert_eq!(normalizer.normalize("A\u{007F}B\u{009F}C", true), "ABC");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        let normalizer = NameNormalizer::new();
        assert_eq!(normalizer.normalize("  Some \t  Channel  ", true), "Some Channel");
    }

    #[test]
    fn test_normalize_empty() {
        let normalizer = NameNormalizer::new();
        assert_eq!(normalizer.normalize("", true), "");
    }

    #[test]
    fn test_placeholders_rejected() {
        let mut filter = DedupFilter::new();
        assert!(!filter.accept("#"));
        assert!(!filter.accept("####"));
        assert!(!filter.accept("-"));
        assert!(!filter.accept("="));
        assert!(!filter.accept("===="));
        assert!(!filter.accept(""));
    }

    #[test]
    fn test_placeholder_with_text_accepted() {
        let mut filter = DedupFilter::new();
        assert!(filter.accept("#1 Sports"));
        assert!(filter.accept("--"));
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut filter = DedupFilter::new();
        assert!(filter.accept("CNN"));
        assert!(!filter.accept("CNN"));
        assert!(filter.accept("cnn"));
    }

    #[test]
    fn test_name_cleaning_to_empty_is_rejected() {
        let normalizer = NameNormalizer::new();
        let mut filter = DedupFilter::new();
        let name = normalizer.normalize("\u{0001}\u{0002}", true);
        assert!(!filter.accept(&name));
    }
}
