//! Registry of recognized bag-info labels
//!
//! Template lines are only treated as new metadata entries when their label
//! appears here. Anything else is folded into the entry above it, which is
//! what lets long descriptions span multiple template lines.

/// Labels a metadata template may introduce entries under
pub const RECOGNIZED_LABELS: &[&str] = &[
    "Source-Organization",
    "Organization-Address",
    "Contact-Name",
    "Contact-Phone",
    "Contact-Email",
    "External-Description",
    "External-Identifier",
    "Internal-Sender-Description",
    "Internal-Sender-Identifier",
    "Rights-Statement",
    "Bag-Group-Identifier",
    "Bag-Size",
];

/// Label that carries the generated identifier for each bag
pub const EXTERNAL_IDENTIFIER: &str = "External-Identifier";

/// Label that carries the rendered payload size
pub const BAG_SIZE: &str = "Bag-Size";

/// Check whether a label may introduce a new metadata entry
///
/// Matching is exact: case and internal whitespace are significant, so
/// `source-organization` or `Contact- Name` are not recognized.
pub fn is_recognized(label: &str) -> bool {
    RECOGNIZED_LABELS.contains(&label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_labels() {
        assert!(is_recognized("Source-Organization"));
        assert!(is_recognized("External-Identifier"));
        assert!(is_recognized("Bag-Size"));
    }

    #[test]
    fn test_unrecognized_labels() {
        assert!(!is_recognized("Payload-Oxum"));
        assert!(!is_recognized("Notes"));
        assert!(!is_recognized(""));
    }

    #[test]
    fn test_matching_is_exact() {
        assert!(!is_recognized("source-organization"));
        assert!(!is_recognized("CONTACT-NAME"));
        assert!(!is_recognized(" Contact-Name"));
        assert!(!is_recognized("Contact-Name "));
    }
}
