//! Pattern matching primitive. Case-insensitive substring containment over a
//! set of signature patterns; no regex, no structural parsing of IDs.

/// Check if text contains any pattern from the list, ignoring case.
///
/// Empty text never matches, and neither does an empty pattern list or an
/// empty pattern string. Patterns are plain substrings: `VID_1A2C&PID_2124`
/// only hits when that exact sequence appears in the text.
pub fn contains_pattern<P: AsRef<str>>(text: &str, patterns: &[P]) -> bool {
    if text.is_empty() {
        return false;
    }

    let upper_text = text.to_uppercase();
    patterns.iter().any(|pattern| {
        let pattern = pattern.as_ref();
        !pattern.is_empty() && upper_text.contains(&pattern.to_uppercase())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_containment() {
        assert_eq!(
            contains_pattern("vid_1a2c&pid_2124", &["VID_1A2C&PID_2124"]),
            true
        );
        assert_eq!(
            contains_pattern("USB\\VID_1A2C&PID_2124&REV_0110", &["vid_1a2c&pid_2124"]),
            true
        );
        assert_eq!(contains_pattern("KmBox Net Controller", &["KMBOX"]), true);
    }

    #[test]
    fn test_substring_not_exact_match() {
        // Pattern anywhere inside the text counts
        assert_eq!(
            contains_pattern("Prefix STM32 Bootloader", &["STM32"]),
            true
        );
        // The whole pattern has to appear verbatim
        assert_eq!(contains_pattern("VID_1A2C", &["VID_1A2C&PID_2124"]), false);
    }

    #[test]
    fn test_empty_text_never_matches() {
        assert_eq!(contains_pattern("", &["KMBOX"]), false);
    }

    #[test]
    fn test_empty_patterns_never_match() {
        let none: &[&str] = &[];
        assert_eq!(contains_pattern("KMBOX", none), false);
        // An empty pattern string is not a wildcard
        assert_eq!(contains_pattern("KMBOX", &[""]), false);
    }

    #[test]
    fn test_no_hidden_state() {
        // Same inputs, same answer, every time
        let text = "PCI\\VEN_8086&DEV_1234";
        let patterns = ["FPGA", "VEN_8086"];
        let first = contains_pattern(text, &patterns);
        let second = contains_pattern(text, &patterns);
        assert_eq!(first, second);
        assert_eq!(first, true);
    }
}
