//! Output comparison for conformance rounds.

/// Compares two output texts, ignoring leading and trailing whitespace
/// on each side. Interior whitespace is significant, so a tab is never
/// equal to a space and an extra interior blank makes the texts differ.
pub fn output_matches(expected: &str, actual: &str) -> bool {
    expected.trim() == actual.trim()
}

/// Renders a per-character, colon-separated hexadecimal dump of the
/// given text, making invisible-character discrepancies diagnosable.
pub fn hex_dump(text: &str) -> String {
    let dumped: Vec<String> = text.chars().map(|c| format!("{:02x}", c as u32)).collect();
    dumped.join(":")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trailing_whitespace_is_insignificant() {
        assert!(output_matches("HELLO\n", "HELLO"));
        assert!(output_matches("HELLO", "HELLO\n\n"));
        assert!(output_matches("  A\nB  \n", "A\nB"));
    }

    #[test]
    fn interior_whitespace_is_significant() {
        assert!(!output_matches("A\nB\n", "A\n B\n"));
        assert!(!output_matches("A B", "A  B"));
    }

    #[test]
    fn tab_differs_from_space() {
        assert!(!output_matches("A\tB", "A B"));
    }

    #[test]
    fn interior_character_difference_detected() {
        assert!(!output_matches("HELLO", "HELL0"));
    }

    #[test]
    fn hex_dump_matches_expected_layout() {
        assert_eq!(hex_dump("HELLO\n"), "48:45:4c:4c:4f:0a");
        assert_eq!(hex_dump(""), "");
        assert_eq!(hex_dump("\t "), "09:20");
    }
}
