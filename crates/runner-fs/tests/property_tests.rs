use proptest::prelude::*;
use runner_fs::is_deletion_line;

proptest! {
    #[test]
    fn test_marker_in_any_case_is_found(
        prefix in "[ -~]{0,40}",
        suffix in "[ -~]{0,40}",
        mask in prop::collection::vec(any::<bool>(), 8),
    ) {
        let marker: String = "deleting"
            .chars()
            .zip(mask)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect();
        let line = format!("{prefix}{marker}{suffix}");

        prop_assert!(is_deletion_line(line.as_bytes()));
    }

    #[test]
    fn test_lines_without_g_never_match(line in "[^gG]{0,80}") {
        // The marker ends in 'g', so no such line can contain it
        prop_assert!(!is_deletion_line(line.as_bytes()));
    }

    #[test]
    fn test_matches_lowercase_contains(line in "[ -~]{0,60}") {
        let expected = line.to_ascii_lowercase().contains("deleting");
        prop_assert_eq!(is_deletion_line(line.as_bytes()), expected);
    }
}
