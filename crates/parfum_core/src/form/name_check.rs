//! Blank/duplicate name check shared by every entity form.

/// Returns whether `candidate` may be submitted as a sibling name.
///
/// # Contract
/// - Blank (empty or whitespace-only) names are rejected.
/// - Exact, case-sensitive matches in `existing` are rejected unless
///   `candidate == exemption` (the entity's own current name when editing).
pub fn is_submittable<S: AsRef<str>>(
    candidate: &str,
    existing: &[S],
    exemption: Option<&str>,
) -> bool {
    if candidate.trim().is_empty() {
        return false;
    }
    if exemption == Some(candidate) {
        return true;
    }
    !existing.iter().any(|name| name.as_ref() == candidate)
}

#[cfg(test)]
mod tests {
    use super::is_submittable;

    const EXISTING: [&str; 2] = ["Orange", "Fennel"];

    #[test]
    fn blank_names_are_rejected() {
        assert!(!is_submittable("", &EXISTING, None));
        assert!(!is_submittable("   \t\n", &EXISTING, None));
        assert!(!is_submittable(" ", &EXISTING, Some(" ")));
    }

    #[test]
    fn duplicates_are_rejected_unless_exempt() {
        assert!(!is_submittable("Orange", &EXISTING, None));
        assert!(is_submittable("Orange", &EXISTING, Some("Orange")));
        assert!(!is_submittable("Fennel", &EXISTING, Some("Orange")));
    }

    #[test]
    fn comparison_is_exact_and_case_sensitive() {
        assert!(is_submittable("orange", &EXISTING, None));
        assert!(is_submittable("Orange ", &EXISTING, None));
        assert!(is_submittable("Nutmeg", &EXISTING, None));
    }

    #[test]
    fn empty_sibling_set_accepts_any_non_blank_name() {
        let existing: [String; 0] = [];
        assert!(is_submittable("Dish Soap", &existing, None));
    }
}
