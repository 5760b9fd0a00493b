//! Tag set algebra over ordered tag lists
//!
//! Tags travel as ordered `Vec<String>`; these helpers give them set
//! semantics (no duplicates) while keeping first-seen order.

use std::collections::HashSet;

/// Remove duplicates, keeping the first occurrence of each tag.
pub fn dedup_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for tag in tags {
        let tag = tag.as_ref();
        if seen.insert(tag.to_string()) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Vocabulary tags that are not yet applied to the rule, in vocabulary order.
///
/// `vocabulary \ custom \ system`, duplicates removed.
pub fn assignable_tags(vocabulary: &[String], custom: &[String], system: &[String]) -> Vec<String> {
    let applied: HashSet<&str> = custom
        .iter()
        .chain(system.iter())
        .map(String::as_str)
        .collect();

    dedup_tags(
        vocabulary
            .iter()
            .filter(|tag| !applied.contains(tag.as_str())),
    )
}

/// System tags first, then custom tags, duplicates removed.
pub fn union_tags(system: &[String], custom: &[String]) -> Vec<String> {
    dedup_tags(system.iter().chain(custom.iter()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_assignable_tags_scenario() {
        let vocabulary = tags(&["security", "bug", "perf"]);
        let custom = tags(&["bug"]);
        let system = tags(&["legacy"]);

        assert_eq!(
            assignable_tags(&vocabulary, &custom, &system),
            tags(&["security", "perf"])
        );
    }

    #[test]
    fn test_assignable_tags_removes_system_and_duplicates() {
        let vocabulary = tags(&["perf", "cwe", "perf", "legacy", "bug", "cwe"]);
        let custom = tags(&["bug"]);
        let system = tags(&["legacy"]);

        let result = assignable_tags(&vocabulary, &custom, &system);
        assert_eq!(result, tags(&["perf", "cwe"]));
        for tag in &result {
            assert!(vocabulary.contains(tag));
            assert!(!custom.contains(tag));
            assert!(!system.contains(tag));
        }
    }

    #[test]
    fn test_assignable_tags_empty_inputs() {
        assert!(assignable_tags(&[], &tags(&["a"]), &tags(&["b"])).is_empty());
        assert_eq!(assignable_tags(&tags(&["a", "b"]), &[], &[]), tags(&["a", "b"]));
    }

    #[test]
    fn test_assignable_tags_everything_applied() {
        let vocabulary = tags(&["a", "b"]);
        assert!(assignable_tags(&vocabulary, &tags(&["a"]), &tags(&["b"])).is_empty());
    }

    #[test]
    fn test_union_tags_system_first() {
        let system = tags(&["cwe", "owasp"]);
        let custom = tags(&["bug", "cwe", "perf"]);
        assert_eq!(
            union_tags(&system, &custom),
            tags(&["cwe", "owasp", "bug", "perf"])
        );
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        assert_eq!(dedup_tags(["b", "a", "b", "c", "a"]), tags(&["b", "a", "c"]));
    }
}
