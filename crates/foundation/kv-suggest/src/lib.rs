//! "Did you mean" suggestions for unknown names
//!
//! Shared by name resolution and lowering, which report unbound names against
//! different sets of candidates.

/// Largest edit distance still offered as a suggestion
pub const MAX_DISTANCE: usize = 3;

/// Most suggestions offered for one name
pub const MAX_SUGGESTIONS: usize = 3;

/// Picks up to three candidates within edit distance 3 of `target`, closest first
pub fn suggest<'name>(
    target: &str,
    candidates: impl IntoIterator<Item = &'name str>,
) -> Vec<String> {
    let mut scored: Vec<(&str, usize)> = candidates
        .into_iter()
        .filter(|candidate| *candidate != target)
        .map(|candidate| (candidate, levenshtein_distance(target, candidate)))
        .filter(|(_, distance)| *distance <= MAX_DISTANCE)
        .collect();

    scored.sort_by(|left, right| left.1.cmp(&right.1).then_with(|| left.0.cmp(right.0)));
    scored.dedup_by(|left, right| left.0 == right.0);
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Renders suggestions as a `; did you mean ...?` suffix, or nothing
pub fn did_you_mean(suggestions: &[String]) -> String {
    match suggestions {
        [] => String::new(),
        [only] => format!("; did you mean `{only}`?"),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(|name| format!("`{name}`")).collect();
            format!("; did you mean {} or `{last}`?", init.join(", "))
        }
    }
}

/// Compute Levenshtein distance between two strings
fn levenshtein_distance(source: &str, target: &str) -> usize {
    let target: Vec<char> = target.chars().collect();
    let mut previous: Vec<usize> = (0..=target.len()).collect();
    let mut current = vec![0; target.len() + 1];

    for (idx, source_char) in source.chars().enumerate() {
        current[0] = idx + 1;
        for (jdx, target_char) in target.iter().enumerate() {
            let cost = usize::from(source_char != *target_char);
            current[jdx + 1] = (previous[jdx + 1] + 1)
                .min(current[jdx] + 1)
                .min(previous[jdx] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[target.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", "def"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
        assert_eq!(levenshtein_distance("", "four"), 4);
    }

    #[test]
    fn test_suggest_orders_by_distance() {
        let names = ["counter", "count", "amount", "x"];
        assert_eq!(suggest("coutn", names), vec!["count", "counter"]);
    }

    #[test]
    fn test_suggest_skips_distant_names() {
        assert!(suggest("alpha", ["zzzzzzzz", "q"]).is_empty());
    }

    #[test]
    fn test_suggest_caps_and_dedups() {
        let names = ["ab", "ac", "ad", "ae", "ab"];
        assert_eq!(suggest("aa", names), vec!["ab", "ac", "ad"]);
    }

    #[test]
    fn test_did_you_mean() {
        assert_eq!(did_you_mean(&[]), "");
        assert_eq!(did_you_mean(&["x".to_string()]), "; did you mean `x`?");
        let many = ["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(did_you_mean(&many), "; did you mean `a`, `b` or `c`?");
    }
}
