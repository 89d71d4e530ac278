//! Text filtering for searchable lists.

/// Returns whether `query` matches `label` or any keyword, case-insensitively.
///
/// Whitespace-separated query terms must all match somewhere; an empty query matches
/// everything.
pub fn matches_query(label: &str, keywords: &[String], query: &str) -> bool {
    let label = label.to_lowercase();
    let keywords: Vec<String> = keywords.iter().map(|keyword| keyword.to_lowercase()).collect();
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .all(|term| label.contains(&term) || keywords.iter().any(|keyword| keyword.contains(&term)))
}

/// Indices of entries matching `query`, in input order, capped at `limit`.
pub fn filter_indices<'a, I>(entries: I, query: &str, limit: usize) -> Vec<usize>
where
    I: IntoIterator<Item = (&'a str, &'a [String])>,
{
    entries
        .into_iter()
        .enumerate()
        .filter(|(_, (label, keywords))| matches_query(label, keywords, query))
        .map(|(index, _)| index)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_query_matches_all_up_to_limit() {
        let none: Vec<String> = Vec::new();
        let entries = [("Open", none.as_slice()), ("Close", none.as_slice()), ("Save", none.as_slice())];
        assert_eq!(filter_indices(entries, "  ", 2), vec![0, 1]);
    }

    #[test]
    fn terms_match_labels_or_keywords_case_insensitively() {
        let theme = vec!["appearance".to_string(), "dark".to_string()];
        let none: Vec<String> = Vec::new();
        let entries = [
            ("Toggle Theme", theme.as_slice()),
            ("New File", none.as_slice()),
            ("Theme Settings", none.as_slice()),
        ];
        assert_eq!(filter_indices(entries, "THEME", 10), vec![0, 2]);
        assert_eq!(filter_indices(entries, "dark toggle", 10), vec![0]);
        assert_eq!(filter_indices(entries, "missing", 10), Vec::<usize>::new());
    }
}
