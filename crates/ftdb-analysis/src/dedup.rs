//! Stable, keyed deduplication for collected items.

use std::collections::HashSet;
use std::hash::Hash;

/// Keep the first occurrence per key, preserving relative order.
///
/// O(n) with a seen-key set. Applying it twice is a no-op. The two keys used
/// in practice are exact titles and URLs; any hashable key works.
pub fn dedup_by_key<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_occurrence_in_order() {
        let items = vec!["a", "b", "a", "c", "b"];
        assert_eq!(dedup_by_key(items, |s| s.to_string()), ["a", "b", "c"]);
    }

    #[test]
    fn distinct_keys_pass_through() {
        let items = vec![1, 2, 3];
        assert_eq!(dedup_by_key(items, |&n| n), [1, 2, 3]);
    }

    #[test]
    fn output_never_longer_than_input() {
        let items: Vec<u32> = (0..100).map(|n| n % 7).collect();
        let deduped = dedup_by_key(items.clone(), |&n| n);
        assert!(deduped.len() <= items.len());
        assert_eq!(deduped.len(), 7);
    }

    #[test]
    fn second_pass_is_a_noop() {
        let items = vec![("t1", "u1"), ("t2", "u1"), ("t1", "u2")];
        let once = dedup_by_key(items, |&(_, url)| url);
        let twice = dedup_by_key(once.clone(), |&(_, url)| url);
        assert_eq!(once, twice);
    }

    #[test]
    fn url_and_title_variants() {
        let articles = vec![
            ("Look do dia", "https://a.example/1"),
            ("Look do dia", "https://a.example/2"),
            ("Moda verão", "https://a.example/1"),
        ];
        let by_title = dedup_by_key(articles.clone(), |&(title, _)| title);
        assert_eq!(by_title.len(), 2);
        let by_url = dedup_by_key(articles, |&(_, url)| url);
        assert_eq!(by_url.len(), 2);
    }

    #[test]
    fn empty_input_stays_empty() {
        let items: Vec<&str> = Vec::new();
        assert!(dedup_by_key(items, |s| s.to_string()).is_empty());
    }
}
