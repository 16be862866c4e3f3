//! # Listing Pages
//!
//! Client-side filtering and pagination of a fetched key set. None of the
//! supported list endpoints filter or page server-side, so the full key set
//! is fetched once and sliced here.

use serde::Serialize;

/// Pagination metadata reported with every page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: usize,
    /// Total number of pages, never less than 1
    pub last_page: usize,
    pub next_page: usize,
    pub prev_page: usize,
    /// Keys before filtering
    pub total: usize,
    /// Keys after filtering
    pub filtered_total: usize,
    pub page_size: usize,
}

/// One page of resource keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    pub keys: Vec<String>,
    pub meta: PageMeta,
    pub filter: Option<String>,
}

/// Keep keys containing `filter`, case-insensitively, in their original order
pub fn filter_keys<'a>(keys: &'a [String], filter: Option<&str>) -> Vec<&'a String> {
    match filter.filter(|f| !f.is_empty()) {
        Some(filter) => {
            let needle = filter.to_lowercase();
            keys.iter()
                .filter(|key| key.to_lowercase().contains(&needle))
                .collect()
        }
        None => keys.iter().collect(),
    }
}

/// Filter the key set and cut out the requested page
///
/// Out-of-range pages are clamped to the nearest existing page.
pub fn paginate(keys: &[String], filter: Option<&str>, page: usize, page_size: usize) -> ListingPage {
    let page_size = page_size.max(1);
    let filtered = filter_keys(keys, filter);
    let last_page = filtered.len().div_ceil(page_size).max(1);
    let current_page = page.clamp(1, last_page);
    let start = (current_page - 1) * page_size;

    let page_keys = filtered
        .iter()
        .skip(start)
        .take(page_size)
        .map(|key| (*key).clone())
        .collect();

    ListingPage {
        keys: page_keys,
        meta: PageMeta {
            current_page,
            last_page,
            next_page: (current_page + 1).min(last_page),
            prev_page: current_page.saturating_sub(1).max(1),
            total: keys.len(),
            filtered_total: filtered.len(),
            page_size,
        },
        filter: filter.filter(|f| !f.is_empty()).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("key-{i:02}")).collect()
    }

    #[test]
    fn test_second_page_slice_and_meta() {
        let page = paginate(&keys(32), None, 2, 15);
        assert_eq!(page.keys.first().map(String::as_str), Some("key-16"));
        assert_eq!(page.keys.len(), 15);
        assert_eq!(page.meta.current_page, 2);
        assert_eq!(page.meta.last_page, 3);
        assert_eq!(page.meta.next_page, 3);
        assert_eq!(page.meta.prev_page, 1);
        assert_eq!(page.meta.total, 32);
    }

    #[test]
    fn test_page_beyond_end_is_clamped() {
        let page = paginate(&keys(5), None, 9, 15);
        assert_eq!(page.meta.current_page, 1);
        assert_eq!(page.keys.len(), 5);
    }

    #[test]
    fn test_empty_key_set_still_has_one_page() {
        let page = paginate(&[], None, 1, 15);
        assert!(page.keys.is_empty());
        assert_eq!(page.meta.last_page, 1);
        assert_eq!(page.meta.next_page, 1);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let set = vec![
            "Alpha".to_string(),
            "beta/".to_string(),
            "ALPHABET".to_string(),
            "gamma".to_string(),
        ];
        let page = paginate(&set, Some("alpha"), 1, 15);
        assert_eq!(page.keys, vec!["Alpha".to_string(), "ALPHABET".to_string()]);
        assert_eq!(page.meta.filtered_total, 2);
        assert_eq!(page.meta.total, 4);
        assert_eq!(page.filter.as_deref(), Some("alpha"));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let page = paginate(&keys(3), Some(""), 1, 15);
        assert_eq!(page.keys.len(), 3);
        assert_eq!(page.filter, None);
    }
}
