use serde::Deserialize;

use super::deserializers::{deserialize_page, first_page};

pub const QUESTIONS_PER_PAGE: usize = 10;
pub const FIRST_PAGE: u64 = 1;

/// `?page=N` query, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    pub page: u64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: FIRST_PAGE }
    }
}

/// Returns the `page`-th slice of `QUESTIONS_PER_PAGE` items.
///
/// Page 0 and pages past the end are empty rather than an error, callers decide
/// whether an empty page means "not found".
pub fn paginate<T>(items: &[T], page: u64) -> &[T] {
    let Some(index) = page.checked_sub(1) else {
        return &[];
    };
    let start = usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_mul(QUESTIONS_PER_PAGE));
    match start {
        Some(start) if start < items.len() => {
            let end = (start + QUESTIONS_PER_PAGE).min(items.len());
            &items[start..end]
        }
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_is_first_ten() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(&items, 1), &items[0..10]);
        assert_eq!(paginate(&items, 2), &items[10..20]);
        assert_eq!(paginate(&items, 3), &items[20..25]);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<u32> = (0..25).collect();
        assert!(paginate(&items, 0).is_empty());
        assert!(paginate(&items, 4).is_empty());
        assert!(paginate(&items, u64::MAX).is_empty());
        assert!(paginate::<u32>(&[], 1).is_empty());
    }

    #[test]
    fn pages_reconstruct_the_list() {
        for len in [0usize, 1, 9, 10, 11, 20, 37, 100] {
            let items: Vec<usize> = (0..len).collect();
            let mut joined = Vec::new();
            let mut page = 1;
            loop {
                let slice = paginate(&items, page);
                if slice.is_empty() {
                    break;
                }
                assert!(slice.len() <= QUESTIONS_PER_PAGE);
                joined.extend_from_slice(slice);
                page += 1;
            }
            assert_eq!(joined, items);
        }
    }

    #[test]
    fn missing_page_defaults_to_first() {
        assert_eq!(PageQuery::default().page, FIRST_PAGE);
    }
}
