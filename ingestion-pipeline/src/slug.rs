//! Deterministic slug-collision resolution within one ingestion batch.

use std::collections::HashMap;

/// Counts occurrences of each base slug within a single batch. The first
/// occurrence keeps the base slug; the Nth gets a `-N` suffix. Counting is
/// batch-local and strictly input-ordered, so output is reproducible for a
/// fixed input ordering but sensitive to reordering.
#[derive(Debug, Default)]
pub struct SlugAllocator {
    counts: HashMap<String, usize>,
}

impl SlugAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, base_slug: &str) -> String {
        let count = self.counts.entry(base_slug.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base_slug.to_string()
        } else {
            format!("{base_slug}-{count}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_keeps_base_slug() {
        let mut allocator = SlugAllocator::new();
        assert_eq!(allocator.allocate("sample-item"), "sample-item");
    }

    #[test]
    fn duplicates_are_numbered_in_input_order() {
        let mut allocator = SlugAllocator::new();
        assert_eq!(allocator.allocate("sample-item"), "sample-item");
        assert_eq!(allocator.allocate("sample-item"), "sample-item-2");
        assert_eq!(allocator.allocate("sample-item"), "sample-item-3");
    }

    #[test]
    fn distinct_bases_count_independently() {
        let mut allocator = SlugAllocator::new();
        assert_eq!(allocator.allocate("alpha"), "alpha");
        assert_eq!(allocator.allocate("beta"), "beta");
        assert_eq!(allocator.allocate("alpha"), "alpha-2");
        assert_eq!(allocator.allocate("beta"), "beta-2");
    }

    #[test]
    fn counting_is_processing_order_not_alphabetical() {
        let mut allocator = SlugAllocator::new();
        // A third duplicate appended after unrelated slugs still gets -3
        allocator.allocate("zulu");
        allocator.allocate("zulu");
        allocator.allocate("alpha");
        assert_eq!(allocator.allocate("zulu"), "zulu-3");
    }

    #[test]
    fn batches_do_not_share_counts() {
        let mut first = SlugAllocator::new();
        first.allocate("sample-item");
        let mut second = SlugAllocator::new();
        assert_eq!(second.allocate("sample-item"), "sample-item");
    }
}
