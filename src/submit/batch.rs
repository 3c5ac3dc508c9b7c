// src/submit/batch.rs
// =============================================================================
// Splits a URL list into fixed-size batches.
//
// The batches are contiguous, keep the input order and never overlap, so
// gluing them back together gives the original list. Only the last batch
// can be shorter than `batch_size`.
// =============================================================================

use std::num::NonZeroUsize;

// `batch_size` is NonZeroUsize: a size of 0 can't be asked for
pub fn create_batches<T>(items: &[T], batch_size: NonZeroUsize) -> Vec<&[T]> {
    items.chunks(batch_size.get()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_batches_rebuild_input() {
        let urls: Vec<String> = (0..23).map(|i| format!("https://a.com/{i}")).collect();

        for n in 1..=30 {
            let batches = create_batches(&urls, size(n));
            assert!(batches.iter().all(|b| !b.is_empty() && b.len() <= n));
            assert_eq!(batches.concat(), urls);
        }
    }

    #[test]
    fn test_batch_sizes() {
        let urls = vec!["a", "b", "c", "d", "e"];
        let batches = create_batches(&urls, size(2));
        assert_eq!(batches, vec![&["a", "b"][..], &["c", "d"][..], &["e"][..]]);
    }

    #[test]
    fn test_empty_list_has_no_batches() {
        let urls: Vec<String> = Vec::new();
        assert!(create_batches(&urls, size(100)).is_empty());
    }
}
