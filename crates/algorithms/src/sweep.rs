//! Window sweeps over the rows of a tile grid.
//!
//! Rows run on rayon when the `parallel` feature is enabled and sequentially
//! otherwise. Either way the rows are concatenated in index order, so the
//! output does not depend on scheduling.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluate `row(i)` for every `i in 0..count` and concatenate the results
/// in index order.
pub(crate) fn concat_rows<T, F>(count: usize, row: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> Vec<T> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        (0..count).into_par_iter().flat_map_iter(row).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..count).flat_map(row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_keep_index_order() {
        let out = concat_rows(100, |i| vec![i * 2, i * 2 + 1]);
        assert_eq!(out, (0..200).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_sweep() {
        let out: Vec<u32> = concat_rows(0, |_| vec![1]);
        assert!(out.is_empty());
    }
}
