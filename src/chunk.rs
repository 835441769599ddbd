use std::slice::Chunks;

use crate::error::SeqFetchError;

/// Splits `items` into contiguous batches of `size`, the last one holding the
/// remainder. The returned iterator is lazy; call again to restart.
pub fn chunk<T>(items: &[T], size: usize) -> Result<Chunks<'_, T>, SeqFetchError> {
    if size == 0 {
        return Err(SeqFetchError::InvalidBatchSize);
    }
    Ok(items.chunks(size))
}

/// Number of batches `chunk` yields for `len` items.
pub fn batch_count(len: usize, size: usize) -> usize {
    if size == 0 { 0 } else { len.div_ceil(size) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_goes_last() {
        let items = [1, 2, 3, 4, 5];
        let batches = chunk(&items, 2).unwrap().collect::<Vec<_>>();
        assert_eq!(batches, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
    }

    #[test]
    fn batch_count_matches_chunks() {
        for len in 0..12 {
            let items = (0..len).collect::<Vec<_>>();
            for size in 1..5 {
                assert_eq!(chunk(&items, size).unwrap().count(), batch_count(len, size));
            }
        }
    }
}
