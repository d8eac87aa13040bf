// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Splits serialized rows into batches that respect the per-request byte
//! ceiling. Batches are contiguous slices of the input, so row order and
//! the partition invariant (every row in exactly one batch) hold by
//! construction.

use crate::config::BatchPolicy;

/// Splits `rows` (each already serialized to its JSON text) into batches
/// per `policy`. A ceiling of 0 is clamped to 1.
///
/// Empty input yields zero batches.
pub fn split_rows<S: AsRef<str>>(rows: &[S], max_bytes: usize, policy: BatchPolicy) -> Vec<&[S]> {
    let max_bytes = max_bytes.max(1);
    match policy {
        BatchPolicy::Greedy => split_greedy(rows, max_bytes),
        BatchPolicy::EvenChunks => split_even_chunks(rows, max_bytes),
    }
}

/// Accumulate rows until the running size would pass the ceiling. A row
/// larger than the ceiling still lands in a batch of its own rather than
/// being dropped.
fn split_greedy<S: AsRef<str>>(rows: &[S], max_bytes: usize) -> Vec<&[S]> {
    let mut batches = Vec::new();
    let mut start = 0;
    let mut batch_size = 0;

    for (i, row) in rows.iter().enumerate() {
        let row_size = row.as_ref().len();
        if batch_size + row_size > max_bytes && i > start {
            batches.push(&rows[start..i]);
            start = i;
            batch_size = 0;
        }
        batch_size += row_size;
    }

    if start < rows.len() {
        batches.push(&rows[start..]);
    }

    batches
}

/// Estimate the size of the whole serialized array, derive a target batch
/// count, and slice the rows into contiguous chunks of equal row count.
/// Cheap, but a chunk can exceed the ceiling when row sizes are uneven.
fn split_even_chunks<S: AsRef<str>>(rows: &[S], max_bytes: usize) -> Vec<&[S]> {
    if rows.is_empty() {
        return Vec::new();
    }

    // Array brackets plus one comma between consecutive rows
    let total_size: usize =
        rows.iter().map(|r| r.as_ref().len()).sum::<usize>() + rows.len().saturating_sub(1) + 2;
    let n_batches = total_size.div_ceil(max_bytes).max(1);
    let rows_per_batch = (rows.len() / n_batches).max(1);

    rows.chunks(rows_per_batch).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ROW: &str = r#"{"col":"data"}"#; // 14 bytes

    #[test]
    fn test_even_chunks_splits_three_rows_at_tight_ceiling() {
        let rows = vec![ROW, ROW, ROW];
        let batches = split_rows(&rows, 33, BatchPolicy::EvenChunks);
        assert_eq!(batches, vec![&rows[0..1], &rows[1..2], &rows[2..3]]);
    }

    #[test]
    fn test_even_chunks_zero_ceiling_single_row() {
        let rows = vec![ROW];
        let batches = split_rows(&rows, 0, BatchPolicy::EvenChunks);
        assert_eq!(batches, vec![&rows[..]]);
    }

    #[test]
    fn test_even_chunks_large_ceiling_single_row() {
        let rows = vec![ROW];
        let batches = split_rows(&rows, 3000, BatchPolicy::EvenChunks);
        assert_eq!(batches, vec![&rows[..]]);
    }

    #[test]
    fn test_greedy_splits_on_overflow() {
        // Two 14-byte rows fit under 33, the third starts a new batch
        let rows = vec![ROW, ROW, ROW];
        let batches = split_rows(&rows, 33, BatchPolicy::Greedy);
        assert_eq!(batches, vec![&rows[0..2], &rows[2..3]]);
    }

    #[test]
    fn test_greedy_oversized_row_gets_own_batch() {
        let big = "x".repeat(100);
        let rows = vec![ROW.to_string(), big, ROW.to_string()];
        let batches = split_rows(&rows, 33, BatchPolicy::Greedy);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[1].len(), 1);
        assert_eq!(batches[1][0].len(), 100);
    }

    #[test]
    fn test_greedy_zero_ceiling_single_row() {
        let rows = vec![ROW];
        let batches = split_rows(&rows, 0, BatchPolicy::Greedy);
        assert_eq!(batches, vec![&rows[..]]);
    }

    #[test]
    fn test_greedy_large_ceiling_keeps_one_batch() {
        let rows = vec![ROW, ROW, ROW];
        let batches = split_rows(&rows, 3000, BatchPolicy::Greedy);
        assert_eq!(batches, vec![&rows[..]]);
    }

    #[test]
    fn test_empty_input_yields_no_batches() {
        let rows: Vec<&str> = Vec::new();
        assert!(split_rows(&rows, 33, BatchPolicy::Greedy).is_empty());
        assert!(split_rows(&rows, 33, BatchPolicy::EvenChunks).is_empty());
    }

    #[test]
    fn test_greedy_never_exceeds_ceiling_except_singletons() {
        let rows: Vec<String> = (0..50).map(|i| "y".repeat(1 + i % 20)).collect();
        for batch in split_rows(&rows, 25, BatchPolicy::Greedy) {
            let size: usize = batch.iter().map(String::len).sum();
            assert!(size <= 25 || batch.len() == 1);
        }
    }

    proptest! {
        #[test]
        fn prop_batches_partition_input_in_order(
            rows in proptest::collection::vec("[a-z]{0,40}", 0..100),
            max_bytes in 0usize..200,
        ) {
            for policy in [BatchPolicy::Greedy, BatchPolicy::EvenChunks] {
                let batches = split_rows(&rows, max_bytes, policy);
                let rejoined: Vec<String> = batches.concat();
                prop_assert_eq!(&rejoined, &rows);
                if rows.is_empty() {
                    prop_assert!(batches.is_empty());
                }
            }
        }
    }
}
