//! The `Seed` primitive: slide forward through a probe read looking for a
//! k-mer with at least one reference occurrence.

use crate::fingerprint::{fingerprint, SENTINEL};
use crate::index::SeedIndex;

/// A `(bucket_index, cursor)` pair, kept `Copy` so callers can freely stash
/// it without fighting the borrow checker across the nested anchor/mate
/// search loops. `cursor` is the probe-read position the hit was found at,
/// needed to compute the putative reference start and to resume the search
/// past this hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedHit {
    pub bucket_index: usize,
    pub cursor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Hit(SeedHit),
    Exhausted,
}

/// Slides forward from `start_cursor` in steps of `step`, returning the
/// first position with a non-sentinel fingerprint that has an index entry.
///
/// `EXHAUSTED` once `cursor` would exceed `len − k`. The caller must advance
/// past a returned hit's cursor by at least `step` before calling again.
/// `seed` itself never re-visits a position, so strict progress is
/// guaranteed as long as callers honor that contract.
pub fn seed(index: &SeedIndex, read: &[u8], start_cursor: usize, step: usize) -> SeedOutcome {
    let k = index.k();
    let len = read.len();
    if k > len {
        return SeedOutcome::Exhausted;
    }
    let last = len - k;
    let step = step.max(1);
    let mut cursor = start_cursor;
    loop {
        if cursor > last {
            return SeedOutcome::Exhausted;
        }
        let fp = fingerprint(&read[cursor..cursor + k]);
        if fp != SENTINEL {
            if let Some(bucket_index) = index.bucket_index_for(fp) {
                return SeedOutcome::Hit(SeedHit { bucket_index, cursor });
            }
        }
        cursor += step;
    }
}

/// Computes the putative reference alignment start implied by a seed hit at
/// probe-read position `cursor` matching reference offset `ref_offset`.
/// Rejects negative starts and starts that would run the probe past the end
/// of the reference sequence.
pub fn anchor_start(ref_offset: usize, cursor: usize, ref_len: usize, probe_len: usize) -> Option<usize> {
    if cursor > ref_offset {
        return None;
    }
    let start = ref_offset - cursor;
    if start + probe_len > ref_len {
        return None;
    }
    Some(start)
}
