//! Paired placement: same-sequence coerced, cross-sequence (`--disjoin`),
//! and best-of-N (`-e`) search, all built from one probe-walking core.

use crate::index::{Bucket, RefPos, SeedIndex};
use crate::reference::ReferenceDb;
use crate::revcomp::revcomp;
use crate::seed::{anchor_start, seed, SeedOutcome};
use crate::verify::verify;

use super::mode::{Direction, Mate, Mode, Probe, probes_for};

#[derive(Debug, Clone)]
pub struct PairHit {
    pub seq1: usize,
    pub start1: usize,
    pub end1: usize,
    pub strand1: char,
    pub seq2: usize,
    pub start2: usize,
    pub end2: usize,
    pub strand2: char,
    pub score: u8,
}

pub struct PairSearchCtx<'a> {
    pub index: &'a SeedIndex,
    pub refs: &'a ReferenceDb,
    pub max_mismatch_pct: u8,
    pub step: usize,
    pub ignore_n: bool,
}

/// Top-level paired search dispatch. `eval_n > 0` forces the same-sequence,
/// best-of-N path (disjoin is the caller's responsibility to have already
/// coerced off in that case, see `Config::new`).
pub fn search_paired(
    ctx: &PairSearchCtx,
    mode: Mode,
    r1: &[u8],
    r2: &[u8],
    disjoin: bool,
    eval_n: usize,
) -> Option<PairHit> {
    let probes = probes_for(mode);
    if eval_n > 0 {
        for probe in &probes {
            if let Some(hit) = search_one_probe_eval(ctx, probe, r1, r2, eval_n) {
                return Some(hit);
            }
        }
        return None;
    }
    for probe in &probes {
        if let Some(hit) = search_one_probe(ctx, probe, r1, r2, disjoin) {
            return Some(hit);
        }
    }
    None
}

fn prepared_bytes(mate: Mate, do_revcomp: bool, r1: &[u8], r2: &[u8]) -> Vec<u8> {
    let raw = match mate {
        Mate::R1 => r1,
        Mate::R2 => r2,
    };
    if do_revcomp {
        revcomp(raw)
    } else {
        raw.to_vec()
    }
}

fn search_one_probe(ctx: &PairSearchCtx, probe: &Probe, r1: &[u8], r2: &[u8], disjoin: bool) -> Option<PairHit> {
    let anchor_bytes = prepared_bytes(probe.anchor_mate, probe.anchor_revcomp, r1, r2);
    let mate_bytes = prepared_bytes(probe.mate_mate, probe.mate_revcomp, r1, r2);
    let s2 = r2.len();

    let mut cursor = 0usize;
    loop {
        let hit = match seed(ctx.index, &anchor_bytes, cursor, ctx.step) {
            SeedOutcome::Exhausted => return None,
            SeedOutcome::Hit(h) => h,
        };
        // Guarantee strict progress before the next `seed` call regardless
        // of what happens below, closing off the infinite-loop hazard of
        // re-entering at the same cursor on repeated EXHAUSTED/failure.
        cursor = hit.cursor + ctx.step.max(1);

        let bucket = ctx.index.lookup_by_index(hit.bucket_index);
        for pos in &bucket.positions {
            let seq_len = ctx.refs.get(pos.seq_index as usize).len();
            let astart = match anchor_start(pos.offset as usize, hit.cursor, seq_len, anchor_bytes.len()) {
                Some(s) => s,
                None => continue,
            };
            let ref_slice = &ctx.refs.get(pos.seq_index as usize).seq[astart..astart + anchor_bytes.len()];
            if verify(ref_slice, &anchor_bytes, anchor_bytes.len(), ctx.max_mismatch_pct, ctx.ignore_n) == 0 {
                continue;
            }

            if let Some((hit, _score)) =
                search_mate(ctx, probe, &mate_bytes, pos.seq_index, astart, anchor_bytes.len(), s2, disjoin)
            {
                return Some(hit);
            }
        }
    }
}

fn search_mate(
    ctx: &PairSearchCtx,
    probe: &Probe,
    mate_bytes: &[u8],
    anchor_seq_idx: u32,
    anchor_start_pos: usize,
    anchor_len: usize,
    s2: usize,
    disjoin: bool,
) -> Option<(PairHit, usize)> {
    let mut cursor = 0usize;
    loop {
        let hit = match seed(ctx.index, mate_bytes, cursor, ctx.step) {
            SeedOutcome::Exhausted => return None,
            SeedOutcome::Hit(h) => h,
        };
        cursor = hit.cursor + ctx.step.max(1);

        let bucket = ctx.index.lookup_by_index(hit.bucket_index);
        let (same_seq, other_seq) = split_by_seq_index(bucket, anchor_seq_idx, probe.direction);

        if let Some(found) = try_positions(
            ctx, probe, same_seq, mate_bytes, hit.cursor, anchor_seq_idx, anchor_start_pos, anchor_len, s2, false,
        ) {
            return Some(found);
        }

        if disjoin {
            if let Some(found) = try_positions(
                ctx, probe, other_seq, mate_bytes, hit.cursor, anchor_seq_idx, anchor_start_pos, anchor_len, s2, true,
            ) {
                return Some(found);
            }
        }
    }
}

/// Splits a bucket's positions (sorted seq_index asc, offset asc) into the
/// contiguous same-sequence-as-anchor subrange and the subrange that is on
/// the correct side of the anchor for this probe's direction.
fn split_by_seq_index<'a>(bucket: &'a Bucket, anchor_seq_idx: u32, direction: Direction) -> (&'a [RefPos], &'a [RefPos]) {
    let lo = bucket.positions.partition_point(|p| p.seq_index < anchor_seq_idx);
    let hi = lo + bucket.positions[lo..].partition_point(|p| p.seq_index == anchor_seq_idx);
    let same = &bucket.positions[lo..hi];
    let other = match direction {
        Direction::Inward => &bucket.positions[hi..],
        Direction::Outward => &bucket.positions[..lo],
    };
    (same, other)
}

#[allow(clippy::too_many_arguments)]
fn try_positions(
    ctx: &PairSearchCtx,
    probe: &Probe,
    positions: &[RefPos],
    mate_bytes: &[u8],
    mate_cursor: usize,
    anchor_seq_idx: u32,
    anchor_start_pos: usize,
    anchor_len: usize,
    s2: usize,
    cross_seq: bool,
) -> Option<(PairHit, usize)> {
    for pos in positions {
        let seq_len = ctx.refs.get(pos.seq_index as usize).len();
        let mstart = match anchor_start(pos.offset as usize, mate_cursor, seq_len, mate_bytes.len()) {
            Some(s) => s,
            None => continue,
        };
        let ref_slice = &ctx.refs.get(pos.seq_index as usize).seq[mstart..mstart + mate_bytes.len()];
        let mate_score = verify(ref_slice, mate_bytes, mate_bytes.len(), ctx.max_mismatch_pct, ctx.ignore_n);
        if mate_score == 0 {
            continue;
        }

        let (seq1, start1, end1, strand1, seq2, start2, end2, strand2) = match probe.anchor_mate {
            Mate::R1 => (
                anchor_seq_idx, anchor_start_pos, anchor_start_pos + anchor_len, probe.anchor_strand,
                pos.seq_index, mstart, mstart + mate_bytes.len(), probe.mate_strand,
            ),
            Mate::R2 => (
                pos.seq_index, mstart, mstart + mate_bytes.len(), probe.mate_strand,
                anchor_seq_idx, anchor_start_pos, anchor_start_pos + anchor_len, probe.anchor_strand,
            ),
        };

        // s2 is always the literal |R2|, regardless of which mate served
        // as the anchor, so the order constraint never mixes up the two
        // mates' lengths.
        let order_ok = match probe.direction {
            Direction::Inward => start1 <= start2 + s2,
            Direction::Outward => start1 >= start2 + s2,
        };
        if !order_ok {
            continue;
        }

        let score: u8 = if cross_seq && seq1 != seq2 { 1 } else { 0 };

        return Some((
            PairHit { seq1: seq1 as usize, start1, end1, strand1, seq2: seq2 as usize, start2, end2, strand2, score },
            mate_score,
        ));
    }
    None
}

fn search_one_probe_eval(ctx: &PairSearchCtx, probe: &Probe, r1: &[u8], r2: &[u8], eval_n: usize) -> Option<PairHit> {
    let anchor_bytes = prepared_bytes(probe.anchor_mate, probe.anchor_revcomp, r1, r2);
    let mate_bytes = prepared_bytes(probe.mate_mate, probe.mate_revcomp, r1, r2);
    let s2 = r2.len();

    let mut candidates: Vec<(PairHit, usize)> = Vec::new();
    let mut cursor = 0usize;

    while candidates.len() < eval_n {
        let hit = match seed(ctx.index, &anchor_bytes, cursor, ctx.step) {
            SeedOutcome::Exhausted => break,
            SeedOutcome::Hit(h) => h,
        };
        cursor = hit.cursor + ctx.step.max(1);

        let bucket = ctx.index.lookup_by_index(hit.bucket_index);
        for pos in &bucket.positions {
            let seq_len = ctx.refs.get(pos.seq_index as usize).len();
            let astart = match anchor_start(pos.offset as usize, hit.cursor, seq_len, anchor_bytes.len()) {
                Some(s) => s,
                None => continue,
            };
            let ref_slice = &ctx.refs.get(pos.seq_index as usize).seq[astart..astart + anchor_bytes.len()];
            let anchor_score = verify(ref_slice, &anchor_bytes, anchor_bytes.len(), ctx.max_mismatch_pct, ctx.ignore_n);
            if anchor_score == 0 {
                continue;
            }

            // disjoin is always off in -e mode: only same-sequence mates count.
            if let Some((pair_hit, mate_score)) =
                search_mate(ctx, probe, &mate_bytes, pos.seq_index, astart, anchor_bytes.len(), s2, false)
            {
                candidates.push((pair_hit, anchor_score + mate_score));
                break; // one candidate per outer-loop (per anchor seed hit) iteration
            }
        }

        if candidates.len() >= eval_n {
            break;
        }
    }

    candidates.into_iter().min_by_key(|(_, score)| *score).map(|(hit, _)| hit)
}
