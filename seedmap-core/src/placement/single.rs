//! Single-end placement (SF/SR/U).

use crate::index::SeedIndex;
use crate::reference::ReferenceDb;
use crate::revcomp::revcomp;
use crate::seed::{anchor_start, seed, SeedOutcome};
use crate::verify::verify;

use super::mode::Mode;

#[derive(Debug, Clone, Copy)]
pub struct SingleHit {
    pub seq_index: usize,
    pub start: usize,
    pub end: usize,
}

pub struct SingleSearchCtx<'a> {
    pub index: &'a SeedIndex,
    pub refs: &'a ReferenceDb,
    pub max_mismatch_pct: u8,
    pub step: usize,
    pub ignore_n: bool,
}

/// Iterates seed anchors of `probe_bytes`, returning the first that
/// verifies.
pub fn search_single(ctx: &SingleSearchCtx, probe_bytes: &[u8]) -> Option<SingleHit> {
    let mut cursor = 0usize;
    loop {
        let hit = match seed(ctx.index, probe_bytes, cursor, ctx.step) {
            SeedOutcome::Exhausted => return None,
            SeedOutcome::Hit(h) => h,
        };
        cursor = hit.cursor + ctx.step.max(1);

        let bucket = ctx.index.lookup_by_index(hit.bucket_index);
        for pos in &bucket.positions {
            let seq_len = ctx.refs.get(pos.seq_index as usize).len();
            let start = match anchor_start(pos.offset as usize, hit.cursor, seq_len, probe_bytes.len()) {
                Some(s) => s,
                None => continue,
            };
            let ref_slice = &ctx.refs.get(pos.seq_index as usize).seq[start..start + probe_bytes.len()];
            if verify(ref_slice, probe_bytes, probe_bytes.len(), ctx.max_mismatch_pct, ctx.ignore_n) == 0 {
                continue;
            }
            return Some(SingleHit { seq_index: pos.seq_index as usize, start, end: start + probe_bytes.len() });
        }
    }
}

/// Resolves a single-end mode (SF/SR/U) against whichever of R1/R2 is
/// available. Returns `None` if neither read is present; the worker loop
/// guarantees at least one exists before dispatching here.
pub fn place_single(ctx: &SingleSearchCtx, mode: Mode, r1: Option<&[u8]>, r2: Option<&[u8]>) -> Option<SingleHit> {
    match mode {
        Mode::Sf => match (r1, r2) {
            (Some(r1), _) => search_single(ctx, r1),
            (None, Some(r2)) => search_single(ctx, &revcomp(r2)),
            (None, None) => None,
        },
        Mode::Sr => match (r1, r2) {
            (Some(r1), _) => search_single(ctx, &revcomp(r1)),
            (None, Some(r2)) => search_single(ctx, r2),
            (None, None) => None,
        },
        Mode::U => {
            let read = r1.or(r2)?;
            if let Some(hit) = search_single(ctx, read) {
                return Some(hit);
            }
            search_single(ctx, &revcomp(read))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SeedIndex;
    use crate::reference::ReferenceDb;
    use std::io::Cursor;

    fn setup(fasta: &str, k: usize) -> (ReferenceDb, SeedIndex) {
        let db = ReferenceDb::parse(Cursor::new(fasta.as_bytes()), false, k).unwrap();
        let idx = SeedIndex::build(&db, k);
        (db, idx)
    }

    #[test]
    fn sf_places_r1_forward() {
        let (db, idx) = setup(">chr1\nACGTACGTACGTACGTACGT\n", 9);
        let ctx = SingleSearchCtx { index: &idx, refs: &db, max_mismatch_pct: 0, step: 1, ignore_n: false };
        let r1 = b"ACGTACGTACGTACGT";
        let hit = place_single(&ctx, Mode::Sf, Some(r1), None).unwrap();
        assert_eq!((hit.start, hit.end), (0, 16));
    }

    #[test]
    fn u_falls_back_to_revcomp() {
        let mut seq = vec![b'T'; 50];
        let target = b"AACGTACGTACGTACG";
        let rc_target = revcomp(target);
        seq[3..3 + rc_target.len()].copy_from_slice(&rc_target);
        let fasta = format!(">chr1\n{}\n", String::from_utf8(seq).unwrap());
        let (db, idx) = setup(&fasta, 9);
        let ctx = SingleSearchCtx { index: &idx, refs: &db, max_mismatch_pct: 0, step: 1, ignore_n: false };

        let hit = place_single(&ctx, Mode::U, Some(target), None).expect("expected revcomp placement");
        assert_eq!(hit.start, 3);
        assert_eq!(hit.end - hit.start, target.len());
    }

    #[test]
    fn sf_uses_revcomp_of_r2_when_r1_absent() {
        let (db, idx) = setup(">chr1\nACGTACGTACGTACGTACGT\n", 9);
        let ctx = SingleSearchCtx { index: &idx, refs: &db, max_mismatch_pct: 0, step: 1, ignore_n: false };
        let r2 = revcomp(b"ACGTACGTACGTACGT");
        let hit = place_single(&ctx, Mode::Sf, None, Some(&r2)).unwrap();
        assert_eq!((hit.start, hit.end), (0, 16));
    }
}
