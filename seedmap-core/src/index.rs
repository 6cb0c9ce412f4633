//! The sorted-array seed index: one bucket per distinct fingerprint, each
//! holding the (seq_index, offset) positions that fingerprint occurs at.

use crate::fingerprint::{fingerprint, SENTINEL};
use crate::reference::ReferenceDb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefPos {
    pub seq_index: u32,
    pub offset: u32,
}

#[derive(Debug)]
pub struct Bucket {
    pub id: u32,
    pub positions: Vec<RefPos>,
}

#[derive(Debug)]
pub struct SeedIndex {
    k: usize,
    buckets: Vec<Bucket>,
}

impl SeedIndex {
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Builds the index from every non-sentinel k-mer window in `db`.
    ///
    /// The triple stream (fingerprint, seq_index, offset) is sorted once.
    /// `sort_by`'s stability keeps each bucket's positions ordered by
    /// seq_index then offset.
    pub fn build(db: &ReferenceDb, k: usize) -> Self {
        let mut triples: Vec<(u32, u32, u32)> = Vec::new();
        for (seq_idx, refseq) in db.iter().enumerate() {
            let seq = &refseq.seq;
            if seq.len() < k {
                continue;
            }
            for offset in 0..=(seq.len() - k) {
                let fp = fingerprint(&seq[offset..offset + k]);
                if fp != SENTINEL {
                    triples.push((fp, seq_idx as u32, offset as u32));
                }
            }
        }
        triples.sort_by(|a, b| a.cmp(b));

        let mut buckets: Vec<Bucket> = Vec::new();
        for (fp, seq_idx, offset) in triples {
            match buckets.last_mut() {
                Some(last) if last.id == fp => last.positions.push(RefPos { seq_index: seq_idx, offset }),
                _ => buckets.push(Bucket { id: fp, positions: vec![RefPos { seq_index: seq_idx, offset }] }),
            }
        }

        SeedIndex { k, buckets }
    }

    pub fn lookup(&self, fp: u32) -> Option<&Bucket> {
        self.bucket_index_for(fp).map(|i| &self.buckets[i])
    }

    pub fn bucket_index_for(&self, fp: u32) -> Option<usize> {
        self.buckets.binary_search_by_key(&fp, |b| b.id).ok()
    }

    pub fn lookup_by_index(&self, i: usize) -> &Bucket {
        &self.buckets[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceDb;
    use std::io::Cursor;

    fn db(fasta: &str, k: usize) -> ReferenceDb {
        ReferenceDb::parse(Cursor::new(fasta.as_bytes()), false, k).unwrap()
    }

    #[test]
    fn buckets_are_sorted_by_fingerprint() {
        let d = db(">chr1\nACGTACGTACGT\n", 4);
        let idx = SeedIndex::build(&d, 4);
        let ids: Vec<u32> = (0..idx.num_buckets()).map(|i| idx.lookup_by_index(i).id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn bucket_positions_are_seq_then_offset_sorted() {
        let d = db(">chr1\nAAAAAAAA\n>chr2\nAAAAAAAA\n", 4);
        let idx = SeedIndex::build(&d, 4);
        // "AAAA" fingerprints to 0 for every window; all occurrences share one bucket.
        let bucket = idx.lookup(0).unwrap();
        let mut prev: Option<RefPos> = None;
        for p in &bucket.positions {
            if let Some(prev) = prev {
                assert!((prev.seq_index, prev.offset) <= (p.seq_index, p.offset));
            }
            prev = Some(*p);
        }
    }

    #[test]
    fn lookup_returns_none_for_absent_fingerprint() {
        let d = db(">chr1\nACGTACGT\n", 4);
        let idx = SeedIndex::build(&d, 4);
        // "TTTT" (fingerprint 4^4 - 1) never occurs in the reference.
        assert!(idx.lookup(255).is_none());
    }

    #[test]
    fn every_position_decodes_to_its_bucket_fingerprint() {
        let d = db(">chr1\nACGTTGCAACGTTGCA\n", 4);
        let idx = SeedIndex::build(&d, 4);
        for i in 0..idx.num_buckets() {
            let bucket = idx.lookup_by_index(i);
            for pos in &bucket.positions {
                let seq = &d.get(pos.seq_index as usize).seq;
                let window = &seq[pos.offset as usize..pos.offset as usize + 4];
                assert_eq!(fingerprint(window), bucket.id);
            }
        }
    }
}
