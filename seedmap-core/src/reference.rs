//! The reference database: parsed, uppercased (unless `--mask-lower`)
//! sequences plus their cached GC fraction.

use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use crate::error::MapperError;
use crate::io_util::open_for_read;

#[derive(Debug, Clone)]
pub struct ReferenceSequence {
    pub id: String,
    pub seq: Vec<u8>,
    gc_fraction: f64,
}

impl ReferenceSequence {
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Fraction of G/C bases in the sequence, cached at construction time.
    pub fn gc_fraction(&self) -> f64 {
        self.gc_fraction
    }
}

#[derive(Debug, Default)]
pub struct ReferenceDb {
    sequences: Vec<ReferenceSequence>,
}

impl ReferenceDb {
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn get(&self, seq_index: usize) -> &ReferenceSequence {
        &self.sequences[seq_index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceSequence> {
        self.sequences.iter()
    }

    pub fn from_fasta(path: impl AsRef<Path>, mask_lower: bool, k: usize) -> Result<Self, MapperError> {
        let reader = open_for_read(path.as_ref())?;
        Self::parse(reader, mask_lower, k)
    }

    pub(crate) fn parse(reader: impl BufRead, mask_lower: bool, k: usize) -> Result<Self, MapperError> {
        let mut sequences = Vec::new();
        let mut current_id: Option<String> = None;
        let mut current_seq: Vec<u8> = Vec::new();
        let mut saw_any_header = false;

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix('>') {
                saw_any_header = true;
                flush_sequence(&mut current_id, &mut current_seq, &mut sequences)?;
                let id = rest.split_whitespace().next().unwrap_or("").to_string();
                if id.is_empty() {
                    return Err(MapperError::MalformedFasta("header line has no identifier".into()));
                }
                current_id = Some(id);
            } else {
                if current_id.is_none() {
                    return Err(MapperError::MalformedFasta("sequence data before any header".into()));
                }
                current_seq.reserve(line.len());
                for b in line.into_bytes() {
                    current_seq.push(if mask_lower { b } else { b.to_ascii_uppercase() });
                }
            }
        }
        flush_sequence(&mut current_id, &mut current_seq, &mut sequences)?;

        if !saw_any_header || sequences.is_empty() {
            return Err(MapperError::EmptyReference);
        }

        let mut seen = HashSet::with_capacity(sequences.len());
        for s in &sequences {
            if !seen.insert(s.id.clone()) {
                return Err(MapperError::DuplicateHeader(s.id.clone()));
            }
            if s.seq.len() < k {
                return Err(MapperError::SequenceTooShort(s.id.clone(), s.seq.len(), k));
            }
        }

        Ok(ReferenceDb { sequences })
    }
}

fn flush_sequence(
    current_id: &mut Option<String>,
    current_seq: &mut Vec<u8>,
    out: &mut Vec<ReferenceSequence>,
) -> Result<(), MapperError> {
    if let Some(id) = current_id.take() {
        let seq = std::mem::take(current_seq);
        if seq.is_empty() {
            return Err(MapperError::MalformedFasta(format!("sequence '{id}' has no bases")));
        }
        let gc_fraction = gc_fraction(&seq);
        out.push(ReferenceSequence { id, seq, gc_fraction });
    }
    Ok(())
}

fn gc_fraction(seq: &[u8]) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let gc = seq.iter().filter(|&&b| matches!(b, b'G' | b'g' | b'C' | b'c')).count();
    gc as f64 / seq.len() as f64
}
