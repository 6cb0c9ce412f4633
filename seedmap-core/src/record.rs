//! FASTQ record parsing. A reusable scratch record is refilled per call so
//! a worker's per-record memory footprint never grows across its loop.

use std::io::BufRead;

use crate::error::MapperError;

#[derive(Debug, Default, Clone)]
pub struct ReadRecord {
    pub header: String,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
}

impl ReadRecord {
    fn clear(&mut self) {
        self.header.clear();
        self.seq.clear();
        self.qual.clear();
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }
}

/// Trims a FASTQ header down to the name field used in interval records:
/// the leading `@` dropped, truncated at the first space or newline.
pub fn record_name(header: &str) -> &str {
    let h = header.strip_prefix('@').unwrap_or(header);
    let end = h.find([' ', '\t', '\n', '\r']).unwrap_or(h.len());
    &h[..end]
}

pub struct FastqReader<R> {
    inner: R,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(inner: R) -> Self {
        FastqReader { inner }
    }

    /// Reads the next four-line record into `rec`. Returns `Ok(false)` at a
    /// clean EOF (no bytes read before the header line); any other short
    /// read is a malformed-record error.
    pub fn read_into(&mut self, rec: &mut ReadRecord) -> Result<bool, MapperError> {
        rec.clear();
        let mut line = String::new();

        if self.inner.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let header = trim_newline(&line);
        if !header.starts_with('@') {
            return Err(MapperError::MalformedFastq("record header does not start with '@'".into()));
        }
        rec.header.push_str(header);

        line.clear();
        if self.inner.read_line(&mut line)? == 0 {
            return Err(MapperError::MalformedFastq("truncated record: missing sequence line".into()));
        }
        rec.seq.extend_from_slice(trim_newline(&line).as_bytes());

        line.clear();
        if self.inner.read_line(&mut line)? == 0 {
            return Err(MapperError::MalformedFastq("truncated record: missing '+' line".into()));
        }

        line.clear();
        if self.inner.read_line(&mut line)? == 0 {
            return Err(MapperError::MalformedFastq("truncated record: missing quality line".into()));
        }
        rec.qual.extend_from_slice(trim_newline(&line).as_bytes());

        Ok(true)
    }
}

fn trim_newline(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
