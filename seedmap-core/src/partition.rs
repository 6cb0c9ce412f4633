//! Divides input FASTQ stream(s) into N byte-aligned, record-aligned
//! (multiple-of-4-lines) chunks, one per worker.

use std::io::{BufRead, Read};
use std::path::Path;

use crate::error::MapperError;
use crate::io_util::open_for_read;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start_byte: u64,
    pub line_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerChunk {
    pub id: usize,
    pub r1_start: u64,
    pub r2_start: u64,
    pub line_count: u64,
}

pub fn partition(r1_path: Option<&Path>, r2_path: Option<&Path>, n: usize) -> Result<Vec<WorkerChunk>, MapperError> {
    match (r1_path, r2_path) {
        (Some(r1), Some(r2)) => {
            let r1_chunks = partition_single_file(r1, n)?;
            let r2_starts = r2_starts_from_r1_chunks(r2, &r1_chunks)?;
            Ok(r1_chunks
                .iter()
                .enumerate()
                .map(|(i, c)| WorkerChunk { id: i, r1_start: c.start_byte, r2_start: r2_starts[i], line_count: c.line_count })
                .collect())
        }
        (Some(single), None) | (None, Some(single)) => {
            let chunks = partition_single_file(single, n)?;
            Ok(chunks
                .into_iter()
                .enumerate()
                .map(|(i, c)| WorkerChunk { id: i, r1_start: c.start_byte, r2_start: c.start_byte, line_count: c.line_count })
                .collect())
        }
        (None, None) => Err(MapperError::Config("at least one of R1/R2 must be provided".into())),
    }
}

/// Divides one file into `n` chunks, each starting at a byte offset on a
/// 4-line boundary. The last chunk's line count is computed explicitly from
/// the accumulated total rather than left implicit at EOF.
fn partition_single_file(path: &Path, n: usize) -> Result<Vec<Chunk>, MapperError> {
    if n == 0 {
        return Err(MapperError::Config("worker count must be >= 1".into()));
    }
    if n == 1 {
        return Ok(vec![Chunk { start_byte: 0, line_count: count_lines(path)? }]);
    }

    let total_bytes = count_bytes(path)?;
    let targets: Vec<u64> = (1..n as u64).map(|t| t * total_bytes / n as u64).collect();

    let mut chunks = Vec::with_capacity(n);
    let mut reader = open_for_read(path)?;
    let mut byte_pos: u64 = 0;
    let mut line_count_total: u64 = 0;
    let mut chunk_start_byte: u64 = 0;
    let mut chunk_start_lines: u64 = 0;
    let mut target_idx = 0usize;
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }
        byte_pos += read as u64;
        line_count_total += 1;

        if target_idx < targets.len() && byte_pos >= targets[target_idx] && line_count_total % 4 == 0 {
            chunks.push(Chunk { start_byte: chunk_start_byte, line_count: line_count_total - chunk_start_lines });
            chunk_start_byte = byte_pos;
            chunk_start_lines = line_count_total;
            target_idx += 1;
        }
    }

    chunks.push(Chunk { start_byte: chunk_start_byte, line_count: line_count_total - chunk_start_lines });

    while chunks.len() < n {
        chunks.push(Chunk { start_byte: byte_pos, line_count: 0 });
    }
    Ok(chunks)
}

/// Walks R2 forward, recording its byte position each time its line
/// counter reaches the cumulative line count at the start of each R1
/// chunk, so R2's boundaries stay record-synchronised with R1's.
fn r2_starts_from_r1_chunks(path: &Path, r1_chunks: &[Chunk]) -> Result<Vec<u64>, MapperError> {
    let n = r1_chunks.len();
    let mut starts = vec![0u64; n];
    if n <= 1 {
        return Ok(starts);
    }

    let mut thresholds = Vec::with_capacity(n - 1);
    let mut cum = 0u64;
    for chunk in &r1_chunks[..n - 1] {
        cum += chunk.line_count;
        thresholds.push(cum);
    }

    let mut reader = open_for_read(path)?;
    let mut byte_pos: u64 = 0;
    let mut line_count: u64 = 0;
    let mut t_idx = 0usize;
    let mut line = String::new();

    while t_idx < thresholds.len() {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }
        byte_pos += read as u64;
        line_count += 1;
        if line_count == thresholds[t_idx] {
            starts[t_idx + 1] = byte_pos;
            t_idx += 1;
        }
    }
    Ok(starts)
}

fn count_bytes(path: &Path) -> Result<u64, MapperError> {
    let mut reader = open_for_read(path)?;
    let mut buf = [0u8; 64 * 1024];
    let mut total = 0u64;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        total += n as u64;
    }
    Ok(total)
}

fn count_lines(path: &Path) -> Result<u64, MapperError> {
    let reader = open_for_read(path)?;
    let mut count = 0u64;
    for line in reader.lines() {
        line?;
        count += 1;
    }
    Ok(count)
}
