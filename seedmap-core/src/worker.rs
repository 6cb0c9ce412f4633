//! The single worker body every library mode shares. Modes differ only in
//! probe construction and strand labels, handled entirely inside
//! `placement`; this loop is otherwise mode-agnostic.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::MapperError;
use crate::index::SeedIndex;
use crate::interval::{BedPeRecord, BedRecord};
use crate::io_util::open_for_read_at;
use crate::partition::WorkerChunk;
use crate::placement::{
    paired::{search_paired, PairSearchCtx},
    single::{place_single, SingleSearchCtx},
};
use crate::record::{record_name, FastqReader, ReadRecord};
use crate::reference::ReferenceDb;

#[derive(Debug, Clone)]
pub struct WorkerOutputs {
    pub bed_path: PathBuf,
    pub r1_path: PathBuf,
    pub r2_path: PathBuf,
}

pub fn run_worker(
    chunk: &WorkerChunk,
    config: &Config,
    index: &SeedIndex,
    refs: &ReferenceDb,
    outputs: &WorkerOutputs,
) -> Result<(), MapperError> {
    let mut bed_writer = BufWriter::new(File::create(&outputs.bed_path)?);
    let mut r1_writer = BufWriter::new(File::create(&outputs.r1_path)?);
    let mut r2_writer = BufWriter::new(File::create(&outputs.r2_path)?);

    let mut r1_reader = match &config.r1_path {
        Some(p) => Some(FastqReader::new(open_for_read_at(p, chunk.r1_start)?)),
        None => None,
    };
    let mut r2_reader = match &config.r2_path {
        Some(p) => Some(FastqReader::new(open_for_read_at(p, chunk.r2_start)?)),
        None => None,
    };

    let records_to_read = chunk.line_count / 4;
    let mut rec1 = ReadRecord::default();
    let mut rec2 = ReadRecord::default();

    for _ in 0..records_to_read {
        let have1 = match &mut r1_reader {
            Some(r) => r.read_into(&mut rec1)?,
            None => false,
        };
        let have2 = match &mut r2_reader {
            Some(r) => r.read_into(&mut rec2)?,
            None => false,
        };
        if !have1 && !have2 {
            break;
        }

        process_record(config, index, refs, &rec1, have1, &rec2, have2, &mut bed_writer, &mut r1_writer, &mut r2_writer)?;
    }

    bed_writer.flush()?;
    r1_writer.flush()?;
    r2_writer.flush()?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn process_record(
    config: &Config,
    index: &SeedIndex,
    refs: &ReferenceDb,
    rec1: &ReadRecord,
    have1: bool,
    rec2: &ReadRecord,
    have2: bool,
    bed_writer: &mut impl Write,
    r1_writer: &mut impl Write,
    r2_writer: &mut impl Write,
) -> Result<(), MapperError> {
    if config.mode.is_paired() {
        if !(have1 && have2) {
            return Ok(());
        }
        let ctx = PairSearchCtx {
            index,
            refs,
            max_mismatch_pct: config.max_mismatch_pct,
            step: config.step,
            ignore_n: config.ignore_n,
        };
        let hit = search_paired(&ctx, config.mode, &rec1.seq, &rec2.seq, config.disjoin, config.eval_n);
        let mapped = hit.is_some();

        if config.bed_out && !config.diff {
            if let Some(h) = &hit {
                let rec = BedPeRecord {
                    chrom1: refs.get(h.seq1).id.clone(),
                    start1: h.start1,
                    end1: h.end1,
                    chrom2: refs.get(h.seq2).id.clone(),
                    start2: h.start2,
                    end2: h.end2,
                    name: record_name(&rec1.header).to_string(),
                    score: h.score,
                    strand1: h.strand1,
                    strand2: h.strand2,
                };
                rec.write_to(bed_writer)?;
            }
        }

        if config.fastq_out && (mapped ^ config.diff) {
            write_fastq(r1_writer, rec1)?;
            write_fastq(r2_writer, rec2)?;
        }
    } else {
        let r1_bytes = if have1 { Some(rec1.seq.as_slice()) } else { None };
        let r2_bytes = if have2 { Some(rec2.seq.as_slice()) } else { None };
        let ctx = SingleSearchCtx {
            index,
            refs,
            max_mismatch_pct: config.max_mismatch_pct,
            step: config.step,
            ignore_n: config.ignore_n,
        };
        let hit = place_single(&ctx, config.mode, r1_bytes, r2_bytes);
        let mapped = hit.is_some();

        if config.bed_out && !config.diff {
            if let Some(h) = &hit {
                let header = if have1 { &rec1.header } else { &rec2.header };
                let rec = BedRecord { chrom: refs.get(h.seq_index).id.clone(), start: h.start, end: h.end, name: record_name(header).to_string() };
                rec.write_to(bed_writer)?;
            }
        }

        if config.fastq_out && (mapped ^ config.diff) {
            if have1 {
                write_fastq(r1_writer, rec1)?;
            }
            if have2 {
                write_fastq(r2_writer, rec2)?;
            }
        }
    }
    Ok(())
}

fn write_fastq(w: &mut impl Write, rec: &ReadRecord) -> Result<(), MapperError> {
    w.write_all(rec.header.as_bytes())?;
    w.write_all(b"\n")?;
    w.write_all(&rec.seq)?;
    w.write_all(b"\n")?;
    w.write_all(b"+\n")?;
    w.write_all(&rec.qual)?;
    w.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SeedIndex;
    use crate::partition::partition;
    use crate::placement::Mode;
    use std::io::{Read, Write};
    use tempfile::{tempdir, NamedTempFile};

    fn write_fastq_file(records: &[(&str, &str)]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        for (header, seq) in records {
            let qual = "I".repeat(seq.len());
            writeln!(f, "{header}").unwrap();
            writeln!(f, "{seq}").unwrap();
            writeln!(f, "+").unwrap();
            writeln!(f, "{qual}").unwrap();
        }
        f.flush().unwrap();
        f
    }

    #[test]
    fn single_end_exact_hit_writes_bed_and_fastq() {
        let fasta = ">chr1\nACGTACGTACGTACGTACGT\n";
        let db = ReferenceDb::parse(std::io::Cursor::new(fasta.as_bytes()), false, 9).unwrap();
        let idx = SeedIndex::build(&db, 9);

        let r1 = write_fastq_file(&[("@r1", "ACGTACGTACGTACGT")]);
        let cfg = Config::new(
            PathBuf::from("ref.fa"), Some(r1.path().to_path_buf()), None, PathBuf::from("out"),
            Mode::Sf, 9, 0, 1, 1, false, false, false, false, true, true, false, 0,
        )
        .unwrap();

        let chunks = partition(Some(r1.path()), None, 1).unwrap();
        let dir = tempdir().unwrap();
        let outputs = WorkerOutputs {
            bed_path: dir.path().join("0.bed"),
            r1_path: dir.path().join("0.R1.fastq"),
            r2_path: dir.path().join("0.R2.fastq"),
        };

        run_worker(&chunks[0], &cfg, &idx, &db, &outputs).unwrap();

        let mut bed = String::new();
        File::open(&outputs.bed_path).unwrap().read_to_string(&mut bed).unwrap();
        assert_eq!(bed, "chr1\t0\t16\tr1\n");

        let mut fastq = String::new();
        File::open(&outputs.r1_path).unwrap().read_to_string(&mut fastq).unwrap();
        assert_eq!(fastq, "@r1\nACGTACGTACGTACGT\n+\nIIIIIIIIIIIIIIII\n");
    }

    #[test]
    fn diff_mode_writes_only_unmapped_reads_and_no_bed() {
        let fasta = ">chr1\nACGTACGTACGTACGTACGT\n";
        let db = ReferenceDb::parse(std::io::Cursor::new(fasta.as_bytes()), false, 9).unwrap();
        let idx = SeedIndex::build(&db, 9);

        let r1 = write_fastq_file(&[("@mapped", "ACGTACGTACGTACGT"), ("@unmapped", "TTTTTTTTTTTTTTTT")]);
        let cfg = Config::new(
            PathBuf::from("ref.fa"), Some(r1.path().to_path_buf()), None, PathBuf::from("out"),
            Mode::Sf, 9, 0, 1, 1, true, false, false, false, true, true, false, 0,
        )
        .unwrap();

        let chunks = partition(Some(r1.path()), None, 1).unwrap();
        let dir = tempdir().unwrap();
        let outputs = WorkerOutputs {
            bed_path: dir.path().join("0.bed"),
            r1_path: dir.path().join("0.R1.fastq"),
            r2_path: dir.path().join("0.R2.fastq"),
        };

        run_worker(&chunks[0], &cfg, &idx, &db, &outputs).unwrap();

        let mut bed = String::new();
        File::open(&outputs.bed_path).unwrap().read_to_string(&mut bed).unwrap();
        assert_eq!(bed, "");

        let mut fastq = String::new();
        File::open(&outputs.r1_path).unwrap().read_to_string(&mut fastq).unwrap();
        assert!(fastq.contains("@unmapped"));
        assert!(!fastq.contains("@mapped\n"));
    }
}
