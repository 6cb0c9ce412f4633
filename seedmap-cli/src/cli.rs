use std::path::PathBuf;

use clap::Parser;

/// High-throughput ungapped paired-end read mapper and splitter.
#[derive(Parser, Debug)]
#[clap(name = "seedmap", version, about = "Ungapped paired-end read mapper and splitter")]
pub struct Args {
    /// FASTA reference (may be gzip-compressed)
    #[arg(short = 'i', long = "reference", value_name = "PATH")]
    pub reference: PathBuf,

    /// R1 FASTQ input (accepted on the command line as single-dash `-R1`;
    /// `main` rewrites it to `--R1` before clap ever sees argv)
    #[arg(long = "R1", value_name = "PATH")]
    pub r1: Option<PathBuf>,

    /// R2 FASTQ input (accepted on the command line as single-dash `-R2`;
    /// `main` rewrites it to `--R2` before clap ever sees argv)
    #[arg(long = "R2", value_name = "PATH")]
    pub r2: Option<PathBuf>,

    /// Output basename; outputs are <basename>_R1.fastq, <basename>_R2.fastq, <basename>.bed
    #[arg(short = 'o', long = "out", value_name = "BASENAME")]
    pub out: PathBuf,

    /// Library orientation mode
    #[arg(short = 'l', long = "mode", value_name = "MODE")]
    pub mode: String,

    /// Write non-mapped reads to FASTQ instead of mapped reads, and suppress BED output
    #[arg(long = "diff")]
    pub diff: bool,

    /// Allow mate pairs to place on different reference sequences
    #[arg(long = "disjoin")]
    pub disjoin: bool,

    /// Skip reference N positions during verification instead of counting them as mismatches
    #[arg(long = "ignore_N")]
    pub ignore_n: bool,

    /// Keep original reference case instead of uppercasing
    #[arg(long = "mask-lower")]
    pub mask_lower: bool,

    /// Suppress BED output
    #[arg(long = "no-bed")]
    pub no_bed: bool,

    /// Suppress FASTQ output
    #[arg(long = "no-fastq")]
    pub no_fastq: bool,

    /// Suppress informational logging
    #[arg(long = "quiet")]
    pub quiet: bool,

    /// Best-of-N evaluation; forces --disjoin off when > 0
    #[arg(short = 'e', long = "eval", default_value_t = 0)]
    pub eval_n: usize,

    /// K-mer size
    #[arg(short = 'k', long = "kmer", default_value_t = 15)]
    pub k: usize,

    /// Max mismatch percentage
    #[arg(short = 'm', long = "mismatch", default_value_t = 15)]
    pub max_mismatch_pct: u8,

    /// Seed step
    #[arg(short = 's', long = "step", default_value_t = 17)]
    pub step: usize,

    /// Worker thread count
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,
}
