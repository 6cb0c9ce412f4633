//! Ungapped paired-end read mapper and splitter engine.
//!
//! Owns the reference index, the seed/extend primitives, the nine library
//! orientation placement policies, and the parallel partition/worker/merge
//! pipeline that drives them over a FASTQ input stream.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod index;
pub mod interval;
pub mod io_util;
pub mod merge;
pub mod partition;
pub mod placement;
pub mod record;
pub mod reference;
pub mod revcomp;
pub mod seed;
pub mod verify;
pub mod worker;

pub use config::Config;
pub use error::MapperError;
pub use index::SeedIndex;
pub use reference::ReferenceDb;

use std::path::PathBuf;

use worker::WorkerOutputs;

/// Runs the full pipeline: build the reference index, partition the input,
/// run one worker thread per partition, then merge the shards into the
/// final output files.
pub fn run(config: &Config) -> Result<(), MapperError> {
    log::info!("loading reference database from {}", config.reference_path.display());
    let refs = ReferenceDb::from_fasta(&config.reference_path, config.mask_lower, config.k)?;
    log::info!("{} reference sequence(s) loaded", refs.len());

    log::info!("building k={} seed index", config.k);
    let index = SeedIndex::build(&refs, config.k);
    log::info!("{} distinct k-mer bucket(s)", index.num_buckets());

    let chunks = partition::partition(config.r1_path.as_deref(), config.r2_path.as_deref(), config.threads)?;
    log::info!("partitioned input into {} worker chunk(s)", chunks.len());

    let tmp_dir = config.out_basename.parent().map(PathBuf::from).filter(|p| !p.as_os_str().is_empty());
    let tmp_dir = tmp_dir.unwrap_or_else(|| PathBuf::from("."));
    let base_name = config
        .out_basename
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("seedmap_out")
        .to_string();

    let mut bed_shards = Vec::with_capacity(chunks.len());
    let mut r1_shards = Vec::with_capacity(chunks.len());
    let mut r2_shards = Vec::with_capacity(chunks.len());
    let mut worker_outputs = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        let bed = tmp_dir.join(format!("{base_name}.{}.bed.shard", chunk.id));
        let r1o = tmp_dir.join(format!("{base_name}.{}.R1.fastq.shard", chunk.id));
        let r2o = tmp_dir.join(format!("{base_name}.{}.R2.fastq.shard", chunk.id));
        bed_shards.push(bed.clone());
        r1_shards.push(r1o.clone());
        r2_shards.push(r2o.clone());
        worker_outputs.push(WorkerOutputs { bed_path: bed, r1_path: r1o, r2_path: r2o });
    }

    std::thread::scope(|scope| -> Result<(), MapperError> {
        let mut handles = Vec::with_capacity(chunks.len());
        for (chunk, outputs) in chunks.iter().zip(worker_outputs.iter()) {
            let chunk = *chunk;
            let outputs = outputs.clone();
            let index = &index;
            let refs = &refs;
            handles.push(scope.spawn(move || worker::run_worker(&chunk, config, index, refs, &outputs)));
        }
        for h in handles {
            h.join().map_err(|_| MapperError::Config("worker thread panicked".into()))??;
        }
        Ok(())
    })?;

    log::info!("merging {} worker shard set(s)", chunks.len());
    merge::merge_shards(&bed_shards, &config.bed_path())?;
    merge::merge_shards(&r1_shards, &config.r1_out_path())?;
    merge::merge_shards(&r2_shards, &config.r2_out_path())?;

    Ok(())
}
