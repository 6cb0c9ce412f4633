//! Concatenates worker shards into the final output files, in worker
//! order, then removes empty final outputs.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::MapperError;

pub fn merge_shards(shard_paths: &[PathBuf], final_path: &Path) -> Result<(), MapperError> {
    {
        let mut out = File::create(final_path)?;
        for shard in shard_paths {
            let mut input = File::open(shard)?;
            io::copy(&mut input, &mut out)?;
        }
    }
    for shard in shard_paths {
        fs::remove_file(shard)?;
    }
    if fs::metadata(final_path)?.len() == 0 {
        fs::remove_file(final_path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn concatenates_shards_in_order_and_removes_them() {
        let dir = tempdir().unwrap();
        let shard_paths: Vec<PathBuf> = (0..3)
            .map(|i| {
                let p = dir.path().join(format!("shard{i}"));
                let mut f = File::create(&p).unwrap();
                write!(f, "part{i}").unwrap();
                p
            })
            .collect();

        let final_path = dir.path().join("final.txt");
        merge_shards(&shard_paths, &final_path).unwrap();

        let contents = fs::read_to_string(&final_path).unwrap();
        assert_eq!(contents, "part0part1part2");
        for p in &shard_paths {
            assert!(!p.exists());
        }
    }

    #[test]
    fn removes_zero_byte_final_output() {
        let dir = tempdir().unwrap();
        let shard_paths: Vec<PathBuf> = (0..2)
            .map(|i| {
                let p = dir.path().join(format!("empty{i}"));
                File::create(&p).unwrap();
                p
            })
            .collect();

        let final_path = dir.path().join("final_empty.txt");
        merge_shards(&shard_paths, &final_path).unwrap();
        assert!(!final_path.exists());
    }
}
