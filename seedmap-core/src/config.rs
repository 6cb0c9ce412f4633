//! The validated, immutable configuration shared by reference across
//! worker threads.

use std::path::{Path, PathBuf};

use crate::error::MapperError;
use crate::placement::Mode;

#[derive(Debug, Clone)]
pub struct Config {
    pub reference_path: PathBuf,
    pub r1_path: Option<PathBuf>,
    pub r2_path: Option<PathBuf>,
    pub out_basename: PathBuf,
    pub mode: Mode,
    pub k: usize,
    pub max_mismatch_pct: u8,
    pub step: usize,
    pub threads: usize,
    pub diff: bool,
    pub disjoin: bool,
    pub ignore_n: bool,
    pub mask_lower: bool,
    pub bed_out: bool,
    pub fastq_out: bool,
    pub quiet: bool,
    pub eval_n: usize,
}

#[allow(clippy::too_many_arguments)]
impl Config {
    pub fn new(
        reference_path: PathBuf,
        r1_path: Option<PathBuf>,
        r2_path: Option<PathBuf>,
        out_basename: PathBuf,
        mode: Mode,
        k: usize,
        max_mismatch_pct: u8,
        step: usize,
        threads: usize,
        diff: bool,
        disjoin: bool,
        ignore_n: bool,
        mask_lower: bool,
        bed_out: bool,
        fastq_out: bool,
        quiet: bool,
        eval_n: usize,
    ) -> Result<Self, MapperError> {
        if !crate::fingerprint::is_valid_k(k) {
            return Err(MapperError::Config(format!("-k must be one of 9, 11, 13, 15 (got {k})")));
        }
        if max_mismatch_pct > 99 {
            return Err(MapperError::Config(format!("-m must be in 0..=99 (got {max_mismatch_pct})")));
        }
        if step < 1 {
            return Err(MapperError::Config("-s must be >= 1".into()));
        }
        if threads < 1 {
            return Err(MapperError::Config("-t must be >= 1".into()));
        }

        if mode.is_paired() && (r1_path.is_none() || r2_path.is_none()) {
            return Err(MapperError::Config(format!("library mode {mode} requires both -R1 and -R2")));
        }
        if !mode.is_paired() && r1_path.is_none() && r2_path.is_none() {
            return Err(MapperError::Config("at least one of -R1 or -R2 is required".into()));
        }

        if let Some(parent) = out_basename.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(MapperError::Config(format!(
                    "output directory '{}' does not exist",
                    parent.display()
                )));
            }
        }

        let mut disjoin = disjoin;
        if eval_n > 0 && disjoin {
            log::warn!("-e forces --disjoin off");
            disjoin = false;
        }
        if diff && bed_out {
            log::warn!("--diff disables BED output for this run (interval output requires DIFF off)");
        }

        Ok(Config {
            reference_path,
            r1_path,
            r2_path,
            out_basename,
            mode,
            k,
            max_mismatch_pct,
            step,
            threads,
            diff,
            disjoin,
            ignore_n,
            mask_lower,
            bed_out,
            fastq_out,
            quiet,
            eval_n,
        })
    }

    pub fn bed_path(&self) -> PathBuf {
        with_suffix(&self.out_basename, ".bed")
    }

    pub fn r1_out_path(&self) -> PathBuf {
        with_suffix(&self.out_basename, "_R1.fastq")
    }

    pub fn r2_out_path(&self) -> PathBuf {
        with_suffix(&self.out_basename, "_R2.fastq")
    }
}

fn with_suffix(basename: &Path, suffix: &str) -> PathBuf {
    let mut s = basename.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(mode: Mode, r1: Option<&str>, r2: Option<&str>) -> Result<Config, MapperError> {
        Config::new(
            PathBuf::from("ref.fa"),
            r1.map(PathBuf::from),
            r2.map(PathBuf::from),
            PathBuf::from("out"),
            mode,
            15,
            15,
            17,
            1,
            false,
            false,
            false,
            false,
            true,
            true,
            false,
            0,
        )
    }

    #[test]
    fn paired_mode_requires_both_mates() {
        assert!(base(Mode::Isf, Some("r1.fq"), None).is_err());
        assert!(base(Mode::Isf, Some("r1.fq"), Some("r2.fq")).is_ok());
    }

    #[test]
    fn single_mode_requires_at_least_one_mate() {
        assert!(base(Mode::Sf, None, None).is_err());
        assert!(base(Mode::Sf, Some("r1.fq"), None).is_ok());
    }

    #[test]
    fn invalid_k_is_rejected() {
        let err = Config::new(
            PathBuf::from("ref.fa"), Some(PathBuf::from("r1.fq")), None, PathBuf::from("out"),
            Mode::Sf, 10, 15, 17, 1, false, false, false, false, true, true, false, 0,
        )
        .unwrap_err();
        assert!(matches!(err, MapperError::Config(_)));
    }

    #[test]
    fn eval_forces_disjoin_off() {
        let cfg = Config::new(
            PathBuf::from("ref.fa"), Some(PathBuf::from("r1.fq")), Some(PathBuf::from("r2.fq")), PathBuf::from("out"),
            Mode::Isf, 15, 15, 17, 1, false, true, false, false, true, true, false, 3,
        )
        .unwrap();
        assert!(!cfg.disjoin);
    }

    #[test]
    fn output_paths_embed_suffixes() {
        let cfg = base(Mode::Sf, Some("r1.fq"), None).unwrap();
        assert_eq!(cfg.bed_path(), PathBuf::from("out.bed"));
        assert_eq!(cfg.r1_out_path(), PathBuf::from("out_R1.fastq"));
        assert_eq!(cfg.r2_out_path(), PathBuf::from("out_R2.fastq"));
    }
}
