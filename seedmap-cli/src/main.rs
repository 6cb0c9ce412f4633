mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use seedmap_core::config::Config;
use seedmap_core::placement::Mode;

/// `-R1`/`-R2` are single-dash flags, but clap's `long()` always renders
/// with a double dash. Rewrite the two tokens before clap ever sees argv
/// so the single-dash form on the command line still works.
fn normalize_single_dash_mate_flags(args: impl Iterator<Item = String>) -> Vec<String> {
    args.map(|arg| match arg.as_str() {
        "-R1" => "--R1".to_string(),
        "-R2" => "--R2".to_string(),
        _ if arg.starts_with("-R1=") => format!("-{arg}"),
        _ if arg.starts_with("-R2=") => format!("-{arg}"),
        _ => arg,
    })
    .collect()
}

fn main() {
    let argv = normalize_single_dash_mate_flags(std::env::args());
    let args = match cli::Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(err) => {
            // try_parse_from surfaces --help/--version text and usage errors
            // alike as an `Err`; print whichever it is and exit 1, rather than
            // letting clap's own `Parser::parse()` exit 0 on help or 2 on a
            // bad argument.
            let _ = err.print();
            std::process::exit(1);
        }
    };

    let log_level = if args.quiet { log::LevelFilter::Error } else { log::LevelFilter::Info };
    env_logger::Builder::new().filter_level(log_level).init();

    if let Err(err) = run(args) {
        log::error!("[Error] {err:#}");
        std::process::exit(1);
    }
}

fn run(args: cli::Args) -> Result<()> {
    let mode = Mode::parse(&args.mode).with_context(|| {
        format!("-l must be one of ISF, ISR, IU, OSF, OSR, OU, SF, SR, U (got '{}')", args.mode)
    })?;

    let config = Config::new(
        args.reference,
        args.r1,
        args.r2,
        args.out,
        mode,
        args.k,
        args.max_mismatch_pct,
        args.step,
        args.threads,
        args.diff,
        args.disjoin,
        args.ignore_n,
        args.mask_lower,
        !args.no_bed,
        !args.no_fastq,
        args.quiet,
        args.eval_n,
    )
    .context("invalid configuration")?;

    seedmap_core::run(&config).context("mapping run failed")?;
    Ok(())
}
