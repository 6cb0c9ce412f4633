use thiserror::Error;

/// Errors surfaced by the mapping engine.
///
/// Construction-time errors (malformed reference, bad configuration) are
/// fatal by convention; callers should propagate them to the process exit
/// path rather than attempt partial recovery.
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("reference database contains no sequences")]
    EmptyReference,

    #[error("duplicate reference header: {0}")]
    DuplicateHeader(String),

    #[error("reference sequence '{0}' has length {1}, shorter than k={2}")]
    SequenceTooShort(String, usize, usize),

    #[error("malformed FASTA input: {0}")]
    MalformedFasta(String),

    #[error("malformed FASTQ record: {0}")]
    MalformedFastq(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
