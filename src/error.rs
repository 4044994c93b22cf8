//! Error types for the effect annotator.

use thiserror::Error;

/// Errors that can occur while annotating variants.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A JSON document could not be decoded.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A parse error occurred while reading input data.
    #[error("{0}")]
    Parse(String),

    /// The caller supplied a variant or location that cannot be annotated.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A nucleotide outside {A, C, G, T, N} was seen.
    #[error("invalid nucleotide: '{0}'")]
    InvalidNucleotide(char),

    /// The reference genome has no sequence for the requested range.
    #[error("sequence unavailable for {chromosome}:{start}-{end}")]
    SequenceUnavailable {
        chromosome: String,
        start: i64,
        end: i64,
    },

    /// The codon walk anchor does not map to any exon of the transcript.
    /// Signals a malformed transcript model rather than a variant case.
    #[error("no coding region found for position {position} in transcript {transcript_id}")]
    NoCodingRegionFound {
        transcript_id: String,
        position: i64,
    },

    /// A transcript model violates its structural invariants.
    #[error("malformed transcript: {0}")]
    MalformedTranscript(String),
}
