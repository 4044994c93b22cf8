//! Transcript models and the per-chromosome transcript index.

mod construction;
mod index;
mod types;

pub use construction::TranscriptRecord;
pub use index::{GeneModelIndex, GeneModels};
pub use types::{Cds, Exon, TranscriptModel};
