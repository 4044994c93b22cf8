//! Reference genome sequence access.

mod memory;

pub use memory::InMemoryGenome;

use crate::error::Error;

/// Source of reference sequence for the annotator.
///
/// Coordinates are 1-based and inclusive. A request with `end < start`
/// yields an empty string; an unknown chromosome or a range running past
/// either end of the chromosome fails with [`Error::SequenceUnavailable`].
pub trait ReferenceGenome {
    fn get_sequence(&self, chromosome: &str, start: i64, end: i64) -> Result<String, Error>;

    fn has_chromosome(&self, chromosome: &str) -> bool;
}
