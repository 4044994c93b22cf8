//! Reference genome held fully in memory.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::Error;
use crate::fasta::read_fasta_file;
use crate::reference::ReferenceGenome;

/// Chromosome sequences keyed by name, stored as upper-case bytes.
#[derive(Debug, Default, Clone)]
pub struct InMemoryGenome {
    sequences: HashMap<String, Vec<u8>>,
}

impl InMemoryGenome {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every record of a plain or gzip-compressed FASTA file.
    pub fn from_fasta_path(path: &Path) -> Result<Self, Error> {
        let mut genome = Self::new();
        for (name, sequence) in read_fasta_file(path)? {
            debug!(chromosome = %name, bases = sequence.len(), "loaded reference sequence");
            genome.sequences.insert(name, sequence);
        }
        Ok(genome)
    }

    /// Add or replace a chromosome sequence.
    pub fn insert(&mut self, chromosome: &str, sequence: &str) {
        self.sequences
            .insert(chromosome.to_string(), sequence.to_ascii_uppercase().into_bytes());
    }

    #[must_use]
    pub fn chromosome_length(&self, chromosome: &str) -> Option<usize> {
        self.sequences.get(chromosome).map(Vec::len)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl ReferenceGenome for InMemoryGenome {
    fn get_sequence(&self, chromosome: &str, start: i64, end: i64) -> Result<String, Error> {
        let unavailable = || Error::SequenceUnavailable {
            chromosome: chromosome.to_string(),
            start,
            end,
        };
        let sequence = self.sequences.get(chromosome).ok_or_else(unavailable)?;
        if end < start {
            return Ok(String::new());
        }
        if start < 1 || end > sequence.len() as i64 {
            return Err(unavailable());
        }
        let bases = &sequence[(start - 1) as usize..end as usize];
        Ok(String::from_utf8_lossy(bases).into_owned())
    }

    fn has_chromosome(&self, chromosome: &str) -> bool {
        self.sequences.contains_key(chromosome)
    }
}
