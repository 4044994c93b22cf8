//! Transcript lookup by genomic interval.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::error::Error;

use super::construction::TranscriptRecord;
use super::types::TranscriptModel;

/// Gene-model collection queried by the annotator.
pub trait GeneModels {
    /// Transcripts on `chromosome` whose span intersects `[begin, end]`.
    fn transcripts_overlapping(&self, chromosome: &str, begin: i64, end: i64)
    -> Vec<&TranscriptModel>;

    /// True when at least one transcript lies on `chromosome`.
    fn has_chromosome(&self, chromosome: &str) -> bool;
}

/// Transcripts grouped by chromosome, each group sorted by transcript start.
#[derive(Debug, Default, Clone)]
pub struct GeneModelIndex {
    by_chromosome: HashMap<String, Vec<TranscriptModel>>,
}

impl GeneModelIndex {
    #[must_use]
    pub fn new(transcripts: Vec<TranscriptModel>) -> Self {
        let mut by_chromosome: HashMap<String, Vec<TranscriptModel>> = HashMap::new();
        for tm in transcripts {
            by_chromosome.entry(tm.chromosome.clone()).or_default().push(tm);
        }
        for group in by_chromosome.values_mut() {
            group.sort_by_key(TranscriptModel::tx_start);
        }
        Self { by_chromosome }
    }

    /// Load a JSON array of transcript records.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let records: Vec<TranscriptRecord> = serde_json::from_reader(reader)?;
        let transcripts = records
            .into_iter()
            .map(TranscriptModel::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(transcripts = transcripts.len(), "loaded gene models");
        Ok(Self::new(transcripts))
    }

    pub fn from_json_path(path: &Path) -> Result<Self, Error> {
        Self::from_json_reader(BufReader::new(File::open(path)?))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_chromosome.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_chromosome.is_empty()
    }

    #[must_use]
    pub fn chromosome_count(&self) -> usize {
        self.by_chromosome.len()
    }
}

impl GeneModels for GeneModelIndex {
    fn transcripts_overlapping(
        &self,
        chromosome: &str,
        begin: i64,
        end: i64,
    ) -> Vec<&TranscriptModel> {
        let Some(group) = self.by_chromosome.get(chromosome) else {
            return Vec::new();
        };
        group
            .iter()
            .take_while(|tm| tm.tx_start() <= end)
            .filter(|tm| tm.overlaps(begin, end))
            .collect()
    }

    fn has_chromosome(&self, chromosome: &str) -> bool {
        self.by_chromosome.contains_key(chromosome)
    }
}
