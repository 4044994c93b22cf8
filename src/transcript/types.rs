//! Transcript model types.

use crate::strand::Strand;

/// An exon, or an exon clipped to the coding sequence.
///
/// Coordinates are 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exon {
    pub start: i64,
    pub stop: i64,
    /// Codon offset (0, 1, 2) of the exon's 5'-most coding base; `None` for
    /// exons without coding sequence.
    pub frame: Option<u8>,
    /// Position of the exon in genomic order.
    pub index: usize,
}

impl Exon {
    #[must_use]
    pub fn len(&self) -> i64 {
        self.stop - self.start + 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stop < self.start
    }

    #[must_use]
    pub fn contains(&self, pos: i64) -> bool {
        self.start <= pos && pos <= self.stop
    }

    /// True when `[start, end]` shares at least one base with the exon.
    #[must_use]
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        self.start <= end && start <= self.stop
    }
}

/// Coding sequence bounds, inclusive and in genomic orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cds {
    pub start: i64,
    pub end: i64,
}

/// A transcript with its exon structure.
///
/// Built through [`TranscriptModel::new`], which validates the structure and
/// precomputes exon frames and the CDS regions. Read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptModel {
    pub(crate) gene: String,
    pub(crate) transcript_id: String,
    pub(crate) chromosome: String,
    pub(crate) strand: Strand,
    pub(crate) exons: Vec<Exon>,
    pub(crate) cds: Option<Cds>,
    pub(crate) cds_regions: Vec<Exon>,
}

impl TranscriptModel {
    #[must_use]
    pub fn gene(&self) -> &str {
        &self.gene
    }

    #[must_use]
    pub fn transcript_id(&self) -> &str {
        &self.transcript_id
    }

    #[must_use]
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    #[must_use]
    pub fn strand(&self) -> Strand {
        self.strand
    }

    #[must_use]
    pub fn is_coding(&self) -> bool {
        self.cds.is_some()
    }

    /// All exons in genomic order.
    #[must_use]
    pub fn exons(&self) -> &[Exon] {
        &self.exons
    }

    #[must_use]
    pub fn cds(&self) -> Option<Cds> {
        self.cds
    }

    /// CDS bounds, or an empty span just past the transcript end for
    /// non-coding transcripts.
    #[must_use]
    pub fn cds_span(&self) -> Cds {
        self.cds.unwrap_or(Cds {
            start: self.tx_end() + 1,
            end: self.tx_end(),
        })
    }

    /// Exons clipped to the CDS, in transcript reading order.
    #[must_use]
    pub fn cds_regions(&self) -> &[Exon] {
        &self.cds_regions
    }

    #[must_use]
    pub fn first_exon(&self) -> &Exon {
        &self.exons[0]
    }

    #[must_use]
    pub fn last_exon(&self) -> &Exon {
        &self.exons[self.exons.len() - 1]
    }

    #[must_use]
    pub fn tx_start(&self) -> i64 {
        self.first_exon().start
    }

    #[must_use]
    pub fn tx_end(&self) -> i64 {
        self.last_exon().stop
    }

    #[must_use]
    pub fn exonic_length(&self) -> i64 {
        self.exons.iter().map(Exon::len).sum()
    }

    #[must_use]
    pub fn coding_length(&self) -> i64 {
        self.cds_regions.iter().map(Exon::len).sum()
    }

    #[must_use]
    pub fn intron_count(&self) -> usize {
        self.exons.len() - 1
    }

    /// True when `[start, end]` intersects the transcript span.
    #[must_use]
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        self.tx_start() <= end && start <= self.tx_end()
    }
}
