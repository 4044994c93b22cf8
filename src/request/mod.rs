//! Strand-aware view of one variant against one transcript.
//!
//! An [`AnnotationRequest`] answers the coordinate questions the effect
//! checkers ask: where the variant falls in the protein, which codons it
//! touches, and whether it overlaps the start or stop codon. The forward and
//! reverse strand implementations mirror each other because the 5' direction
//! flips with the strand.

mod negative;
mod positive;

use std::cell::OnceCell;

use tracing::debug;

use crate::codon::{AminoAcid, CodonTable};
use crate::error::Error;
use crate::reference::ReferenceGenome;
use crate::transcript::{Cds, Exon, TranscriptModel};
use crate::variant::Variant;

pub use negative::NegativeStrandRequest;
pub use positive::PositiveStrandRequest;

type AminoAcidPair = (Vec<AminoAcid>, Vec<AminoAcid>);

/// Collaborators and settings shared by both strand implementations.
pub struct RequestContext<'a> {
    pub variant: &'a Variant,
    pub transcript: &'a TranscriptModel,
    pub genome: &'a dyn ReferenceGenome,
    pub code: &'a CodonTable,
    pub promoter_len: i64,
    pub splice_site_length: i64,
    amino_acids: OnceCell<AminoAcidPair>,
}

impl<'a> RequestContext<'a> {
    #[must_use]
    pub fn new(
        variant: &'a Variant,
        transcript: &'a TranscriptModel,
        genome: &'a dyn ReferenceGenome,
        code: &'a CodonTable,
        promoter_len: i64,
        splice_site_length: i64,
    ) -> Self {
        Self {
            variant,
            transcript,
            genome,
            code,
            promoter_len,
            splice_site_length,
            amino_acids: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn cds(&self) -> Cds {
        self.transcript.cds_span()
    }

    #[must_use]
    pub fn exons(&self) -> &'a [Exon] {
        self.transcript.exons()
    }

    /// Reference sequence on the transcript's chromosome; empty when `end < start`.
    pub fn sequence(&self, start: i64, end: i64) -> Result<String, Error> {
        if end < start {
            return Ok(String::new());
        }
        self.genome
            .get_sequence(self.transcript.chromosome(), start, end)
    }

    fn clamp_in_cds(&self, pos: i64) -> i64 {
        let cds = self.cds();
        pos.max(cds.start).min(cds.end)
    }
}

/// Questions the effect checkers ask about a (variant, transcript) pair.
pub trait AnnotationRequest {
    fn context(&self) -> &RequestContext<'_>;

    /// Number of coding bases between the CDS 5' end and `pos`.
    fn coding_nucleotide_position(&self, pos: i64) -> i64;

    /// 1-based first and last amino acid touched by the variant.
    fn protein_position(&self) -> (i64, i64);

    /// Protein length in amino acids, excluding the stop codon.
    fn protein_length(&self) -> i64;

    /// Reference and alternate nucleotide windows padded to whole codons,
    /// in genomic orientation.
    fn codons(&self) -> Result<(String, String), Error>;

    /// Translate a codon window produced by [`Self::codons`] in reading order.
    fn translate(&self, codons: &str) -> Vec<AminoAcid>;

    fn is_start_codon_affected(&self) -> bool;

    fn is_stop_codon_affected(&self) -> bool;

    fn has_utr5_region(&self) -> bool;

    fn has_utr3_region(&self) -> bool;

    fn variant(&self) -> &Variant {
        self.context().variant
    }

    fn transcript(&self) -> &TranscriptModel {
        self.context().transcript
    }

    /// Amino acid index of a genomic position, `None` outside the CDS.
    fn protein_position_for_pos(&self, pos: i64) -> Option<i64> {
        let cds = self.context().cds();
        if pos < cds.start || pos > cds.end {
            return None;
        }
        Some(self.coding_nucleotide_position(pos) / 3 + 1)
    }

    /// Translated codon windows, computed once per request.
    fn amino_acids(&self) -> Result<(&[AminoAcid], &[AminoAcid]), Error> {
        let cache = &self.context().amino_acids;
        let pair = match cache.get() {
            Some(pair) => pair,
            None => {
                let (ref_codons, alt_codons) = self.codons()?;
                let translated = (self.translate(&ref_codons), self.translate(&alt_codons));
                cache.get_or_init(|| translated)
            }
        };
        Ok((&pair.0, &pair.1))
    }

    /// Index of the exon containing `pos`, or of an exon it touches from
    /// one base outside.
    fn coding_region_for_pos(&self, pos: i64) -> Option<usize> {
        coding_region_for_pos(self.context().exons(), pos)
    }

    /// Transcript length over exons.
    fn exonic_length(&self) -> i64 {
        let tm = self.transcript();
        exonic_distance(tm.exons(), tm.tx_start(), tm.tx_end()) + 1
    }

    /// 1-based exonic offset of the variant from the transcript's first base.
    fn exonic_position(&self) -> i64 {
        let tm = self.transcript();
        exonic_distance(tm.exons(), tm.tx_start(), self.variant().position) + 1
    }

    fn exonic_distance(&self, start: i64, end: i64) -> i64 {
        exonic_distance(self.transcript().exons(), start, end)
    }
}

/// Build the strand-specific request for a variant against a transcript.
#[must_use]
pub fn build_request<'a>(context: RequestContext<'a>) -> Box<dyn AnnotationRequest + 'a> {
    if context.transcript.strand().is_reverse() {
        Box::new(NegativeStrandRequest::new(context))
    } else {
        Box::new(PositiveStrandRequest::new(context))
    }
}

/// Bases needed to extend `length` to a whole number of codons.
#[must_use]
pub fn to_full_codon(length: i64) -> i64 {
    (3 - length.rem_euclid(3)) % 3
}

pub(crate) fn coding_region_for_pos(exons: &[Exon], pos: i64) -> Option<usize> {
    let mut close_match = None;
    for (i, exon) in exons.iter().enumerate() {
        if exon.contains(pos) {
            return Some(i);
        }
        if exon.start - 1 <= pos && pos <= exon.stop + 1 {
            close_match = Some(i);
        }
    }
    close_match
}

/// Exonic bases between two genomic positions.
///
/// Exons preceding the one that holds `start` are counted in full.
pub(crate) fn exonic_distance(exons: &[Exon], start: i64, end: i64) -> i64 {
    let mut length = 0;
    for exon in exons {
        if exon.contains(start) {
            if exon.contains(end) {
                return end - start;
            }
            length = exon.stop - start + 1;
        } else {
            length += exon.len();
        }
        if exon.contains(end) {
            length -= exon.stop - end + 1;
            break;
        }
    }
    length
}

/// Transcribed sequence starting at `pos` (or at the start of exon `index`
/// when `pos` is `None`), continuing through later exons until `length`
/// bases are collected.
///
/// Flanking sequence is read only when `pos` already lies past the last
/// exon; running out of exons mid-walk is a `NoCodingRegionFound` error.
pub(crate) fn coding_right(
    ctx: &RequestContext<'_>,
    pos: Option<i64>,
    length: i64,
    index: usize,
) -> Result<String, Error> {
    debug!(?pos, length, index, "coding_right");
    let exons = ctx.exons();
    let last = ctx.transcript.last_exon();
    let mut collected = String::new();
    let (mut pos, mut remaining, mut index) = (pos, length, index);

    while remaining > 0 {
        if let Some(p) = pos.filter(|&p| p > last.stop) {
            collected.push_str(&ctx.sequence(p, p + remaining - 1)?);
            break;
        }
        let exon = exons.get(index).ok_or_else(|| Error::NoCodingRegionFound {
            transcript_id: ctx.transcript.transcript_id().to_string(),
            position: pos.unwrap_or(last.stop),
        })?;
        let start = pos.unwrap_or(exon.start);
        let end = (start + remaining - 1).min(exon.stop);
        let seq = ctx.sequence(start, end)?;
        remaining -= seq.len() as i64;
        collected.push_str(&seq);
        pos = None;
        index += 1;
    }
    Ok(collected)
}

/// Transcribed sequence ending at `pos` (or at the end of exon `index` when
/// `pos` is `None`), continuing through earlier exons until `length` bases
/// are collected.
pub(crate) fn coding_left(
    ctx: &RequestContext<'_>,
    pos: Option<i64>,
    length: i64,
    index: usize,
) -> Result<String, Error> {
    debug!(?pos, length, index, "coding_left");
    let exons = ctx.exons();
    let first = ctx.transcript.first_exon();
    let mut pieces: Vec<String> = Vec::new();
    let (mut pos, mut remaining, mut index) = (pos, length, index);

    while remaining > 0 {
        if let Some(p) = pos.filter(|&p| p < first.start) {
            pieces.push(ctx.sequence(p - remaining + 1, p)?);
            break;
        }
        let exon = exons.get(index).ok_or_else(|| Error::NoCodingRegionFound {
            transcript_id: ctx.transcript.transcript_id().to_string(),
            position: pos.unwrap_or(first.start),
        })?;
        let end = pos.unwrap_or(exon.stop);
        let start = (end - remaining + 1).max(exon.start);
        let seq = ctx.sequence(start, end)?;
        remaining -= seq.len() as i64;
        pieces.push(seq);

        if index == 0 {
            if remaining > 0 {
                pieces.push(ctx.sequence(exon.start - remaining, exon.start - 1)?);
            }
            break;
        }
        pos = None;
        index -= 1;
    }

    pieces.reverse();
    Ok(pieces.concat())
}
