//! Ordered effect classification chain.
//!
//! Each checker inspects one annotation request and yields at most one
//! effect. The chain runs in [`CHECKER_ORDER`] and stops at the first effect;
//! the order is part of the classification rules, e.g. a splice-site hit wins
//! over a frame-shift inside the same window.

mod coding;
mod frame_shift;
mod intron;
mod promoter;
mod protein_change;
mod splice_site;
mod start_loss;
mod stop_loss;
mod utr;

use std::fmt;

use tracing::debug;

use crate::effect::Effect;
use crate::error::Error;
use crate::request::AnnotationRequest;

/// One classifier of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckerKind {
    Promoter,
    Coding,
    SpliceSite,
    StartLoss,
    StopLoss,
    FrameShift,
    ProteinChange,
    Utr,
    Intron,
}

/// Fixed evaluation order of the checkers.
pub const CHECKER_ORDER: [CheckerKind; 9] = [
    CheckerKind::Promoter,
    CheckerKind::Coding,
    CheckerKind::SpliceSite,
    CheckerKind::StartLoss,
    CheckerKind::StopLoss,
    CheckerKind::FrameShift,
    CheckerKind::ProteinChange,
    CheckerKind::Utr,
    CheckerKind::Intron,
];

impl CheckerKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Promoter => "promoter",
            Self::Coding => "coding",
            Self::SpliceSite => "splice-site",
            Self::StartLoss => "start-loss",
            Self::StopLoss => "stop-loss",
            Self::FrameShift => "frame-shift",
            Self::ProteinChange => "protein-change",
            Self::Utr => "utr",
            Self::Intron => "intron",
        }
    }

    /// Effect this checker assigns, if it applies.
    pub fn effect(self, request: &dyn AnnotationRequest) -> Result<Option<Effect>, Error> {
        match self {
            Self::Promoter => Ok(promoter::effect(request)),
            Self::Coding => Ok(coding::effect(request)),
            Self::SpliceSite => Ok(splice_site::effect(request)),
            Self::StartLoss => Ok(start_loss::effect(request)),
            Self::StopLoss => stop_loss::effect(request),
            Self::FrameShift => frame_shift::effect(request),
            Self::ProteinChange => protein_change::effect(request),
            Self::Utr => Ok(utr::effect(request)),
            Self::Intron => Ok(intron::effect(request)),
        }
    }
}

impl fmt::Display for CheckerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run the chain and return the first effect with the checker that produced it.
///
/// Non-coding transcripts stop after the coding checker.
pub fn classify(
    request: &dyn AnnotationRequest,
) -> Result<Option<(CheckerKind, Effect)>, Error> {
    for kind in CHECKER_ORDER {
        if let Some(effect) = kind.effect(request)? {
            debug!(checker = %kind, effect = %effect.effect, "checker matched");
            return Ok(Some((kind, effect)));
        }
        if kind == CheckerKind::Coding && !request.transcript().is_coding() {
            break;
        }
    }
    Ok(None)
}

/// An intron between two consecutive exons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Intron {
    /// Last base of the 5' exon in genomic order.
    pub start: i64,
    /// First base of the 3' exon in genomic order.
    pub end: i64,
    /// Genomic-order index of the exon starting at `end`.
    pub index: usize,
}

/// Introns of the request's transcript, in genomic order.
pub(crate) fn introns(request: &dyn AnnotationRequest) -> impl Iterator<Item = Intron> + '_ {
    request
        .transcript()
        .exons()
        .windows(2)
        .enumerate()
        .map(|(i, pair)| Intron {
            start: pair[0].stop,
            end: pair[1].start,
            index: i + 1,
        })
}

/// The intron that fully contains the variant span, if any.
pub(crate) fn enclosing_intron(request: &dyn AnnotationRequest) -> Option<Intron> {
    let variant = request.variant();
    let last = variant.corrected_ref_position_last();
    introns(request).find(|intron| intron.start < variant.position && last < intron.end)
}

/// True when the variant span shares a base with any exon.
pub(crate) fn overlaps_exon(request: &dyn AnnotationRequest) -> bool {
    let variant = request.variant();
    let last = variant.corrected_ref_position_last();
    request
        .transcript()
        .exons()
        .iter()
        .any(|exon| exon.overlaps(variant.position, last))
}

/// True when the variant span shares a base with any CDS region.
pub(crate) fn overlaps_cds(request: &dyn AnnotationRequest) -> bool {
    let variant = request.variant();
    let last = variant.corrected_ref_position_last();
    request
        .transcript()
        .cds_regions()
        .iter()
        .any(|region| region.overlaps(variant.position, last))
}
