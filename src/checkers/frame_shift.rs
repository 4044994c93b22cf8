//! Indels inside the CDS: frame-shifting or in-frame.

use crate::effect::{Effect, EffectType};
use crate::error::Error;
use crate::request::AnnotationRequest;

use super::overlaps_cds;
use super::stop_loss::first_stop;

pub(super) fn effect(request: &dyn AnnotationRequest) -> Result<Option<Effect>, Error> {
    let variant = request.variant();
    let ref_len = variant.reference.len();
    let alt_len = variant.alternate.len();
    if !overlaps_cds(request) {
        return Ok(None);
    }

    if ref_len == alt_len {
        return stop_moved(request);
    }
    if ref_len.abs_diff(alt_len) % 3 != 0 {
        return Effect::with_aa_change(EffectType::FrameShift, request).map(Some);
    }

    let (reference, alternate) = request.amino_acids()?;
    let new_stop = match (first_stop(reference), first_stop(alternate)) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(ref_stop), Some(alt_stop)) => alt_stop < ref_stop,
    };
    in_frame(new_stop, request).map(Some)
}

/// Equal-length change whose codon windows both hold a stop, at different
/// indexes. Other substitutions are left to the protein-change checker.
fn stop_moved(request: &dyn AnnotationRequest) -> Result<Option<Effect>, Error> {
    let (reference, alternate) = request.amino_acids()?;
    match (first_stop(reference), first_stop(alternate)) {
        (Some(ref_stop), Some(alt_stop)) if ref_stop != alt_stop => {
            in_frame(alt_stop < ref_stop, request).map(Some)
        }
        _ => Ok(None),
    }
}

fn in_frame(new_stop: bool, request: &dyn AnnotationRequest) -> Result<Effect, Error> {
    let kind = if new_stop {
        EffectType::NoFrameShiftNewStop
    } else {
        EffectType::NoFrameShift
    };
    Effect::with_aa_change(kind, request)
}
