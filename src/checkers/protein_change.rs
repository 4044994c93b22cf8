//! Equal-length substitutions inside the CDS, classified by translation.

use crate::effect::{Effect, EffectType};
use crate::error::Error;
use crate::request::AnnotationRequest;

pub(super) fn effect(request: &dyn AnnotationRequest) -> Result<Option<Effect>, Error> {
    let variant = request.variant();
    if variant.reference.len() != variant.alternate.len() || variant.reference.is_empty() {
        return Ok(None);
    }
    let in_cds = request
        .transcript()
        .cds_regions()
        .iter()
        .any(|region| region.contains(variant.position));
    if !in_cds {
        return Ok(None);
    }

    let (reference, alternate) = request.amino_acids()?;
    let gains_stop =
        alternate.iter().any(|aa| aa.is_stop()) && !reference.iter().any(|aa| aa.is_stop());
    let kind = if gains_stop {
        EffectType::Nonsense
    } else if reference.iter().chain(alternate).any(|aa| aa.is_unknown()) {
        EffectType::CodingUnknown
    } else if reference == alternate {
        EffectType::Synonymous
    } else {
        EffectType::Missense
    };
    Effect::with_aa_change(kind, request).map(Some)
}
