//! Splice site: variant within the splice window of an intron inside the CDS.
//!
//! An insertion at `position` lands between `position - 1` and `position`,
//! so on the acceptor side the window is shifted by one: an insertion right
//! before the exon's first base is a splice-site hit, matching the donor
//! side where an insertion right after the exon's last base is one.

use crate::effect::{Effect, EffectType};
use crate::request::AnnotationRequest;

use super::introns;

pub(super) fn effect(request: &dyn AnnotationRequest) -> Option<Effect> {
    let ctx = request.context();
    let cds = ctx.cds();
    let window = ctx.splice_site_length;
    let first = ctx.variant.position;
    let last = ctx.variant.corrected_ref_position_last();
    let touches = |start: i64, end: i64| first <= end && start <= last;
    let acceptor_shift = i64::from(ctx.variant.reference.is_empty());

    introns(request)
        .filter(|intron| cds.start <= intron.start && intron.end <= cds.end)
        .find(|intron| {
            touches(intron.start + 1, intron.start + window)
                || touches(
                    intron.end - window + acceptor_shift,
                    intron.end - 1 + acceptor_shift,
                )
        })
        .map(|intron| {
            Effect::intronic(
                EffectType::SpliceSite,
                request,
                intron.start,
                intron.end,
                intron.index,
            )
        })
}
