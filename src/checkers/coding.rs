//! Non-coding transcripts: exonic or intronic, nothing finer.

use crate::effect::{Effect, EffectType};
use crate::request::AnnotationRequest;

use super::{enclosing_intron, overlaps_exon};

pub(super) fn effect(request: &dyn AnnotationRequest) -> Option<Effect> {
    let tm = request.transcript();
    if tm.is_coding() {
        return None;
    }

    if overlaps_exon(request) {
        return Some(Effect {
            length: Some(tm.exonic_length()),
            ..Effect::with_request(EffectType::NonCoding, request)
        });
    }

    enclosing_intron(request).map(|intron| {
        Effect::intronic_non_coding(
            EffectType::NonCodingIntron,
            request,
            intron.start,
            intron.end,
            intron.index,
        )
    })
}
