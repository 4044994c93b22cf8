//! Untranslated regions and the introns between UTR exons.

use crate::effect::{Effect, EffectType};
use crate::request::AnnotationRequest;

use super::{enclosing_intron, overlaps_exon};

pub(super) fn effect(request: &dyn AnnotationRequest) -> Option<Effect> {
    let ctx = request.context();
    let cds = ctx.cds();
    let variant = ctx.variant;
    let last = variant.corrected_ref_position_last();
    let reverse = ctx.transcript.strand().is_reverse();

    let (side, before_cds) = if last < cds.start {
        (if reverse { EffectType::Utr3 } else { EffectType::Utr5 }, true)
    } else if variant.position > cds.end {
        (if reverse { EffectType::Utr5 } else { EffectType::Utr3 }, false)
    } else {
        return None;
    };

    if overlaps_exon(request) {
        let dist_from_coding = if before_cds {
            (request.exonic_distance(last, cds.start) - 1).max(0)
        } else {
            request.exonic_distance(cds.end, variant.position) - 1
        };
        return Some(Effect {
            dist_from_coding: Some(dist_from_coding),
            ..Effect::with_prot_length(side, request)
        });
    }

    let intron_side = if side == EffectType::Utr5 {
        EffectType::Utr5Intron
    } else {
        EffectType::Utr3Intron
    };
    enclosing_intron(request).map(|intron| {
        Effect::intronic_non_coding(intron_side, request, intron.start, intron.end, intron.index)
    })
}

#[cfg(test)]
mod tests {
    use crate::checkers::CheckerKind;
    use crate::checkers::test_support::{check, forward, reverse, utr_intron};
    use crate::effect::EffectType;
    use crate::variant::Variant;

    fn utr(tm: &crate::transcript::TranscriptModel, pos: i64) -> (EffectType, Option<i64>) {
        let variant = Variant::new("1", pos, "C", "A").unwrap();
        let effect = check(CheckerKind::Utr, tm, &variant, 0).unwrap();
        (effect.effect, effect.dist_from_coding)
    }

    #[test]
    fn forward_utrs() {
        assert_eq!(utr(&forward(), 13), (EffectType::Utr5, Some(2)));
        assert_eq!(utr(&forward(), 85), (EffectType::Utr3, Some(4)));
    }

    #[test]
    fn reverse_utrs_swap_sides() {
        assert_eq!(utr(&reverse(), 248), (EffectType::Utr5, Some(1)));
        assert_eq!(utr(&reverse(), 202), (EffectType::Utr3, Some(1)));
    }

    #[test]
    fn distance_skips_introns() {
        assert_eq!(utr(&utr_intron(), 405), (EffectType::Utr5, Some(15)));
    }

    #[test]
    fn intron_between_utr_exons() {
        let variant = Variant::new("1", 415, "C", "A").unwrap();
        let effect = check(CheckerKind::Utr, &utr_intron(), &variant, 0).unwrap();
        assert_eq!(effect.effect, EffectType::Utr5Intron);
        assert_eq!(effect.dist_from_donor, Some(4));
        assert_eq!(effect.dist_from_acceptor, Some(5));
        assert_eq!(effect.prot_length, Some(4));
        assert_eq!(effect.prot_pos, None);
        assert_eq!(effect.details(), "1/1[4]");
    }

    #[test]
    fn coding_variant_passes() {
        let variant = Variant::new("1", 22, "G", "A").unwrap();
        assert!(check(CheckerKind::Utr, &forward(), &variant, 0).is_none());
    }
}
