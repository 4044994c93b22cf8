//! Promoter: variant upstream of the transcript start, within the promoter margin.

use crate::effect::{Effect, EffectType};
use crate::request::AnnotationRequest;

pub(super) fn effect(request: &dyn AnnotationRequest) -> Option<Effect> {
    let ctx = request.context();
    if ctx.promoter_len <= 0 {
        return None;
    }
    let tm = ctx.transcript;
    let variant = ctx.variant;

    let dist_from_5utr = if tm.strand().is_reverse() {
        let end = tm.tx_end();
        (variant.position > end && variant.position <= end + ctx.promoter_len)
            .then(|| variant.position - end)
    } else {
        let start = tm.tx_start();
        (variant.position < start
            && variant.corrected_ref_position_last() < start
            && variant.ref_position_last() >= start - ctx.promoter_len)
            .then(|| start - variant.ref_position_last())
    }?;

    Some(Effect {
        dist_from_5utr: Some(dist_from_5utr),
        ..Effect::with_transcript(EffectType::Promoter, tm)
    })
}

#[cfg(test)]
mod tests {
    use crate::checkers::CheckerKind;
    use crate::checkers::test_support::{check, forward, reverse};
    use crate::effect::EffectType;
    use crate::variant::Variant;

    #[test]
    fn upstream_of_forward_transcript() {
        let variant = Variant::new("1", 8, "C", "T").unwrap();
        let effect = check(CheckerKind::Promoter, &forward(), &variant, 5).unwrap();
        assert_eq!(effect.effect, EffectType::Promoter);
        assert_eq!(effect.dist_from_5utr, Some(2));
        assert_eq!(effect.details(), "2");
    }

    #[test]
    fn upstream_of_reverse_transcript() {
        let variant = Variant::new("1", 253, "C", "T").unwrap();
        let effect = check(CheckerKind::Promoter, &reverse(), &variant, 5).unwrap();
        assert_eq!(effect.dist_from_5utr, Some(3));
    }

    #[test]
    fn disabled_without_margin() {
        let variant = Variant::new("1", 8, "C", "T").unwrap();
        assert!(check(CheckerKind::Promoter, &forward(), &variant, 0).is_none());
    }

    #[test]
    fn downstream_is_not_promoter() {
        let variant = Variant::new("1", 93, "C", "T").unwrap();
        assert!(check(CheckerKind::Promoter, &forward(), &variant, 5).is_none());
    }
}
