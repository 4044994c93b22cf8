use crate::effect::{Effect, EffectType};
use crate::request::AnnotationRequest;

pub(super) fn effect(request: &dyn AnnotationRequest) -> Option<Effect> {
    request
        .is_start_codon_affected()
        .then(|| Effect::with_prot_pos(EffectType::NoStart, request))
}

#[cfg(test)]
mod tests {
    use crate::checkers::CheckerKind;
    use crate::checkers::test_support::{check, forward, reverse};
    use crate::effect::EffectType;
    use crate::variant::Variant;

    #[test]
    fn forward_start_codon() {
        let variant = Variant::new("1", 17, "T", "C").unwrap();
        let effect = check(CheckerKind::StartLoss, &forward(), &variant, 0).unwrap();
        assert_eq!(effect.effect, EffectType::NoStart);
        assert_eq!(effect.prot_pos, Some(1));
        assert_eq!(effect.aa_change, None);
        assert_eq!(effect.details(), "14");
    }

    #[test]
    fn reverse_start_codon_is_at_high_end() {
        let variant = Variant::new("1", 245, "A", "G").unwrap();
        let effect = check(CheckerKind::StartLoss, &reverse(), &variant, 0).unwrap();
        assert_eq!(effect.prot_pos, Some(1));
        let variant = Variant::new("1", 205, "C", "G").unwrap();
        assert!(check(CheckerKind::StartLoss, &reverse(), &variant, 0).is_none());
    }

    #[test]
    fn deletion_from_utr_into_start() {
        let variant = Variant::new("1", 14, "CCA", "").unwrap();
        let effect = check(CheckerKind::StartLoss, &forward(), &variant, 0).unwrap();
        assert_eq!(effect.prot_pos, Some(1));
    }
}
