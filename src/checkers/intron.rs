use crate::effect::{Effect, EffectType};
use crate::request::AnnotationRequest;

use super::enclosing_intron;

pub(super) fn effect(request: &dyn AnnotationRequest) -> Option<Effect> {
    enclosing_intron(request).map(|intron| {
        Effect::intronic(EffectType::Intron, request, intron.start, intron.end, intron.index)
    })
}

#[cfg(test)]
mod tests {
    use crate::checkers::CheckerKind;
    use crate::checkers::test_support::{check, forward, reverse};
    use crate::effect::EffectType;
    use crate::variant::Variant;

    #[test]
    fn forward_intron() {
        let variant = Variant::new("1", 65, "C", "A").unwrap();
        let effect = check(CheckerKind::Intron, &forward(), &variant, 0).unwrap();
        assert_eq!(effect.effect, EffectType::Intron);
        assert_eq!(effect.which_intron, Some(2));
        assert_eq!(effect.how_many_introns, Some(2));
        assert_eq!(effect.dist_from_donor, Some(4));
        assert_eq!(effect.dist_from_acceptor, Some(5));
        assert_eq!(effect.dist_from_coding, Some(4));
        assert_eq!(effect.intron_length, Some(10));
        assert_eq!(effect.prot_pos, Some(12));
        assert_eq!(effect.details(), "2/2[4]");
    }

    #[test]
    fn reverse_intron() {
        let variant = Variant::new("1", 224, "C", "A").unwrap();
        let effect = check(CheckerKind::Intron, &reverse(), &variant, 0).unwrap();
        assert_eq!(effect.dist_from_acceptor, Some(3));
        assert_eq!(effect.dist_from_donor, Some(6));
        assert_eq!(effect.which_intron, Some(1));
        assert_eq!(effect.prot_pos, Some(6));
        assert_eq!(effect.dist_from_coding, Some(3));
    }

    #[test]
    fn insertion_between_exon_and_intron() {
        let variant = Variant::new("1", 61, "", "G").unwrap();
        let effect = check(CheckerKind::Intron, &forward(), &variant, 0).unwrap();
        assert_eq!(effect.dist_from_donor, Some(0));
        assert_eq!(effect.dist_from_acceptor, Some(10));
    }

    #[test]
    fn exonic_variant_passes() {
        let variant = Variant::new("1", 44, "G", "A").unwrap();
        assert!(check(CheckerKind::Intron, &forward(), &variant, 0).is_none());
    }
}
