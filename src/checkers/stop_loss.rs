//! Stop loss: variant touching the stop codon without keeping it in place.

use crate::codon::AminoAcid;
use crate::effect::{Effect, EffectType};
use crate::error::Error;
use crate::request::AnnotationRequest;

pub(super) fn effect(request: &dyn AnnotationRequest) -> Result<Option<Effect>, Error> {
    if !request.is_stop_codon_affected() {
        return Ok(None);
    }

    let (reference, alternate) = request.amino_acids()?;
    let ref_stop = first_stop(reference);
    let alt_stop = first_stop(alternate);
    if ref_stop.is_some() && ref_stop == alt_stop {
        return Ok(None);
    }

    Ok(Some(Effect::with_prot_pos(EffectType::NoEnd, request)))
}

/// Index of the first stop in a translated window.
pub(super) fn first_stop(amino_acids: &[AminoAcid]) -> Option<usize> {
    amino_acids.iter().position(|aa| aa.is_stop())
}

#[cfg(test)]
mod tests {
    use crate::checkers::CheckerKind;
    use crate::checkers::test_support::{check, forward, reverse};
    use crate::effect::EffectType;
    use crate::variant::Variant;

    #[test]
    fn stop_codon_lost() {
        let variant = Variant::new("1", 80, "A", "C").unwrap();
        let effect = check(CheckerKind::StopLoss, &forward(), &variant, 0).unwrap();
        assert_eq!(effect.effect, EffectType::NoEnd);
        assert_eq!(effect.prot_pos, Some(15));
        assert_eq!(effect.prot_length, Some(14));
        assert_eq!(effect.aa_change, None);
    }

    #[test]
    fn stop_codon_kept() {
        let variant = Variant::new("1", 80, "A", "G").unwrap();
        assert!(check(CheckerKind::StopLoss, &forward(), &variant, 0).is_none());
    }

    #[test]
    fn reverse_stop_codon_is_at_low_end() {
        let variant = Variant::new("1", 205, "C", "G").unwrap();
        let effect = check(CheckerKind::StopLoss, &reverse(), &variant, 0).unwrap();
        assert_eq!(effect.prot_pos, Some(11));
        assert_eq!(effect.details(), "10");
    }
}
