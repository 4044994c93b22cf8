//! Variant effect annotation across every overlapping transcript.
//!
//! [`EffectAnnotator`] selects the transcripts whose span (widened by the
//! promoter margin) intersects a variant and runs the checker chain on each
//! one. Copy-number variants skip the chain and report one region effect per
//! overlapping transcript.

use tracing::{debug, warn};

use crate::checkers::classify;
use crate::codon::CodonTable;
use crate::config::AnnotatorConfig;
use crate::effect::{Effect, EffectType, effects_description};
use crate::error::Error;
use crate::reference::ReferenceGenome;
use crate::request::{RequestContext, build_request};
use crate::transcript::{GeneModels, TranscriptModel};
use crate::variant::{Location, Variant, VariantKind, VariantSpec};

/// Predicts the effects of variants against a genome and its gene models.
pub struct EffectAnnotator<'a> {
    genome: &'a dyn ReferenceGenome,
    gene_models: &'a dyn GeneModels,
    code: CodonTable,
    config: AnnotatorConfig,
}

impl<'a> EffectAnnotator<'a> {
    #[must_use]
    pub fn new(
        genome: &'a dyn ReferenceGenome,
        gene_models: &'a dyn GeneModels,
        config: AnnotatorConfig,
    ) -> Self {
        Self {
            genome,
            gene_models,
            code: CodonTable::nuclear(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Effect of the variant on one transcript, or `None` when no checker applies.
    pub fn effect_for_transcript(
        &self,
        variant: &Variant,
        transcript: &TranscriptModel,
    ) -> Result<Option<Effect>, Error> {
        let request = build_request(RequestContext::new(
            variant,
            transcript,
            self.genome,
            &self.code,
            self.config.promoter_len,
            self.config.splice_site_length,
        ));
        Ok(classify(&*request)?.map(|(_, effect)| effect))
    }

    /// One effect per transcript touched by the variant, or a single
    /// intergenic effect when none is.
    ///
    /// Errors from a malformed transcript model are returned, not skipped.
    pub fn annotate(&self, variant: &Variant) -> Result<Vec<Effect>, Error> {
        if let Some(length) = variant.length.filter(|_| variant.is_cnv()) {
            return self.annotate_cnv(
                &variant.chromosome,
                variant.position,
                variant.position + length,
                variant.kind,
            );
        }

        if !self.gene_models.has_chromosome(&variant.chromosome) {
            debug!(chromosome = %variant.chromosome, "no gene models on chromosome");
            return Ok(vec![Effect::new(EffectType::Intergenic)]);
        }

        let margin = self.config.promoter_len;
        let transcripts = self.gene_models.transcripts_overlapping(
            &variant.chromosome,
            variant.position - margin,
            variant.corrected_ref_position_last() + margin,
        );

        let mut effects = Vec::with_capacity(transcripts.len());
        for tm in transcripts {
            match self.effect_for_transcript(variant, tm)? {
                Some(effect) => effects.push(effect),
                None => warn!(
                    transcript = tm.transcript_id(),
                    %variant,
                    "no effect assigned to overlapping transcript"
                ),
            }
        }

        if effects.is_empty() {
            effects.push(Effect::new(EffectType::Intergenic));
        }
        Ok(effects)
    }

    /// Annotate an allele-based variant given as `(chrom, pos, ref, alt)`.
    pub fn annotate_allele(
        &self,
        chromosome: &str,
        position: i64,
        reference: &str,
        alternate: &str,
    ) -> Result<Vec<Effect>, Error> {
        self.annotate(&Variant::new(chromosome, position, reference, alternate)?)
    }

    /// Tag every transcript overlapping `[start, end]` with `effect`.
    ///
    /// Each effect carries the region length; with no overlap a single
    /// gene-less effect is returned.
    #[must_use]
    pub fn annotate_region(
        &self,
        chromosome: &str,
        start: i64,
        end: i64,
        effect: EffectType,
    ) -> Vec<Effect> {
        let length = end - start + 1;
        let mut effects: Vec<Effect> = self
            .gene_models
            .transcripts_overlapping(chromosome, start, end)
            .into_iter()
            .map(|tm| Effect {
                length: Some(length),
                ..Effect::with_transcript(effect, tm)
            })
            .collect();

        if effects.is_empty() {
            effects.push(Effect {
                length: Some(length),
                ..Effect::new(effect)
            });
        }
        effects
    }

    /// Region annotation tagged `CNV+` for duplications and `CNV-` for deletions.
    pub fn annotate_cnv(
        &self,
        chromosome: &str,
        start: i64,
        end: i64,
        kind: VariantKind,
    ) -> Result<Vec<Effect>, Error> {
        let effect = match kind {
            VariantKind::LargeDuplication => EffectType::CnvPlus,
            VariantKind::LargeDeletion => EffectType::CnvMinus,
            other => {
                return Err(Error::InvalidInput(format!(
                    "unexpected copy-number variant type: {other:?}"
                )));
            }
        };
        if end < start {
            return Err(Error::InvalidInput(format!(
                "copy-number region ends before it starts: {chromosome}:{start}-{end}"
            )));
        }
        Ok(self.annotate_region(chromosome, start, end, effect))
    }

    /// Annotate a variant given as a location plus notation or alleles.
    ///
    /// `CNV+`/`CNV-` expect a `chrom:begin-end` location.
    pub fn do_annotate_variant(
        &self,
        location: &Location,
        spec: &VariantSpec<'_>,
    ) -> Result<Vec<Effect>, Error> {
        let variant = Variant::from_spec(location, spec)?;
        debug!(%variant, "annotating");
        self.annotate(&variant)
    }
}

/// Build an annotator with the given promoter margin and annotate one variant.
pub fn annotate_variant(
    gene_models: &dyn GeneModels,
    genome: &dyn ReferenceGenome,
    location: &Location,
    spec: &VariantSpec<'_>,
    promoter_len: i64,
) -> Result<Vec<Effect>, Error> {
    let config = AnnotatorConfig {
        promoter_len,
        ..AnnotatorConfig::default()
    };
    let annotator = EffectAnnotator::new(genome, gene_models, config);
    let effects = annotator.do_annotate_variant(location, spec)?;

    if let Some((worst, genes, details)) = effects_description(&effects) {
        debug!(%location, %worst, %genes, %details, "effects");
    }
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::test_support::{forward, genome, non_coding, reverse, utr_intron};
    use crate::strand::Strand;
    use crate::transcript::GeneModelIndex;

    fn models() -> GeneModelIndex {
        let forward_non_coding = TranscriptModel::new(
            "GENEA",
            "TX1N",
            "1",
            Strand::Forward,
            &[(11, 30), (71, 90)],
            None,
        )
        .unwrap();
        GeneModelIndex::new(vec![
            forward(),
            forward_non_coding,
            reverse(),
            non_coding(),
            utr_intron(),
        ])
    }

    fn sorted_by_transcript(mut effects: Vec<Effect>) -> Vec<Effect> {
        effects.sort_by(|a, b| a.transcript_id.cmp(&b.transcript_id));
        effects
    }

    #[test]
    fn one_effect_per_overlapping_transcript() {
        let genome = genome();
        let models = models();
        let annotator = EffectAnnotator::new(&genome, &models, AnnotatorConfig::default());

        let effects = sorted_by_transcript(annotator.annotate_allele("1", 22, "G", "A").unwrap());
        let tags: Vec<(Option<&str>, EffectType)> = effects
            .iter()
            .map(|e| (e.transcript_id.as_deref(), e.effect))
            .collect();
        assert_eq!(
            tags,
            vec![
                (Some("TX1"), EffectType::Missense),
                (Some("TX1N"), EffectType::NonCoding),
            ]
        );
        assert_eq!(effects[0].gene.as_deref(), Some("GENEA"));
        assert_eq!(effects[0].strand, Some(Strand::Forward));
    }

    #[test]
    fn intergenic_when_nothing_overlaps() {
        let genome = genome();
        let models = models();
        let annotator = EffectAnnotator::new(&genome, &models, AnnotatorConfig::default());

        for (chrom, pos) in [("1", 150), ("2", 10)] {
            let effects = annotator.annotate_allele(chrom, pos, "C", "T").unwrap();
            assert_eq!(effects, vec![Effect::new(EffectType::Intergenic)]);
        }
    }

    #[test]
    fn promoter_margin_widens_selection() {
        let genome = genome();
        let models = models();
        let config = AnnotatorConfig {
            promoter_len: 5,
            ..AnnotatorConfig::default()
        };
        let annotator = EffectAnnotator::new(&genome, &models, config);

        let effects = sorted_by_transcript(annotator.annotate_allele("1", 8, "C", "T").unwrap());
        assert_eq!(effects.len(), 2);
        assert!(effects.iter().all(|e| e.effect == EffectType::Promoter));
        assert_eq!(effects[0].dist_from_5utr, Some(2));

        let plain = EffectAnnotator::new(&genome, &models, AnnotatorConfig::default());
        assert_eq!(
            plain.annotate_allele("1", 8, "C", "T").unwrap()[0].effect,
            EffectType::Intergenic
        );
    }

    #[test]
    fn cnv_covers_transcripts() {
        let genome = genome();
        let models = models();
        let annotator = EffectAnnotator::new(&genome, &models, AnnotatorConfig::default());

        let location: Location = "1:10-100".parse().unwrap();
        let effects = sorted_by_transcript(
            annotator
                .do_annotate_variant(&location, &VariantSpec::Notation("CNV+"))
                .unwrap(),
        );
        assert_eq!(effects.len(), 2);
        assert!(effects.iter().all(|e| e.effect == EffectType::CnvPlus));
        assert!(effects.iter().all(|e| e.length == Some(91)));
        assert_eq!(effects[0].transcript_id.as_deref(), Some("TX1"));
        assert_eq!(effects[1].transcript_id.as_deref(), Some("TX1N"));
    }

    #[test]
    fn gene_less_cnv() {
        let genome = genome();
        let models = models();
        let annotator = EffectAnnotator::new(&genome, &models, AnnotatorConfig::default());

        let effects = annotator
            .annotate_cnv("1", 500, 600, VariantKind::LargeDeletion)
            .unwrap();
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].effect, EffectType::CnvMinus);
        assert_eq!(effects[0].gene, None);
        assert_eq!(effects[0].length, Some(101));

        assert!(
            annotator
                .annotate_cnv("1", 500, 600, VariantKind::Substitution)
                .is_err()
        );
    }

    #[test]
    fn region_with_custom_tag() {
        let genome = genome();
        let models = models();
        let annotator = EffectAnnotator::new(&genome, &models, AnnotatorConfig::default());

        let effects = annotator.annotate_region("1", 300, 305, EffectType::Unknown);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].transcript_id.as_deref(), Some("TX3"));
        assert_eq!(effects[0].details(), "6");
    }

    #[test]
    fn entry_point_parses_notation() {
        let genome = genome();
        let models = models();
        let location: Location = "1:238".parse().unwrap();

        let effects = annotate_variant(
            &models,
            &genome,
            &location,
            &VariantSpec::Notation("sub(T->C)"),
            0,
        )
        .unwrap();
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].effect, EffectType::Synonymous);
        assert_eq!(effects[0].aa_change.as_deref(), Some("Lys->Lys"));

        let alleles = VariantSpec::Alleles {
            reference: "T",
            alternate: "T",
        };
        assert!(matches!(
            annotate_variant(&models, &genome, &location, &alleles, 0),
            Err(Error::InvalidInput(_))
        ));
    }
}
