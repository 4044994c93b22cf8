//! Worst-effect summaries and the compact effect description format.
//!
//! A description has three parts: the worst effect tag, the per-gene effects
//! (`gene:effect|...`) and the per-transcript details
//! (`transcript:gene:effect:details|...`). [`AlleleEffects`] joins them with
//! `!` for storage.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

use super::{Effect, EffectType};

/// Effects ordered from most to least severe; ties keep their input order.
#[must_use]
pub fn sort_effects(effects: &[Effect]) -> Vec<&Effect> {
    let mut sorted: Vec<&Effect> = effects.iter().collect();
    sorted.sort_by_key(|effect| std::cmp::Reverse(effect.effect.severity()));
    sorted
}

#[must_use]
pub fn worst_effect(effects: &[Effect]) -> Option<EffectType> {
    effects
        .iter()
        .map(|effect| effect.effect)
        .reduce(|worst, effect| if effect.severity() > worst.severity() { effect } else { worst })
}

fn gene_name(effect: &Effect) -> String {
    effect.gene.clone().unwrap_or_else(|| "None".to_string())
}

/// Most severe effect of a gene at one severity level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneEffect {
    pub gene: String,
    pub effect: EffectType,
}

impl fmt::Display for GeneEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.gene, self.effect)
    }
}

impl FromStr for GeneEffect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        match parts.as_slice() {
            [gene, effect] => Ok(Self {
                gene: (*gene).to_string(),
                effect: effect.parse()?,
            }),
            _ => Err(Error::Parse(format!("unexpected gene effect format: '{s}'"))),
        }
    }
}

/// One transcript's effect with its detail string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEffect {
    pub transcript_id: String,
    pub gene: String,
    pub effect: EffectType,
    pub details: String,
}

impl fmt::Display for TranscriptEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.transcript_id, self.gene, self.effect, self.details
        )
    }
}

impl FromStr for TranscriptEffect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        match parts.as_slice() {
            [transcript_id, gene, effect, details] => Ok(Self {
                transcript_id: (*transcript_id).to_string(),
                gene: (*gene).to_string(),
                effect: effect.parse()?,
                details: (*details).to_string(),
            }),
            _ => Err(Error::Parse(format!(
                "unexpected transcript effect format: '{s}'"
            ))),
        }
    }
}

/// True for summaries that collapse to the bare worst tag.
fn is_placeholder(effect: EffectType) -> bool {
    matches!(effect, EffectType::Intergenic | EffectType::NoMutation)
}

/// First effect of every gene within every severity level, most severe first.
#[must_use]
pub fn gene_effects(effects: &[Effect]) -> Vec<GeneEffect> {
    let sorted = sort_effects(effects);
    let Some(worst) = sorted.first().map(|effect| effect.effect) else {
        return Vec::new();
    };
    if is_placeholder(worst) {
        return vec![GeneEffect {
            gene: worst.to_string(),
            effect: worst,
        }];
    }

    sorted
        .chunk_by(|a, b| a.effect.severity() == b.effect.severity())
        .flat_map(|level| level.chunk_by(|a, b| a.gene == b.gene))
        .map(|run| GeneEffect {
            gene: gene_name(run[0]),
            effect: run[0].effect,
        })
        .collect()
}

/// Every effect with its details, in input order.
#[must_use]
pub fn transcript_effects(effects: &[Effect]) -> Vec<TranscriptEffect> {
    let Some(worst) = worst_effect(effects) else {
        return Vec::new();
    };
    if is_placeholder(worst) {
        return vec![TranscriptEffect {
            transcript_id: worst.to_string(),
            gene: worst.to_string(),
            effect: worst,
            details: worst.to_string(),
        }];
    }

    effects
        .iter()
        .map(|effect| TranscriptEffect {
            transcript_id: effect
                .transcript_id
                .clone()
                .unwrap_or_else(|| "None".to_string()),
            gene: gene_name(effect),
            effect: effect.effect,
            details: effect.details(),
        })
        .collect()
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|")
}

/// `(worst_effect, "gene:effect|...", "transcript:gene:effect:details|...")`,
/// or `None` for an empty effect list.
#[must_use]
pub fn effects_description(effects: &[Effect]) -> Option<(EffectType, String, String)> {
    let worst = worst_effect(effects)?;
    Some((
        worst,
        join(&gene_effects(effects)),
        join(&transcript_effects(effects)),
    ))
}

/// Summary of all effects of one allele.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlleleEffects {
    pub worst: EffectType,
    pub genes: Vec<GeneEffect>,
    pub transcripts: Vec<TranscriptEffect>,
}

impl AlleleEffects {
    #[must_use]
    pub fn from_effects(effects: &[Effect]) -> Option<Self> {
        Some(Self {
            worst: worst_effect(effects)?,
            genes: gene_effects(effects),
            transcripts: transcript_effects(effects),
        })
    }

    /// Gene-level effect types, most severe first.
    #[must_use]
    pub fn types(&self) -> Vec<EffectType> {
        self.genes.iter().map(|gene| gene.effect).collect()
    }
}

impl fmt::Display for AlleleEffects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}!{}!{}",
            self.worst,
            join(&self.genes),
            join(&self.transcripts)
        )
    }
}

impl FromStr for AlleleEffects {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('!').collect();
        let [worst, genes, transcripts] = parts.as_slice() else {
            return Err(Error::Parse(format!(
                "allele effects need three '!'-separated parts: '{s}'"
            )));
        };
        let genes = genes
            .split('|')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<GeneEffect>, _>>()?;
        let transcripts = transcripts
            .split('|')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<TranscriptEffect>, _>>()?;
        if genes.is_empty() && transcripts.is_empty() {
            return Err(Error::Parse(format!("allele effects are empty: '{s}'")));
        }
        Ok(Self {
            worst: worst.trim().parse()?,
            genes,
            transcripts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect(kind: EffectType, gene: &str, transcript: &str) -> Effect {
        Effect {
            gene: Some(gene.to_string()),
            transcript_id: Some(transcript.to_string()),
            ..Effect::new(kind)
        }
    }

    fn mixed() -> Vec<Effect> {
        vec![
            effect(EffectType::Intron, "A", "t1"),
            Effect {
                prot_pos: Some(4),
                prot_length: Some(10),
                aa_change: Some("Trp->End".to_string()),
                ..effect(EffectType::Nonsense, "A", "t2")
            },
            effect(EffectType::Intron, "B", "t3"),
            effect(EffectType::Intron, "A", "t4"),
        ]
    }

    #[test]
    fn sort_is_stable() {
        let effects = mixed();
        let ids: Vec<&str> = sort_effects(&effects)
            .iter()
            .map(|e| e.transcript_id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["t2", "t1", "t3", "t4"]);
        assert_eq!(worst_effect(&effects), Some(EffectType::Nonsense));
        assert_eq!(worst_effect(&[]), None);
    }

    #[test]
    fn gene_effects_group_runs() {
        let genes: Vec<String> = gene_effects(&mixed()).iter().map(ToString::to_string).collect();
        assert_eq!(genes, vec!["A:nonsense", "A:intron", "B:intron", "A:intron"]);
    }

    #[test]
    fn description_of_mixed_effects() {
        let (worst, genes, transcripts) = effects_description(&mixed()).unwrap();
        assert_eq!(worst, EffectType::Nonsense);
        assert_eq!(genes, "A:nonsense|A:intron|B:intron|A:intron");
        assert_eq!(
            transcripts,
            "t1:A:intron:None/None[None]|t2:A:nonsense:4/10(Trp->End)|t3:B:intron:None/None[None]|t4:A:intron:None/None[None]"
        );
    }

    #[test]
    fn intergenic_collapses() {
        let effects = vec![Effect::new(EffectType::Intergenic)];
        let (worst, genes, transcripts) = effects_description(&effects).unwrap();
        assert_eq!(worst, EffectType::Intergenic);
        assert_eq!(genes, "intergenic:intergenic");
        assert_eq!(transcripts, "intergenic:intergenic:intergenic:intergenic");
    }

    #[test]
    fn gene_less_effect_renders_none() {
        let effects = vec![Effect {
            length: Some(101),
            ..Effect::new(EffectType::CnvPlus)
        }];
        let (_, genes, transcripts) = effects_description(&effects).unwrap();
        assert_eq!(genes, "None:CNV+");
        assert_eq!(transcripts, "None:None:CNV+:");
    }

    #[test]
    fn allele_effects_text_form() {
        let allele = AlleleEffects::from_effects(&mixed()).unwrap();
        let text = allele.to_string();
        assert!(text.starts_with("nonsense!A:nonsense|A:intron|"));
        let parsed: AlleleEffects = text.parse().unwrap();
        assert_eq!(parsed, allele);
        assert_eq!(
            parsed.types(),
            vec![
                EffectType::Nonsense,
                EffectType::Intron,
                EffectType::Intron,
                EffectType::Intron
            ]
        );
    }

    #[test]
    fn allele_effects_rejects_malformed() {
        assert!("missense!A:missense".parse::<AlleleEffects>().is_err());
        assert!("missense!!".parse::<AlleleEffects>().is_err());
        assert!("missense!A:bogus!".parse::<AlleleEffects>().is_err());
        assert!("missense!A:missense!t1:A:missense".parse::<AlleleEffects>().is_err());
    }
}
