//! Variant effects: category tags, severity ranking and effect records.

mod description;

pub use description::{
    AlleleEffects, GeneEffect, TranscriptEffect, effects_description, gene_effects,
    sort_effects, transcript_effects, worst_effect,
};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::codon::join_amino_acids;
use crate::error::Error;
use crate::request::AnnotationRequest;
use crate::strand::Strand;
use crate::transcript::TranscriptModel;

/// Effect category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EffectType {
    #[serde(rename = "CNV+")]
    CnvPlus,
    #[serde(rename = "CNV-")]
    CnvMinus,
    #[serde(rename = "tRNA:ANTICODON")]
    TrnaAnticodon,
    #[serde(rename = "all")]
    All,
    #[serde(rename = "splice-site")]
    SpliceSite,
    #[serde(rename = "frame-shift")]
    FrameShift,
    #[serde(rename = "nonsense")]
    Nonsense,
    #[serde(rename = "no-frame-shift-newStop")]
    NoFrameShiftNewStop,
    #[serde(rename = "noStart")]
    NoStart,
    #[serde(rename = "noEnd")]
    NoEnd,
    #[serde(rename = "missense")]
    Missense,
    #[serde(rename = "no-frame-shift")]
    NoFrameShift,
    #[serde(rename = "CDS")]
    Cds,
    #[serde(rename = "synonymous")]
    Synonymous,
    #[serde(rename = "coding_unknown")]
    CodingUnknown,
    #[serde(rename = "regulatory")]
    Regulatory,
    #[serde(rename = "3'UTR")]
    Utr3,
    #[serde(rename = "5'UTR")]
    Utr5,
    #[serde(rename = "intron")]
    Intron,
    #[serde(rename = "non-coding")]
    NonCoding,
    #[serde(rename = "5'UTR-intron")]
    Utr5Intron,
    #[serde(rename = "3'UTR-intron")]
    Utr3Intron,
    #[serde(rename = "promoter")]
    Promoter,
    #[serde(rename = "non-coding-intron")]
    NonCodingIntron,
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "intergenic")]
    Intergenic,
    #[serde(rename = "no-mutation")]
    NoMutation,
}

impl EffectType {
    /// Every effect type, most severe first.
    pub const ALL: [EffectType; 27] = [
        Self::CnvPlus,
        Self::CnvMinus,
        Self::TrnaAnticodon,
        Self::All,
        Self::SpliceSite,
        Self::FrameShift,
        Self::Nonsense,
        Self::NoFrameShiftNewStop,
        Self::NoStart,
        Self::NoEnd,
        Self::Missense,
        Self::NoFrameShift,
        Self::Cds,
        Self::Synonymous,
        Self::CodingUnknown,
        Self::Regulatory,
        Self::Utr3,
        Self::Utr5,
        Self::Intron,
        Self::NonCoding,
        Self::Utr5Intron,
        Self::Utr3Intron,
        Self::Promoter,
        Self::NonCodingIntron,
        Self::Unknown,
        Self::Intergenic,
        Self::NoMutation,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CnvPlus => "CNV+",
            Self::CnvMinus => "CNV-",
            Self::TrnaAnticodon => "tRNA:ANTICODON",
            Self::All => "all",
            Self::SpliceSite => "splice-site",
            Self::FrameShift => "frame-shift",
            Self::Nonsense => "nonsense",
            Self::NoFrameShiftNewStop => "no-frame-shift-newStop",
            Self::NoStart => "noStart",
            Self::NoEnd => "noEnd",
            Self::Missense => "missense",
            Self::NoFrameShift => "no-frame-shift",
            Self::Cds => "CDS",
            Self::Synonymous => "synonymous",
            Self::CodingUnknown => "coding_unknown",
            Self::Regulatory => "regulatory",
            Self::Utr3 => "3'UTR",
            Self::Utr5 => "5'UTR",
            Self::Intron => "intron",
            Self::NonCoding => "non-coding",
            Self::Utr5Intron => "5'UTR-intron",
            Self::Utr3Intron => "3'UTR-intron",
            Self::Promoter => "promoter",
            Self::NonCodingIntron => "non-coding-intron",
            Self::Unknown => "unknown",
            Self::Intergenic => "intergenic",
            Self::NoMutation => "no-mutation",
        }
    }

    /// Rank used to pick the worst effect; higher is more severe.
    #[must_use]
    pub fn severity(self) -> u8 {
        match self {
            Self::CnvPlus | Self::CnvMinus => 35,
            Self::TrnaAnticodon => 30,
            Self::All => 24,
            Self::SpliceSite => 23,
            Self::FrameShift => 22,
            Self::Nonsense => 21,
            Self::NoFrameShiftNewStop => 20,
            Self::NoStart => 19,
            Self::NoEnd => 18,
            Self::Missense => 17,
            Self::NoFrameShift => 16,
            Self::Cds => 15,
            Self::Synonymous => 14,
            Self::CodingUnknown => 13,
            Self::Regulatory => 12,
            Self::Utr3 => 11,
            Self::Utr5 => 10,
            Self::Intron => 9,
            Self::NonCoding => 8,
            Self::Utr5Intron => 7,
            Self::Utr3Intron => 6,
            Self::Promoter => 5,
            Self::NonCodingIntron => 4,
            Self::Unknown => 3,
            Self::Intergenic => 2,
            Self::NoMutation => 1,
        }
    }

    #[must_use]
    pub fn is_intronic(self) -> bool {
        matches!(
            self,
            Self::Intron | Self::Utr5Intron | Self::Utr3Intron | Self::NonCodingIntron
        )
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|effect| effect.as_str() == s)
            .ok_or_else(|| Error::Parse(format!("unknown effect type: '{s}'")))
    }
}

/// Effect of a variant on one transcript, or a transcript-less effect
/// (intergenic, gene-less CNV).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    pub effect: EffectType,
    pub gene: Option<String>,
    pub transcript_id: Option<String>,
    pub strand: Option<Strand>,
    pub prot_pos: Option<i64>,
    pub prot_length: Option<i64>,
    pub length: Option<i64>,
    pub aa_change: Option<String>,
    pub which_intron: Option<i64>,
    pub how_many_introns: Option<i64>,
    pub dist_from_coding: Option<i64>,
    pub dist_from_acceptor: Option<i64>,
    pub dist_from_donor: Option<i64>,
    pub intron_length: Option<i64>,
    #[serde(rename = "mRNALength")]
    pub mrna_length: Option<i64>,
    #[serde(rename = "mRNAPosition")]
    pub mrna_position: Option<i64>,
    #[serde(rename = "distFrom5UTR")]
    pub dist_from_5utr: Option<i64>,
}

impl Effect {
    #[must_use]
    pub fn new(effect: EffectType) -> Self {
        Self {
            effect,
            gene: None,
            transcript_id: None,
            strand: None,
            prot_pos: None,
            prot_length: None,
            length: None,
            aa_change: None,
            which_intron: None,
            how_many_introns: None,
            dist_from_coding: None,
            dist_from_acceptor: None,
            dist_from_donor: None,
            intron_length: None,
            mrna_length: None,
            mrna_position: None,
            dist_from_5utr: None,
        }
    }

    /// Effect tagged with the transcript's gene, id and strand.
    #[must_use]
    pub fn with_transcript(effect: EffectType, tm: &TranscriptModel) -> Self {
        Self {
            gene: Some(tm.gene().to_string()),
            transcript_id: Some(tm.transcript_id().to_string()),
            strand: Some(tm.strand()),
            ..Self::new(effect)
        }
    }

    /// Transcript effect carrying the mRNA length and the variant's mRNA position.
    pub fn with_request(effect: EffectType, request: &dyn AnnotationRequest) -> Self {
        Self {
            mrna_length: Some(request.exonic_length()),
            mrna_position: Some(request.exonic_position()),
            ..Self::with_transcript(effect, request.transcript())
        }
    }

    pub fn with_prot_length(effect: EffectType, request: &dyn AnnotationRequest) -> Self {
        Self {
            prot_length: Some(request.protein_length()),
            ..Self::with_request(effect, request)
        }
    }

    /// Adds the first amino acid touched by the variant.
    pub fn with_prot_pos(effect: EffectType, request: &dyn AnnotationRequest) -> Self {
        let (start, _) = request.protein_position();
        Self {
            prot_pos: Some(start),
            ..Self::with_prot_length(effect, request)
        }
    }

    /// Adds the `Ref->Alt` amino acid change, e.g. `Gly->Ser`.
    pub fn with_aa_change(
        effect: EffectType,
        request: &dyn AnnotationRequest,
    ) -> Result<Self, Error> {
        let (reference, alternate) = request.amino_acids()?;
        let aa_change = format!(
            "{}->{}",
            join_amino_acids(reference),
            join_amino_acids(alternate)
        );
        Ok(Self {
            aa_change: Some(aa_change),
            ..Self::with_prot_pos(effect, request)
        })
    }

    /// Effect for a variant inside the intron between `start` (last base of
    /// the 5' exon in genomic order) and `end` (first base of the next exon).
    ///
    /// `index` is the genomic-order index of the exon starting at `end`.
    pub fn intronic_non_coding(
        effect: EffectType,
        request: &dyn AnnotationRequest,
        start: i64,
        end: i64,
        index: usize,
    ) -> Self {
        let tm = request.transcript();
        let variant = request.variant();
        let dist_left = variant.position - start - 1;
        let dist_right = end - variant.ref_position_last();
        let how_many = tm.intron_count() as i64;
        let index = index as i64;

        let (acceptor, donor, which) = if tm.strand().is_reverse() {
            (dist_left, dist_right, how_many - index + 1)
        } else {
            (dist_right, dist_left, index)
        };

        Self {
            prot_length: tm.is_coding().then(|| request.protein_length()),
            dist_from_coding: Some(dist_left.min(dist_right)),
            how_many_introns: Some(how_many),
            intron_length: Some(end - start - 1),
            dist_from_acceptor: Some(acceptor),
            dist_from_donor: Some(donor),
            which_intron: Some(which),
            ..Self::with_request(effect, request)
        }
    }

    /// Intronic effect on a coding transcript; `prot_pos` is the codon of the
    /// downstream exon edge.
    pub fn intronic(
        effect: EffectType,
        request: &dyn AnnotationRequest,
        start: i64,
        end: i64,
        index: usize,
    ) -> Self {
        let edge = if request.transcript().strand().is_reverse() {
            start
        } else {
            end
        };
        Self {
            prot_pos: request.protein_position_for_pos(edge),
            ..Self::intronic_non_coding(effect, request, start, end, index)
        }
    }

    /// Compact per-transcript detail string used in effect descriptions.
    #[must_use]
    pub fn details(&self) -> String {
        use EffectType as E;

        let mut details = String::new();

        if matches!(self.effect, E::NoStart | E::NoEnd | E::Cds | E::All) {
            details.push_str(&show(self.prot_length));
        }
        if self.effect.is_intronic() {
            details.push_str(&format!(
                "{}/{}[{}]",
                show(self.which_intron),
                show(self.how_many_introns),
                show(self.dist_from_coding)
            ));
        }
        if matches!(
            self.effect,
            E::NoFrameShift
                | E::NoFrameShiftNewStop
                | E::FrameShift
                | E::SpliceSite
                | E::Synonymous
                | E::Missense
                | E::Nonsense
                | E::CodingUnknown
        ) {
            details.push_str(&format!("{}/{}", show(self.prot_pos), show(self.prot_length)));
        }
        if matches!(
            self.effect,
            E::NoFrameShift | E::NoFrameShiftNewStop | E::Missense | E::Nonsense | E::CodingUnknown
        ) {
            details.push_str(&format!("({})", show(self.aa_change.as_deref())));
        }
        match self.effect {
            E::NoMutation => details.push_str("no-mutation"),
            E::Utr5 | E::Utr3 => details.push_str(&show(self.dist_from_coding)),
            E::NonCoding | E::Unknown | E::TrnaAnticodon => details.push_str(&show(self.length)),
            E::Promoter => details.push_str(&show(self.dist_from_5utr)),
            _ => {}
        }
        details
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gene:{} transcript:{} strand:{} effect:{} protein:{}/{} aa:{}",
            show(self.gene.as_deref()),
            show(self.transcript_id.as_deref()),
            show(self.strand),
            self.effect,
            show(self.prot_pos),
            show(self.prot_length),
            show(self.aa_change.as_deref()),
        )
    }
}

/// Render an optional value, with `None` for a missing one.
fn show<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}
