//! Forward-strand annotation request.

use tracing::{debug, error};

use crate::codon::{AminoAcid, translate};
use crate::error::Error;

use super::{AnnotationRequest, RequestContext, coding_left, coding_right, to_full_codon};

/// Request for a transcript on the forward strand; 5' is toward lower positions.
pub struct PositiveStrandRequest<'a> {
    context: RequestContext<'a>,
}

impl<'a> PositiveStrandRequest<'a> {
    #[must_use]
    pub fn new(context: RequestContext<'a>) -> Self {
        Self { context }
    }

    fn frame(&self, pos: i64, index: usize) -> i64 {
        let ctx = &self.context;
        let cds = ctx.cds();
        let exon = &ctx.exons()[index];
        let Some(exon_frame) = exon.frame.filter(|_| exon.stop >= cds.start) else {
            error!(
                transcript = ctx.transcript.transcript_id(),
                pos, "cannot detect frame: exon ends before the coding region"
            );
            return 0;
        };
        let frame = (pos - cds.start.max(exon.start) + i64::from(exon_frame)).rem_euclid(3);
        debug!(frame, pos, "frame");
        frame
    }
}

impl AnnotationRequest for PositiveStrandRequest<'_> {
    fn context(&self) -> &RequestContext<'_> {
        &self.context
    }

    fn coding_nucleotide_position(&self, pos: i64) -> i64 {
        let mut length = 0;
        for region in self.context.transcript.cds_regions() {
            if region.start - 1 <= pos && pos <= region.stop + 1 {
                length += pos - region.start;
                break;
            }
            length += region.len();
        }
        length
    }

    fn protein_position(&self) -> (i64, i64) {
        let variant = self.context.variant;
        let start_pos = self.context.clamp_in_cds(variant.position);
        let end_pos = self
            .context
            .clamp_in_cds(variant.ref_position_last() - 1)
            .max(start_pos);
        (
            self.coding_nucleotide_position(start_pos) / 3 + 1,
            self.coding_nucleotide_position(end_pos) / 3 + 1,
        )
    }

    fn protein_length(&self) -> i64 {
        self.coding_nucleotide_position(self.context.cds().end) / 3
    }

    fn codons(&self) -> Result<(String, String), Error> {
        let ctx = &self.context;
        let variant = ctx.variant;
        let ref_len = variant.reference.len() as i64;
        let alt_len = variant.alternate.len() as i64;

        let pos = ctx.cds().start.max(variant.position);
        let index = self
            .coding_region_for_pos(pos)
            .ok_or_else(|| Error::NoCodingRegionFound {
                transcript_id: ctx.transcript.transcript_id().to_string(),
                position: pos,
            })?;
        let frame = self.frame(pos, index);

        let before = coding_left(ctx, Some(pos - 1), frame, index)?;
        let ref_after = coding_right(ctx, Some(pos), ref_len + to_full_codon(ref_len + frame), index)?;
        let alt_after = coding_right(
            ctx,
            Some(variant.position + ref_len),
            to_full_codon(alt_len + frame),
            index,
        )?;

        let ref_codons = format!("{before}{ref_after}");
        let alt_codons = format!("{before}{}{alt_after}", variant.alternate);
        debug!(%ref_codons, %alt_codons, "codons");
        Ok((ref_codons, alt_codons))
    }

    fn translate(&self, codons: &str) -> Vec<AminoAcid> {
        translate(codons.as_bytes(), self.context.code)
    }

    fn is_start_codon_affected(&self) -> bool {
        let cds = self.context.cds();
        let variant = self.context.variant;
        variant.position <= cds.start + 2 && cds.start <= variant.corrected_ref_position_last()
    }

    fn is_stop_codon_affected(&self) -> bool {
        let cds = self.context.cds();
        let variant = self.context.variant;
        variant.position <= cds.end && cds.end - 2 <= variant.corrected_ref_position_last()
    }

    fn has_utr5_region(&self) -> bool {
        self.context.transcript.tx_start() != self.context.cds().start
    }

    fn has_utr3_region(&self) -> bool {
        self.context.transcript.tx_end() != self.context.cds().end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codon::{CodonTable, join_amino_acids};
    use crate::reference::InMemoryGenome;
    use crate::request::tests::genome_with;
    use crate::strand::Strand;
    use crate::transcript::TranscriptModel;
    use crate::variant::Variant;

    // Coding sequence ATG AAA GGC TGG CAG | AAG GAA CGT TTC GCA CCA TG | C GAT CTG TAA
    fn fixture() -> (TranscriptModel, InMemoryGenome) {
        let tm = TranscriptModel::new(
            "GENEA",
            "TX1",
            "1",
            Strand::Forward,
            &[(11, 30), (41, 60), (71, 90)],
            Some((16, 80)),
        )
        .unwrap();
        let genome = genome_with(
            &[
                (16, "ATGAAAGGCTGGCAG"),
                (41, "AAGGAACGTTTCGCACCATG"),
                (71, "CGATCTGTAA"),
            ],
            120,
        );
        (tm, genome)
    }

    fn with_request<T>(variant: &Variant, check: impl FnOnce(&PositiveStrandRequest<'_>) -> T) -> T {
        let (tm, genome) = fixture();
        let code = CodonTable::nuclear();
        let request =
            PositiveStrandRequest::new(RequestContext::new(variant, &tm, &genome, &code, 0, 2));
        check(&request)
    }

    #[test]
    fn protein_length_and_positions() {
        let variant = Variant::new("1", 44, "GAA", "").unwrap();
        with_request(&variant, |request| {
            assert_eq!(request.protein_length(), 14);
            assert_eq!(request.protein_position(), (7, 7));
            assert_eq!(request.protein_position_for_pos(71), Some(12));
            assert_eq!(request.protein_position_for_pos(15), None);
            assert_eq!(request.protein_position_for_pos(81), None);
        });
    }

    #[test]
    fn codon_window_within_exon() {
        let variant = Variant::new("1", 22, "G", "A").unwrap();
        with_request(&variant, |request| {
            assert_eq!(request.codons().unwrap(), ("GGC".to_string(), "AGC".to_string()));
            let (reference, alternate) = request.amino_acids().unwrap();
            assert_eq!(join_amino_acids(reference), "Gly");
            assert_eq!(join_amino_acids(alternate), "Ser");
        });
    }

    #[test]
    fn codon_window_across_exons() {
        let variant = Variant::new("1", 71, "C", "A").unwrap();
        with_request(&variant, |request| {
            assert_eq!(request.codons().unwrap(), ("TGC".to_string(), "TGA".to_string()));
        });
    }

    #[test]
    fn insertion_keeps_whole_codons() {
        let variant = Variant::new("1", 45, "", "CCT").unwrap();
        with_request(&variant, |request| {
            let (reference, alternate) = request.codons().unwrap();
            assert_eq!(reference, "GAA");
            assert_eq!(alternate, "GCCTAA");
            assert_eq!(reference.len() % 3, 0);
            assert_eq!(alternate.len() % 3, 0);
        });
    }

    #[test]
    fn start_and_stop_overlap() {
        let start = Variant::new("1", 14, "CCA", "C").unwrap();
        with_request(&start, |request| {
            assert!(request.is_start_codon_affected());
            assert!(!request.is_stop_codon_affected());
        });
        let stop = Variant::new("1", 80, "A", "C").unwrap();
        with_request(&stop, |request| {
            assert!(request.is_stop_codon_affected());
            assert!(request.has_utr5_region());
            assert!(request.has_utr3_region());
        });
    }

    #[test]
    fn exonic_offsets() {
        let variant = Variant::new("1", 44, "G", "T").unwrap();
        with_request(&variant, |request| {
            assert_eq!(request.exonic_length(), 60);
            assert_eq!(request.exonic_position(), 24);
        });
    }
}
