//! Reverse-strand annotation request.

use tracing::{debug, error};

use crate::codon::AminoAcid;
use crate::error::Error;
use crate::sequence::reverse_complement;

use super::{AnnotationRequest, RequestContext, coding_left, coding_right, to_full_codon};

/// Request for a transcript on the reverse strand; 5' is toward higher positions.
///
/// Codon windows are assembled in genomic orientation and reverse-complemented
/// one codon at a time during translation.
pub struct NegativeStrandRequest<'a> {
    context: RequestContext<'a>,
}

impl<'a> NegativeStrandRequest<'a> {
    #[must_use]
    pub fn new(context: RequestContext<'a>) -> Self {
        Self { context }
    }

    fn frame(&self, pos: i64, index: usize) -> i64 {
        let ctx = &self.context;
        let cds = ctx.cds();
        let exon = &ctx.exons()[index];
        let Some(exon_frame) = exon.frame.filter(|_| exon.start <= cds.end) else {
            error!(
                transcript = ctx.transcript.transcript_id(),
                pos, "cannot detect frame: exon starts after the coding region"
            );
            return 0;
        };
        let frame = (cds.end.min(exon.stop) - pos + i64::from(exon_frame)).rem_euclid(3);
        debug!(frame, pos, "frame");
        frame
    }
}

impl AnnotationRequest for NegativeStrandRequest<'_> {
    fn context(&self) -> &RequestContext<'_> {
        &self.context
    }

    fn coding_nucleotide_position(&self, pos: i64) -> i64 {
        let mut length = 0;
        for region in self.context.transcript.cds_regions() {
            if region.start - 1 <= pos && pos <= region.stop + 1 {
                length += region.stop - pos;
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
            self.coding_nucleotide_position(end_pos) / 3 + 1,
            self.coding_nucleotide_position(start_pos) / 3 + 1,
        )
    }

    fn protein_length(&self) -> i64 {
        self.coding_nucleotide_position(self.context.cds().start) / 3
    }

    fn codons(&self) -> Result<(String, String), Error> {
        let ctx = &self.context;
        let variant = ctx.variant;
        let alt_len = variant.alternate.len() as i64;

        let pos = variant.position.max(ctx.cds().start);
        let last = variant.position + variant.reference.len() as i64 - 1;
        if pos > last + 1 {
            return Ok((String::new(), String::new()));
        }

        let index = self
            .coding_region_for_pos(pos)
            .ok_or_else(|| Error::NoCodingRegionFound {
                transcript_id: ctx.transcript.transcript_id().to_string(),
                position: pos,
            })?;
        let frame = self.frame(last, index);
        let span = last - pos + 1;
        let length = span + to_full_codon(span + frame);

        let before = coding_left(ctx, Some(last), length, index)?;
        let after = coding_right(ctx, Some(last + 1), frame, index)?;
        let alt_before = coding_left(
            ctx,
            Some(variant.position - 1),
            to_full_codon(alt_len + frame),
            index,
        )?;

        let ref_codons = format!("{before}{after}");
        let alt_codons = format!("{alt_before}{}{after}", variant.alternate);
        debug!(%ref_codons, %alt_codons, last, length, "codons");
        Ok((ref_codons, alt_codons))
    }

    fn translate(&self, codons: &str) -> Vec<AminoAcid> {
        let code = self.context.code;
        codons
            .as_bytes()
            .rchunks(3)
            .map(|chunk| {
                std::str::from_utf8(chunk)
                    .ok()
                    .and_then(|codon| reverse_complement(codon).ok())
                    .map_or(AminoAcid::Unknown, |coding| {
                        code.translate_codon(coding.as_bytes())
                    })
            })
            .collect()
    }

    fn is_start_codon_affected(&self) -> bool {
        let cds = self.context.cds();
        let variant = self.context.variant;
        variant.position <= cds.end && cds.end - 2 <= variant.corrected_ref_position_last()
    }

    fn is_stop_codon_affected(&self) -> bool {
        let cds = self.context.cds();
        let variant = self.context.variant;
        variant.position <= cds.start + 2 && cds.start <= variant.corrected_ref_position_last()
    }

    fn has_utr5_region(&self) -> bool {
        self.context.transcript.tx_end() != self.context.cds().end
    }

    fn has_utr3_region(&self) -> bool {
        self.context.transcript.tx_start() != self.context.cds().start
    }
}
