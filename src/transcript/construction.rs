//! Transcript construction: structural validation, exon frames and CDS regions.

use serde::Deserialize;

use crate::error::Error;
use crate::strand::Strand;

use super::types::{Cds, Exon, TranscriptModel};

/// Gene-model record as stored in JSON gene-model files.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRecord {
    pub gene: String,
    pub transcript_id: String,
    pub chromosome: String,
    pub strand: String,
    pub exons: Vec<[i64; 2]>,
    #[serde(default)]
    pub cds: Option<[i64; 2]>,
}

impl TryFrom<TranscriptRecord> for TranscriptModel {
    type Error = Error;

    fn try_from(record: TranscriptRecord) -> Result<Self, Self::Error> {
        let strand: Strand = record.strand.parse()?;
        let exons: Vec<(i64, i64)> = record.exons.iter().map(|&[s, e]| (s, e)).collect();
        TranscriptModel::new(
            &record.gene,
            &record.transcript_id,
            &record.chromosome,
            strand,
            &exons,
            record.cds.map(|[s, e]| (s, e)),
        )
    }
}

impl TranscriptModel {
    /// Build a transcript from genomic exon intervals and optional CDS bounds.
    ///
    /// Exons must be sorted, non-overlapping and non-empty; CDS bounds must
    /// fall inside exons.
    pub fn new(
        gene: &str,
        transcript_id: &str,
        chromosome: &str,
        strand: Strand,
        exons: &[(i64, i64)],
        cds: Option<(i64, i64)>,
    ) -> Result<Self, Error> {
        validate_exons(transcript_id, exons)?;
        let cds = cds
            .map(|(start, end)| validate_cds(transcript_id, exons, start, end))
            .transpose()?;

        let mut exons: Vec<Exon> = exons
            .iter()
            .enumerate()
            .map(|(index, &(start, stop))| Exon {
                start,
                stop,
                frame: None,
                index,
            })
            .collect();

        let cds_regions = match cds {
            Some(cds) => {
                assign_frames(&mut exons, cds, strand);
                build_cds_regions(&exons, cds, strand)
            }
            None => Vec::new(),
        };

        Ok(Self {
            gene: gene.to_string(),
            transcript_id: transcript_id.to_string(),
            chromosome: chromosome.to_string(),
            strand,
            exons,
            cds,
            cds_regions,
        })
    }
}

fn validate_exons(transcript_id: &str, exons: &[(i64, i64)]) -> Result<(), Error> {
    if exons.is_empty() {
        return Err(Error::MalformedTranscript(format!(
            "{transcript_id}: transcript has no exons"
        )));
    }
    for &(start, stop) in exons {
        if start > stop {
            return Err(Error::MalformedTranscript(format!(
                "{transcript_id}: exon {start}-{stop} ends before it starts"
            )));
        }
    }
    for pair in exons.windows(2) {
        if pair[1].0 <= pair[0].1 {
            return Err(Error::MalformedTranscript(format!(
                "{transcript_id}: exons {}-{} and {}-{} are unsorted or overlapping",
                pair[0].0, pair[0].1, pair[1].0, pair[1].1
            )));
        }
    }
    Ok(())
}

fn validate_cds(
    transcript_id: &str,
    exons: &[(i64, i64)],
    start: i64,
    end: i64,
) -> Result<Cds, Error> {
    if start > end {
        return Err(Error::MalformedTranscript(format!(
            "{transcript_id}: CDS {start}-{end} ends before it starts"
        )));
    }
    let in_exon = |pos: i64| exons.iter().any(|&(s, e)| s <= pos && pos <= e);
    if !in_exon(start) || !in_exon(end) {
        return Err(Error::MalformedTranscript(format!(
            "{transcript_id}: CDS {start}-{end} does not start and end inside exons"
        )));
    }
    Ok(Cds { start, end })
}

/// Indices of `exons` in transcript (5'→3') order.
fn transcript_order(len: usize, strand: Strand) -> Box<dyn Iterator<Item = usize>> {
    if strand.is_reverse() {
        Box::new((0..len).rev())
    } else {
        Box::new(0..len)
    }
}

fn coding_part(exon: &Exon, cds: Cds) -> Option<(i64, i64)> {
    let start = exon.start.max(cds.start);
    let stop = exon.stop.min(cds.end);
    (start <= stop).then_some((start, stop))
}

fn assign_frames(exons: &mut [Exon], cds: Cds, strand: Strand) {
    let mut coding_bases: i64 = 0;
    for i in transcript_order(exons.len(), strand) {
        if let Some((start, stop)) = coding_part(&exons[i], cds) {
            exons[i].frame = Some((coding_bases % 3) as u8);
            coding_bases += stop - start + 1;
        }
    }
}

fn build_cds_regions(exons: &[Exon], cds: Cds, strand: Strand) -> Vec<Exon> {
    transcript_order(exons.len(), strand)
        .filter_map(|i| {
            let exon = &exons[i];
            coding_part(exon, cds).map(|(start, stop)| Exon {
                start,
                stop,
                frame: exon.frame,
                index: exon.index,
            })
        })
        .collect()
}
