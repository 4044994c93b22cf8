//! Nucleotide sequence helpers: allele trimming, complementing and validation.

use crate::error::Error;

/// Strip the bases shared at the front of `reference` and `alternate`.
///
/// The position advances by the number of bases removed. When either allele
/// is empty nothing is trimmed.
#[must_use]
pub fn trim_common_prefix(
    position: i64,
    reference: &str,
    alternate: &str,
) -> (i64, String, String) {
    if reference.is_empty() || alternate.is_empty() {
        return (position, reference.to_string(), alternate.to_string());
    }
    let shared = reference
        .chars()
        .zip(alternate.chars())
        .take_while(|(r, a)| r == a)
        .count();
    (
        position + shared as i64,
        reference.chars().skip(shared).collect(),
        alternate.chars().skip(shared).collect(),
    )
}

/// Reverse-complement a nucleotide sequence.
///
/// Input is case-insensitive and output is upper case; `N` maps to itself.
pub fn reverse_complement(seq: &str) -> Result<String, Error> {
    seq.chars()
        .rev()
        .map(|c| match c.to_ascii_uppercase() {
            'A' => Ok('T'),
            'T' => Ok('A'),
            'C' => Ok('G'),
            'G' => Ok('C'),
            'N' => Ok('N'),
            _ => Err(Error::InvalidNucleotide(c)),
        })
        .collect()
}

/// Upper-case an allele, rejecting anything outside {A, C, G, T, N}.
pub fn normalize_nucleotides(seq: &str) -> Result<String, Error> {
    seq.chars()
        .map(|c| {
            let upper = c.to_ascii_uppercase();
            if matches!(upper, 'A' | 'C' | 'G' | 'T' | 'N') {
                Ok(upper)
            } else {
                Err(Error::InvalidNucleotide(c))
            }
        })
        .collect()
}
