//! Codon translation using the nuclear genetic code.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Amino acid produced by translating a codon.
///
/// Displayed with three-letter codes; the stop codon is `End` and an
/// untranslatable codon (ambiguous base, wrong length) is `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AminoAcid {
    Ala,
    Arg,
    Asn,
    Asp,
    Cys,
    Gln,
    Glu,
    Gly,
    His,
    Ile,
    Leu,
    Lys,
    Met,
    Phe,
    Pro,
    Ser,
    Thr,
    Trp,
    Tyr,
    Val,
    End,
    Unknown,
}

impl AminoAcid {
    fn from_one_letter(code: u8) -> Self {
        match code {
            b'A' => Self::Ala,
            b'R' => Self::Arg,
            b'N' => Self::Asn,
            b'D' => Self::Asp,
            b'C' => Self::Cys,
            b'Q' => Self::Gln,
            b'E' => Self::Glu,
            b'G' => Self::Gly,
            b'H' => Self::His,
            b'I' => Self::Ile,
            b'L' => Self::Leu,
            b'K' => Self::Lys,
            b'M' => Self::Met,
            b'F' => Self::Phe,
            b'P' => Self::Pro,
            b'S' => Self::Ser,
            b'T' => Self::Thr,
            b'W' => Self::Trp,
            b'Y' => Self::Tyr,
            b'V' => Self::Val,
            b'*' => Self::End,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ala => "Ala",
            Self::Arg => "Arg",
            Self::Asn => "Asn",
            Self::Asp => "Asp",
            Self::Cys => "Cys",
            Self::Gln => "Gln",
            Self::Glu => "Glu",
            Self::Gly => "Gly",
            Self::His => "His",
            Self::Ile => "Ile",
            Self::Leu => "Leu",
            Self::Lys => "Lys",
            Self::Met => "Met",
            Self::Phe => "Phe",
            Self::Pro => "Pro",
            Self::Ser => "Ser",
            Self::Thr => "Thr",
            Self::Trp => "Trp",
            Self::Tyr => "Tyr",
            Self::Val => "Val",
            Self::End => "End",
            Self::Unknown => "?",
        }
    }

    #[must_use]
    pub fn is_stop(self) -> bool {
        self == Self::End
    }

    #[must_use]
    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AminoAcid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [AminoAcid; 22] = [
            AminoAcid::Ala,
            AminoAcid::Arg,
            AminoAcid::Asn,
            AminoAcid::Asp,
            AminoAcid::Cys,
            AminoAcid::Gln,
            AminoAcid::Glu,
            AminoAcid::Gly,
            AminoAcid::His,
            AminoAcid::Ile,
            AminoAcid::Leu,
            AminoAcid::Lys,
            AminoAcid::Met,
            AminoAcid::Phe,
            AminoAcid::Pro,
            AminoAcid::Ser,
            AminoAcid::Thr,
            AminoAcid::Trp,
            AminoAcid::Tyr,
            AminoAcid::Val,
            AminoAcid::End,
            AminoAcid::Unknown,
        ];
        ALL.into_iter()
            .find(|aa| aa.as_str() == s)
            .ok_or_else(|| Error::Parse(format!("unknown amino acid: '{s}'")))
    }
}

/// Lookup table for translating codons to amino acids.
///
/// Indexed by 6-bit codon encoding: A=0, C=1, G=2, T=3.
/// Index = first*16 + second*4 + third.
pub struct CodonTable {
    table: [u8; 64],
}

fn base_to_index(b: u8) -> Option<usize> {
    match b {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' => Some(3),
        _ => None,
    }
}

impl CodonTable {
    /// Nuclear genetic code (NCBI translation table 1).
    #[must_use]
    pub fn nuclear() -> Self {
        #[rustfmt::skip]
        let table: [u8; 64] = [
            b'K', b'N', b'K', b'N',  // AA*
            b'T', b'T', b'T', b'T',  // AC*
            b'R', b'S', b'R', b'S',  // AG*
            b'I', b'I', b'M', b'I',  // AT*
            b'Q', b'H', b'Q', b'H',  // CA*
            b'P', b'P', b'P', b'P',  // CC*
            b'R', b'R', b'R', b'R',  // CG*
            b'L', b'L', b'L', b'L',  // CT*
            b'E', b'D', b'E', b'D',  // GA*
            b'A', b'A', b'A', b'A',  // GC*
            b'G', b'G', b'G', b'G',  // GG*
            b'V', b'V', b'V', b'V',  // GT*
            b'*', b'Y', b'*', b'Y',  // TA*: TAA, TAG stop
            b'S', b'S', b'S', b'S',  // TC*
            b'*', b'C', b'W', b'C',  // TG*: TGA stop
            b'L', b'F', b'L', b'F',  // TT*
        ];
        Self { table }
    }

    /// Translate a single codon to an amino acid.
    ///
    /// Codons that are not exactly three bases long or contain anything
    /// other than A/C/G/T (case-insensitive) translate to `Unknown`.
    #[must_use]
    pub fn translate_codon(&self, codon: &[u8]) -> AminoAcid {
        if codon.len() != 3 {
            return AminoAcid::Unknown;
        }
        match (
            base_to_index(codon[0]),
            base_to_index(codon[1]),
            base_to_index(codon[2]),
        ) {
            (Some(a), Some(b), Some(c)) => {
                AminoAcid::from_one_letter(self.table[a * 16 + b * 4 + c])
            }
            _ => AminoAcid::Unknown,
        }
    }
}

impl Default for CodonTable {
    fn default() -> Self {
        Self::nuclear()
    }
}

/// Translate a nucleotide string in consecutive triplets.
///
/// A trailing partial codon translates to `Unknown`.
pub fn translate(seq: &[u8], table: &CodonTable) -> Vec<AminoAcid> {
    seq.chunks(3).map(|codon| table.translate_codon(codon)).collect()
}

/// Join amino acids into the concatenated three-letter form (`LysArg`).
#[must_use]
pub fn join_amino_acids(amino_acids: &[AminoAcid]) -> String {
    amino_acids.iter().map(|aa| aa.as_str()).collect()
}
