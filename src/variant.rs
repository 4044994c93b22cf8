//! Variant representation, shorthand notation and genomic locations.
//!
//! A [`Variant`] is built once per annotation call and never mutated. Small
//! variants carry reference/alternate alleles that have been upper-cased,
//! validated and stripped of their shared leading bases; copy-number variants
//! carry an explicit length instead.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::sequence::{normalize_nucleotides, trim_common_prefix};

/// Shape of a variant after allele trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Substitution,
    Insertion,
    Deletion,
    /// Multi-base replacement (equal or unequal allele lengths).
    Complex,
    LargeDuplication,
    LargeDeletion,
}

impl VariantKind {
    #[must_use]
    pub fn is_cnv(self) -> bool {
        matches!(self, Self::LargeDuplication | Self::LargeDeletion)
    }
}

/// A genomic variant in 1-based coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub chromosome: String,
    pub position: i64,
    pub reference: String,
    pub alternate: String,
    /// Span of a copy-number variant; `None` for allele-based variants.
    pub length: Option<i64>,
    pub kind: VariantKind,
}

impl Variant {
    /// Build an allele-based variant, trimming the shared allele prefix.
    pub fn new(
        chromosome: &str,
        position: i64,
        reference: &str,
        alternate: &str,
    ) -> Result<Self, Error> {
        if chromosome.is_empty() {
            return Err(Error::InvalidInput("empty chromosome name".to_string()));
        }
        if position < 1 {
            return Err(Error::InvalidInput(format!(
                "variant position must be 1-based, got {position}"
            )));
        }
        let reference = normalize_nucleotides(reference)?;
        let alternate = normalize_nucleotides(alternate)?;
        let (position, reference, alternate) = trim_common_prefix(position, &reference, &alternate);

        // Identical alleles trim down to an empty edit; annotating that would
        // silently report a no-op as a coding change.
        if reference.is_empty() && alternate.is_empty() {
            return Err(Error::InvalidInput(format!(
                "reference and alternate alleles are identical at {chromosome}:{}",
                position - 1
            )));
        }

        let kind = match (reference.len(), alternate.len()) {
            (0, _) => VariantKind::Insertion,
            (_, 0) => VariantKind::Deletion,
            (1, 1) => VariantKind::Substitution,
            _ => VariantKind::Complex,
        };

        Ok(Self {
            chromosome: chromosome.to_string(),
            position,
            reference,
            alternate,
            length: None,
            kind,
        })
    }

    /// Build a copy-number variant covering `[position, position + length]`.
    pub fn cnv(
        chromosome: &str,
        position: i64,
        length: i64,
        kind: VariantKind,
    ) -> Result<Self, Error> {
        if !kind.is_cnv() {
            return Err(Error::InvalidInput(format!(
                "{kind:?} is not a copy-number variant type"
            )));
        }
        if length < 0 {
            return Err(Error::InvalidInput(format!(
                "copy-number variant length must not be negative, got {length}"
            )));
        }
        if position < 1 {
            return Err(Error::InvalidInput(format!(
                "variant position must be 1-based, got {position}"
            )));
        }
        Ok(Self {
            chromosome: chromosome.to_string(),
            position,
            reference: String::new(),
            alternate: String::new(),
            length: Some(length),
            kind,
        })
    }

    /// Build a variant from a location and a variant description.
    pub fn from_spec(location: &Location, spec: &VariantSpec<'_>) -> Result<Self, Error> {
        let notation = match spec {
            VariantSpec::Alleles {
                reference,
                alternate,
            } => {
                location.require_point()?;
                return Self::new(&location.chromosome, location.start, reference, alternate);
            }
            VariantSpec::Notation(text) => text.parse::<Notation>()?,
        };

        match notation {
            Notation::Cnv(kind) => {
                let end = location.end.ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "copy-number variant needs a chrom:begin-end location, got {location}"
                    ))
                })?;
                Self::cnv(&location.chromosome, location.start, end - location.start, kind)
            }
            Notation::Substitution {
                reference,
                alternate,
            } => {
                location.require_point()?;
                Self::new(&location.chromosome, location.start, &reference, &alternate)
            }
            Notation::Deletion(count) => {
                location.require_point()?;
                Self::new(&location.chromosome, location.start, &"N".repeat(count), "")
            }
            Notation::Insertion(bases) => {
                location.require_point()?;
                Self::new(&location.chromosome, location.start, "", &bases)
            }
        }
    }

    /// One past the last reference base (`position` for insertions).
    #[must_use]
    pub fn ref_position_last(&self) -> i64 {
        self.position + self.reference.len() as i64
    }

    /// Last reference base covered, never before `position`.
    #[must_use]
    pub fn corrected_ref_position_last(&self) -> i64 {
        self.position.max(self.ref_position_last() - 1)
    }

    #[must_use]
    pub fn is_cnv(&self) -> bool {
        self.kind.is_cnv()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.length {
            Some(length) => write!(
                f,
                "{}:{}-{} {:?}",
                self.chromosome,
                self.position,
                self.position + length,
                self.kind
            ),
            None => write!(
                f,
                "{}:{} {}>{}",
                self.chromosome, self.position, self.reference, self.alternate
            ),
        }
    }
}

/// How the caller describes the variant at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantSpec<'a> {
    /// Shorthand notation: `sub(G->A)`, `del(3)`, `ins(ACGT)`, `CNV+`, `CNV-`.
    Notation(&'a str),
    /// Explicit reference and alternate alleles.
    Alleles {
        reference: &'a str,
        alternate: &'a str,
    },
}

/// Parsed shorthand variant notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notation {
    Substitution { reference: String, alternate: String },
    Deletion(usize),
    Insertion(String),
    Cnv(VariantKind),
}

fn unwrap_call<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    text.strip_prefix(name)?
        .strip_prefix('(')?
        .strip_suffix(')')
}

impl FromStr for Notation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        match text {
            "CNV+" => return Ok(Self::Cnv(VariantKind::LargeDuplication)),
            "CNV-" => return Ok(Self::Cnv(VariantKind::LargeDeletion)),
            _ => {}
        }

        if let Some(body) = unwrap_call(text, "sub") {
            let (reference, alternate) = body
                .split_once("->")
                .ok_or_else(|| Error::InvalidInput(format!("malformed substitution: '{text}'")))?;
            if reference.is_empty() || alternate.is_empty() {
                return Err(Error::InvalidInput(format!("malformed substitution: '{text}'")));
            }
            return Ok(Self::Substitution {
                reference: reference.to_string(),
                alternate: alternate.to_string(),
            });
        }
        if let Some(body) = unwrap_call(text, "del") {
            let count: usize = body
                .parse()
                .map_err(|_| Error::InvalidInput(format!("malformed deletion length: '{text}'")))?;
            if count == 0 {
                return Err(Error::InvalidInput(format!("empty deletion: '{text}'")));
            }
            return Ok(Self::Deletion(count));
        }
        if let Some(body) = unwrap_call(text, "ins") {
            if body.is_empty() {
                return Err(Error::InvalidInput(format!("empty insertion: '{text}'")));
            }
            return Ok(Self::Insertion(body.to_string()));
        }
        Err(Error::InvalidInput(format!("unrecognized variant notation: '{text}'")))
    }
}

/// A `chrom:pos` or `chrom:begin-end` location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub chromosome: String,
    pub start: i64,
    pub end: Option<i64>,
}

impl Location {
    #[must_use]
    pub fn point(chromosome: &str, position: i64) -> Self {
        Self {
            chromosome: chromosome.to_string(),
            start: position,
            end: None,
        }
    }

    fn require_point(&self) -> Result<(), Error> {
        if self.end.is_some() {
            return Err(Error::InvalidInput(format!(
                "expected a single position, got range {self}"
            )));
        }
        Ok(())
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chromosome, coords) = s
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| Error::Parse(format!("location must be chrom:pos, got '{s}'")))?;
        if chromosome.is_empty() {
            return Err(Error::Parse(format!("missing chromosome in location '{s}'")));
        }
        let parse_coord = |text: &str| {
            text.parse::<i64>()
                .map_err(|_| Error::Parse(format!("invalid coordinate '{text}' in location '{s}'")))
        };
        let (start, end) = match coords.split_once('-') {
            Some((begin, end)) => (parse_coord(begin)?, Some(parse_coord(end)?)),
            None => (parse_coord(coords)?, None),
        };
        if let Some(end) = end {
            if end < start {
                return Err(Error::Parse(format!("location end before start: '{s}'")));
            }
        }
        Ok(Self {
            chromosome: chromosome.to_string(),
            start,
            end,
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}:{}-{}", self.chromosome, self.start, end),
            None => write!(f, "{}:{}", self.chromosome, self.start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_positions() {
        let v = Variant::new("1", 100, "g", "A").unwrap();
        assert_eq!(v.kind, VariantKind::Substitution);
        assert_eq!(v.reference, "G");
        assert_eq!(v.ref_position_last(), 101);
        assert_eq!(v.corrected_ref_position_last(), 100);
    }

    #[test]
    fn insertion_positions() {
        let v = Variant::new("1", 100, "", "ACG").unwrap();
        assert_eq!(v.kind, VariantKind::Insertion);
        assert_eq!(v.ref_position_last(), 100);
        assert_eq!(v.corrected_ref_position_last(), 100);
    }

    #[test]
    fn vcf_style_alleles_are_trimmed() {
        let v = Variant::new("1", 100, "ACGT", "A").unwrap();
        assert_eq!(v.position, 101);
        assert_eq!(v.reference, "CGT");
        assert_eq!(v.alternate, "");
        assert_eq!(v.kind, VariantKind::Deletion);
        assert_eq!(v.corrected_ref_position_last(), 103);
    }

    #[test]
    fn identical_alleles_rejected() {
        let err = Variant::new("1", 100, "G", "G").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn invalid_nucleotide_rejected() {
        let err = Variant::new("1", 100, "G", "X").unwrap_err();
        assert!(matches!(err, Error::InvalidNucleotide('X')));
    }

    #[test]
    fn parse_notation() {
        assert_eq!(
            "sub(G->A)".parse::<Notation>().unwrap(),
            Notation::Substitution {
                reference: "G".to_string(),
                alternate: "A".to_string()
            }
        );
        assert_eq!("del(3)".parse::<Notation>().unwrap(), Notation::Deletion(3));
        assert_eq!(
            "ins(ACGT)".parse::<Notation>().unwrap(),
            Notation::Insertion("ACGT".to_string())
        );
        assert_eq!(
            "CNV-".parse::<Notation>().unwrap(),
            Notation::Cnv(VariantKind::LargeDeletion)
        );
    }

    #[test]
    fn malformed_notation() {
        for text in ["sub(GA)", "sub(->A)", "del(x)", "del(0)", "ins()", "dup(3)", "del(3"] {
            assert!(
                matches!(text.parse::<Notation>(), Err(Error::InvalidInput(_))),
                "{text} should not parse"
            );
        }
    }

    #[test]
    fn deletion_notation_uses_placeholder_bases() {
        let location: Location = "1:3519050".parse().unwrap();
        let v = Variant::from_spec(&location, &VariantSpec::Notation("del(2)")).unwrap();
        assert_eq!(v.reference, "NN");
        assert_eq!(v.alternate, "");
        assert_eq!(v.corrected_ref_position_last(), 3519051);
    }

    #[test]
    fn cnv_from_range() {
        let location: Location = "2:1000-5000".parse().unwrap();
        let v = Variant::from_spec(&location, &VariantSpec::Notation("CNV+")).unwrap();
        assert!(v.is_cnv());
        assert_eq!(v.position, 1000);
        assert_eq!(v.length, Some(4000));
    }

    #[test]
    fn cnv_requires_range() {
        let location: Location = "2:1000".parse().unwrap();
        assert!(Variant::from_spec(&location, &VariantSpec::Notation("CNV-")).is_err());
    }

    #[test]
    fn small_variant_rejects_range() {
        let location: Location = "2:1000-1005".parse().unwrap();
        let spec = VariantSpec::Alleles {
            reference: "A",
            alternate: "C",
        };
        assert!(Variant::from_spec(&location, &spec).is_err());
    }

    #[test]
    fn parse_location() {
        let loc: Location = "chr17:74729179".parse().unwrap();
        assert_eq!(loc, Location::point("chr17", 74729179));
        assert_eq!(loc.to_string(), "chr17:74729179");
        assert!("17".parse::<Location>().is_err());
        assert!("17:abc".parse::<Location>().is_err());
        assert!("17:10-5".parse::<Location>().is_err());
    }
}
