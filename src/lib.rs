//! Transcript-level functional effect annotation of genomic variants.
//!
//! Given a reference genome, gene models and a variant, [`annotator::EffectAnnotator`]
//! reports the effect on every overlapping transcript: the effect category,
//! the protein position and the amino acid change.

pub mod error;

pub mod annotator;
pub mod checkers;
pub mod cli;
pub mod codon;
pub mod config;
pub mod effect;
pub mod fasta;
pub mod reference;
pub mod request;
pub mod sequence;
pub mod strand;
pub mod transcript;
pub mod variant;
