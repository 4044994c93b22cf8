//! Parser for FASTA reference sequence files.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::Error;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Reads a FASTA file, decompressing it when it starts with the gzip magic bytes.
pub fn read_fasta_file(path: &Path) -> Result<Vec<(String, Vec<u8>)>, Error> {
    let mut reader = BufReader::new(File::open(path)?);
    let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    if is_gzip {
        parse_fasta_gz(reader)
    } else {
        parse_fasta(reader)
    }
}

/// Reads gzip-compressed FASTA and yields (name, sequence) pairs.
pub fn parse_fasta_gz<R: Read>(reader: R) -> Result<Vec<(String, Vec<u8>)>, Error> {
    parse_fasta(BufReader::new(MultiGzDecoder::new(reader)))
}

/// Reads FASTA and yields (name, sequence) pairs.
///
/// The name is the first whitespace-delimited token of the header line.
/// Bases are upper-cased; lines before the first header are ignored.
pub fn parse_fasta<R: BufRead>(reader: R) -> Result<Vec<(String, Vec<u8>)>, Error> {
    let mut records: Vec<(String, Vec<u8>)> = Vec::new();
    let mut current: Option<(String, Vec<u8>)> = None;

    for line in reader.lines() {
        let line = line?;
        if let Some(header) = line.strip_prefix('>') {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some((sequence_name(header)?, Vec::new()));
        } else if let Some((_, sequence)) = current.as_mut() {
            let start = sequence.len();
            sequence.extend_from_slice(line.trim().as_bytes());
            sequence[start..].make_ascii_uppercase();
        }
    }

    if let Some(record) = current {
        records.push(record);
    }
    Ok(records)
}

fn sequence_name(header: &str) -> Result<String, Error> {
    header
        .split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| Error::Parse(format!("empty FASTA header: >{header}")))
}
