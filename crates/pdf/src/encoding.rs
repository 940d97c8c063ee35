//! Text encodings

use std::{error::Error, fmt};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Codepoint U+{0:04x} is not valid in PDFDocEncoding
#[allow(clippy::upper_case_acronyms)]
pub struct PDFDocEncodingError(pub char);

impl Error for PDFDocEncodingError {}
impl fmt::Display for PDFDocEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Codepoint U+{:04x} is not valid in PDFDocEncoding",
            self.0 as u32
        )
    }
}

fn pdf_char_encode(chr: char) -> Result<u8, PDFDocEncodingError> {
    match u32::from(chr) {
        0x09 | 0x0A | 0x0D | 0x20..=0x7E | 0xA1..=0xFF => Ok(chr as u8),
        0xA0 | 0x202F => Ok(0x20),
        0x2022 => Ok(0x80),
        0x2026 => Ok(0x83),
        0x2014 => Ok(0x84),
        0x2013 => Ok(0x85),
        0x2212 => Ok(0x8A),
        0x201E => Ok(0x8C),
        0x201C => Ok(0x8D),
        0x201D => Ok(0x8E),
        0x2018 => Ok(0x8F),
        0x2019 => Ok(0x90),
        0x2122 => Ok(0x92),
        0x0152 => Ok(0x96),
        0x0153 => Ok(0x9C),
        0x20AC => Ok(0xA0),
        _ => Err(PDFDocEncodingError(chr)),
    }
}

/// Encode a string as PDFDocEncoding (used for `/Info` strings and outline titles)
pub fn pdf_doc_encode(input: &str) -> Result<Vec<u8>, PDFDocEncodingError> {
    input.chars().map(pdf_char_encode).collect()
}

/// Encode a string as PDFDocEncoding, replacing unconvertible characters with `?`
pub fn pdf_doc_encode_lossy(input: &str) -> Vec<u8> {
    input
        .chars()
        .map(|chr| pdf_char_encode(chr).unwrap_or(b'?'))
        .collect()
}

/// Map a character to its code in `WinAnsiEncoding` (CP-1252)
pub fn win_ansi_char(chr: char) -> Option<u8> {
    match u32::from(chr) {
        0x20..=0x7E | 0xA1..=0xFF => Some(chr as u8),
        // No-break spaces, including the narrow one used for digit grouping
        0xA0 | 0x202F | 0x2007 => Some(0xA0),
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95),
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

/// Encode a string in `WinAnsiEncoding`, ignoring control characters and
/// replacing everything else that is not representable with `?`
pub fn win_ansi_encode_lossy(input: &str) -> Vec<u8> {
    input
        .chars()
        .filter(|chr| !chr.is_control())
        .map(|chr| win_ansi_char(chr).unwrap_or(b'?'))
        .collect()
}
