//! The standard Type1 fonts and their metrics
//!
//! Every conforming PDF reader ships the "standard 14" fonts, so they never
//! need to be embedded. The widths below come from the Adobe AFM files and
//! are expressed in 1/1000 of the font size.

use std::io;

use crate::{
    common::BaseEncoding,
    encoding::{win_ansi_char, win_ansi_encode_lossy},
    write::{Formatter, PdfName, Serialize},
};

/// A standard font that is used by the documents
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    /// Helvetica (regular)
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
    /// Helvetica-Oblique
    HelveticaOblique,
    /// ZapfDingbats, used for check marks
    ZapfDingbats,
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const DINGBAT_WIDTH: u16 = 760;

/// Strip the diacritic from a Latin-1 letter
fn base_letter(chr: char) -> Option<char> {
    let base = match chr {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}

impl StandardFont {
    /// All fonts, in resource order
    pub const ALL: [StandardFont; 4] = [
        Self::Helvetica,
        Self::HelveticaBold,
        Self::HelveticaOblique,
        Self::ZapfDingbats,
    ];

    /// The `/BaseFont` name
    pub fn base_font(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// The key of the font in a page's `/Font` resource dict
    pub fn resource_key(self) -> &'static str {
        match self {
            Self::Helvetica => "F1",
            Self::HelveticaBold => "F2",
            Self::HelveticaOblique => "F3",
            Self::ZapfDingbats => "F4",
        }
    }

    fn is_symbolic(self) -> bool {
        matches!(self, Self::ZapfDingbats)
    }

    /// Encode a string into the byte codes of this font
    pub fn encode(self, text: &str) -> Vec<u8> {
        if self.is_symbolic() {
            text.chars()
                .filter(|chr| !chr.is_control())
                .map(|chr| match chr {
                    '\u{2713}' => 0x33,
                    '\u{2714}' => 0x34,
                    '\u{2717}' => 0x37,
                    _ => 0x20,
                })
                .collect()
        } else {
            win_ansi_encode_lossy(text)
        }
    }

    /// The advance width of a byte code, in 1/1000 em
    pub fn code_width(self, code: u8) -> u16 {
        let table = match self {
            Self::Helvetica | Self::HelveticaOblique => &HELVETICA,
            Self::HelveticaBold => &HELVETICA_BOLD,
            Self::ZapfDingbats => {
                return if code == 0x20 { 278 } else { DINGBAT_WIDTH };
            }
        };
        let bold = matches!(self, Self::HelveticaBold);
        match code {
            0x20..=0x7E => table[(code - 0x20) as usize],
            0x80 => 556,
            0x85 | 0x97 | 0x89 | 0x8C | 0x99 => 1000,
            0x96 => 556,
            0x91 | 0x92 | 0x82 => {
                if bold {
                    278
                } else {
                    222
                }
            }
            0x93 | 0x94 | 0x84 => {
                if bold {
                    500
                } else {
                    333
                }
            }
            0x95 => 350,
            0x9C => 944,
            // accented i is built on the dotless i, which is wider than `i`
            0xEC..=0xEF => 278,
            0xA0 => 278,
            0xAB | 0xBB => 556,
            0xB0 => 400,
            0xD7 => 584,
            0xC6 => 1000,
            0xE6 => 889,
            0xDF => 611,
            0xA1..=0xFF => {
                let chr = char::from(code);
                match base_letter(chr).and_then(win_ansi_char) {
                    Some(base) => self.code_width(base),
                    None => 556,
                }
            }
            _ => 556,
        }
    }

    /// The width of a string set in this font at the given size, in points
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = self
            .encode(text)
            .into_iter()
            .map(|code| u32::from(self.code_width(code)))
            .sum();
        units as f32 * size / 1000.0
    }
}

/// A `/Type /Font` dictionary for a standard font
pub(crate) struct FontDict(pub StandardFont);

impl Serialize for FontDict {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        let mut dict = f.pdf_dict();
        dict.field("Type", &PdfName("Font"))?
            .field("Subtype", &PdfName("Type1"))?
            .field("BaseFont", &PdfName(self.0.base_font()))?;
        if !self.0.is_symbolic() {
            dict.field("Encoding", &BaseEncoding::WinAnsiEncoding)?;
        }
        dict.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::StandardFont;

    #[test]
    fn widths_follow_the_afm() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.code_width(b' '), 278);
        assert_eq!(font.code_width(b'W'), 944);
        assert_eq!(font.code_width(b'i'), 222);
        assert_eq!(StandardFont::HelveticaBold.code_width(b'i'), 278);
        assert!((font.text_width("AAA", 10.0) - 20.01).abs() < 0.001);
    }

    #[test]
    fn accented_letters_use_their_base_width() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.text_width("é", 10.0), font.text_width("e", 10.0));
        assert_eq!(font.text_width("Ç", 10.0), font.text_width("C", 10.0));
    }

    #[test]
    fn check_mark_in_dingbats() {
        assert_eq!(StandardFont::ZapfDingbats.encode("\u{2713}"), vec![0x33]);
        assert_eq!(StandardFont::ZapfDingbats.text_width("\u{2713}", 10.0), 7.6);
    }
}
