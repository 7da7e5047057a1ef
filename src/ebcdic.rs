//! Conversion between EBCDIC code page 500 and Unicode.
//!
//! Everything on a Diskette 1 volume that is text -- control records,
//! labels, and the character content of data sets -- is stored in a
//! single-byte EBCDIC encoding.  The table below is the complete CP500
//! mapping: every one of the 256 byte values translates to exactly one
//! character, so decoding is total and never fails.

use std::fmt;

/// The EBCDIC blank (space) byte.  Fixed-width fields are padded with it,
/// and unused control sectors are filled with it.
pub const BLANK: u8 = 0x40;

#[rustfmt::skip]
static EBCDIC_TO_CHAR: [char; 256] = [
    '\u{00}', '\u{01}', '\u{02}', '\u{03}', '\u{9c}', '\u{09}', '\u{86}', '\u{7f}',
    '\u{97}', '\u{8d}', '\u{8e}', '\u{0b}', '\u{0c}', '\u{0d}', '\u{0e}', '\u{0f}',
    '\u{10}', '\u{11}', '\u{12}', '\u{13}', '\u{9d}', '\u{85}', '\u{08}', '\u{87}',
    '\u{18}', '\u{19}', '\u{92}', '\u{8f}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{1f}',
    '\u{80}', '\u{81}', '\u{82}', '\u{83}', '\u{84}', '\u{0a}', '\u{17}', '\u{1b}',
    '\u{88}', '\u{89}', '\u{8a}', '\u{8b}', '\u{8c}', '\u{05}', '\u{06}', '\u{07}',
    '\u{90}', '\u{91}', '\u{16}', '\u{93}', '\u{94}', '\u{95}', '\u{96}', '\u{04}',
    '\u{98}', '\u{99}', '\u{9a}', '\u{9b}', '\u{14}', '\u{15}', '\u{9e}', '\u{1a}',
    ' ', '\u{a0}', '\u{e2}', '\u{e4}', '\u{e0}', '\u{e1}', '\u{e3}', '\u{e5}',
    '\u{e7}', '\u{f1}', '[', '.', '<', '(', '+', '!',
    '&', '\u{e9}', '\u{ea}', '\u{eb}', '\u{e8}', '\u{ed}', '\u{ee}', '\u{ef}',
    '\u{ec}', '\u{df}', ']', '$', '*', ')', ';', '^',
    '-', '/', '\u{c2}', '\u{c4}', '\u{c0}', '\u{c1}', '\u{c3}', '\u{c5}',
    '\u{c7}', '\u{d1}', '\u{a6}', ',', '%', '_', '>', '?',
    '\u{f8}', '\u{c9}', '\u{ca}', '\u{cb}', '\u{c8}', '\u{cd}', '\u{ce}', '\u{cf}',
    '\u{cc}', '`', ':', '#', '@', '\'', '=', '"',
    '\u{d8}', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
    'h', 'i', '\u{ab}', '\u{bb}', '\u{f0}', '\u{fd}', '\u{fe}', '\u{b1}',
    '\u{b0}', 'j', 'k', 'l', 'm', 'n', 'o', 'p',
    'q', 'r', '\u{aa}', '\u{ba}', '\u{e6}', '\u{b8}', '\u{c6}', '\u{a4}',
    '\u{b5}', '~', 's', 't', 'u', 'v', 'w', 'x',
    'y', 'z', '\u{a1}', '\u{bf}', '\u{d0}', '\u{dd}', '\u{de}', '\u{ae}',
    '\u{a2}', '\u{a3}', '\u{a5}', '\u{b7}', '\u{a9}', '\u{a7}', '\u{b6}', '\u{bc}',
    '\u{bd}', '\u{be}', '\u{ac}', '|', '\u{af}', '\u{a8}', '\u{b4}', '\u{d7}',
    '{', 'A', 'B', 'C', 'D', 'E', 'F', 'G',
    'H', 'I', '\u{ad}', '\u{f4}', '\u{f6}', '\u{f2}', '\u{f3}', '\u{f5}',
    '}', 'J', 'K', 'L', 'M', 'N', 'O', 'P',
    'Q', 'R', '\u{b9}', '\u{fb}', '\u{fc}', '\u{f9}', '\u{fa}', '\u{ff}',
    '\\', '\u{f7}', 'S', 'T', 'U', 'V', 'W', 'X',
    'Y', 'Z', '\u{b2}', '\u{d4}', '\u{d6}', '\u{d2}', '\u{d3}', '\u{d5}',
    '0', '1', '2', '3', '4', '5', '6', '7',
    '8', '9', '\u{b3}', '\u{db}', '\u{dc}', '\u{d9}', '\u{da}', '\u{9f}',
];

/// Translate a single EBCDIC byte to its Unicode character.
#[inline]
pub fn decode_byte(byte: u8) -> char {
    EBCDIC_TO_CHAR[byte as usize]
}

/// Translate a Unicode character back to its EBCDIC byte, if the
/// character exists in code page 500.
pub fn encode_char(c: char) -> Option<u8> {
    EBCDIC_TO_CHAR
        .iter()
        .position(|&e| e == c)
        .map(|i| i as u8)
}

/// A string of bytes in EBCDIC code page 500.
///
/// `Ebcdic` keeps the raw bytes so that fixed-width fields can be
/// compared and re-emitted verbatim; `Display` and the `String`
/// conversions perform the translation.
#[derive(Clone, PartialEq, Eq)]
pub struct Ebcdic(Vec<u8>);

impl Ebcdic {
    pub fn from_bytes(bytes: &[u8]) -> Ebcdic {
        Ebcdic(bytes.to_vec())
    }

    /// Encode a Unicode string, substituting the blank byte for any
    /// character outside code page 500.
    pub fn from_str_lossy(s: &str) -> Ebcdic {
        Ebcdic(s.chars().map(|c| encode_char(c).unwrap_or(BLANK)).collect())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode to characters.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| decode_byte(b))
    }
}

impl fmt::Display for Ebcdic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in self.chars() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Ebcdic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

impl From<Ebcdic> for String {
    fn from(e: Ebcdic) -> String {
        e.to_string()
    }
}

impl<'a> From<&'a str> for Ebcdic {
    fn from(s: &str) -> Ebcdic {
        Ebcdic::from_str_lossy(s)
    }
}
