//! Fixed-width record schema.
//!
//! Every track-0 structure is a 128-byte sector interpreted as a row of
//! fixed character positions.  All field access goes through `Field`
//! descriptors applied to a decoded `Record`, so the many near-identical
//! positional checks share one implementation instead of repeating index
//! arithmetic.

use std::io;

use crate::disk::error::DiskError;
use crate::ebcdic;

/// A fixed character range within a control record.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    pub offset: usize,
    pub width: usize,
}

impl Field {
    pub const fn new(offset: usize, width: usize) -> Field {
        Field { offset, width }
    }
}

/// One control sector, decoded from EBCDIC to characters.
pub struct Record {
    chars: Vec<char>,
}

impl Record {
    pub fn from_sector(bytes: &[u8]) -> Record {
        Record {
            chars: bytes.iter().map(|&b| ebcdic::decode_byte(b)).collect(),
        }
    }

    /// The raw text of a field, exactly `field.width` characters.
    pub fn text(&self, field: Field) -> String {
        self.chars[field.offset..field.offset + field.width]
            .iter()
            .collect()
    }

    /// A field is blank only if every one of its positions is a space.
    /// Width matters: a two-character field holding " X" is not blank.
    pub fn is_blank(&self, field: Field) -> bool {
        self.chars[field.offset..field.offset + field.width]
            .iter()
            .all(|&c| c == ' ')
    }

    /// `None` for an exactly-blank field, otherwise the field text with
    /// trailing blanks removed.
    pub fn opt_text(&self, field: Field) -> Option<String> {
        if self.is_blank(field) {
            None
        } else {
            Some(self.text(field).trim_end().to_string())
        }
    }

    /// Single-character indicator fields: `None` when blank.
    pub fn opt_char(&self, field: Field) -> Option<char> {
        debug_assert_eq!(field.width, 1);
        match self.chars[field.offset] {
            ' ' => None,
            c => Some(c),
        }
    }

    /// Parse a numeric field (leading blanks and zeros tolerated).
    pub fn number(&self, field: Field) -> io::Result<u32> {
        self.text(field)
            .trim()
            .parse::<u32>()
            .map_err(|_| DiskError::InvalidHeaderField.into())
    }

    /// True if the field's text equals the given literal, including any
    /// trailing blanks the literal carries.
    pub fn tag_matches(&self, field: Field, literal: &str) -> bool {
        self.text(field) == literal
    }

    /// The first `width` characters of the record as one line, as shown
    /// in data-set label listings.
    pub fn line(&self, width: usize) -> String {
        self.chars[..width.min(self.chars.len())].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebcdic::Ebcdic;

    const TAG: Field = Field::new(0, 5);
    const TWO: Field = Field::new(5, 2);
    const NUM: Field = Field::new(10, 5);

    fn record(text: &str) -> Record {
        let mut bytes = Ebcdic::from_str_lossy(text).as_bytes().to_vec();
        bytes.resize(128, ebcdic::BLANK);
        Record::from_sector(&bytes)
    }

    #[test]
    fn field_text_and_tags() {
        let r = record("HDR1 X 7");
        assert!(r.tag_matches(TAG, "HDR1 "));
        assert!(!r.tag_matches(TAG, "HDR11"));
        assert_eq!(r.text(TWO), "X ");
    }

    #[test]
    fn blank_is_exact_width() {
        let r = record("HDR1  X");
        // " X" at offset 5..7 is not blank even though it trims to "X".
        assert!(!r.is_blank(Field::new(5, 2)));
        assert!(r.is_blank(Field::new(7, 2)));
        assert_eq!(r.opt_text(Field::new(5, 2)), Some(" X".to_string()));
        assert_eq!(r.opt_text(Field::new(8, 3)), None);
    }

    #[test]
    fn numeric_fields() {
        let r = record("HDR1      00080");
        assert_eq!(r.number(NUM).unwrap(), 80);
        let bad = record("HDR1      0008X");
        assert_eq!(
            bad.number(NUM).unwrap_err(),
            crate::disk::DiskError::InvalidHeaderField
        );
    }

    #[test]
    fn line_truncates() {
        let r = record("ERMAP");
        assert_eq!(r.line(5), "ERMAP");
        assert_eq!(r.line(80).len(), 80);
    }
}
