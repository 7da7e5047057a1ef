//! Track-0 control structures.
//!
//! The first track of a Diskette 1 volume is reserved for control
//! records, all of them 128-byte sectors regardless of the physical
//! record length declared for the data tracks:
//!
//! * sectors 0-1: IPL/IMPL bootstrap area
//! * sector 2: system scratch
//! * sector 3: reserved
//! * sector 4: ERMAP error map
//! * sector 6: volume label
//! * sectors 7-25: data-set label (HDR1) slots
//!
//! When the IPL/IMPL area or the reserved sector holds data, the rest of
//! the track uses an incompatible layout and decoding stops after the
//! three presence checks.  That early exit is a recognized terminal
//! state, not an error.

use std::fmt;
use std::io;

use crate::disk::error::DiskError;
use crate::disk::image::Image;
use crate::disk::record::{Field, Record};
use crate::disk::SECTOR_SIZE;
use crate::ebcdic;

/// Sector indices of the fixed control records.
const IPL_SECTORS: [usize; 2] = [0, 1];
const SCRATCH_SECTOR: usize = 2;
const RESERVED_SECTOR: usize = 3;
const ERMAP_SECTOR: usize = 4;
const VOLUME_LABEL_SECTOR: usize = 6;
const FIRST_HEADER_SLOT: usize = 7;
const LAST_HEADER_SLOT: usize = 25;

/// Whether a reserved control sector holds data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    Present,
    NotPresent,
}

impl Presence {
    fn of(present: bool) -> Presence {
        if present {
            Presence::Present
        } else {
            Presence::NotPresent
        }
    }

    pub fn is_present(self) -> bool {
        self == Presence::Present
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Presence::Present => "present",
            Presence::NotPresent => "not present",
        })
    }
}

/// An unused control sector is 80 blanks followed by 48 NULs.  This
/// exact pattern, not all-zero, is the sentinel for "no data": any
/// single differing byte means the sector is in use.
pub fn is_unused_sector(bytes: &[u8]) -> bool {
    bytes.len() == SECTOR_SIZE
        && bytes[..80].iter().all(|&b| b == ebcdic::BLANK)
        && bytes[80..].iter().all(|&b| b == 0x00)
}

/// The ERMAP record at sector 4.
#[derive(Clone, Debug)]
pub struct ErrorMap {
    pub label: Presence,
    pub first_defective_cylinder: Option<String>,
    pub second_defective_cylinder: Option<String>,
    /// Only meaningful when a second defective cylinder is recorded.
    pub more_defective_cylinders: Option<bool>,
    pub defect_indicator: Option<char>,
    pub error_directory_indicator: Option<char>,
    /// The 48-character error directory, when the indicator is set.
    pub error_directory: Option<String>,
}

const ERMAP_TAG: Field = Field::new(0, 5);
const FIRST_DEFECTIVE: Field = Field::new(6, 2);
const SECOND_DEFECTIVE: Field = Field::new(10, 2);
const MORE_DEFECTIVE: Field = Field::new(12, 1);
const DEFECT_INDICATOR: Field = Field::new(22, 1);
const ERROR_DIR_INDICATOR: Field = Field::new(23, 1);
const ERROR_DIRECTORY: Field = Field::new(24, 48);

impl ErrorMap {
    fn read(record: &Record) -> ErrorMap {
        let first = record.opt_text(FIRST_DEFECTIVE);
        // The second cylinder and the more-cylinders flag only carry
        // meaning when the preceding field is filled in.
        let second = match first {
            Some(_) => record.opt_text(SECOND_DEFECTIVE),
            None => None,
        };
        let more = match second {
            Some(_) => Some(record.opt_char(MORE_DEFECTIVE).is_some()),
            None => None,
        };
        let directory_indicator = record.opt_char(ERROR_DIR_INDICATOR);
        let directory = match directory_indicator {
            Some(_) => Some(record.text(ERROR_DIRECTORY)),
            None => None,
        };
        ErrorMap {
            label: Presence::of(record.tag_matches(ERMAP_TAG, "ERMAP")),
            first_defective_cylinder: first,
            second_defective_cylinder: second,
            more_defective_cylinders: more,
            defect_indicator: record.opt_char(DEFECT_INDICATOR),
            error_directory_indicator: directory_indicator,
            error_directory: directory,
        }
    }
}

/// The volume label at sector 6.
#[derive(Clone, Debug)]
pub struct VolumeLabel {
    pub label: String,
    pub volume_id: String,
    pub accessibility: Option<char>,
    pub owner_id: Option<String>,
    pub extent_arrangement: Option<char>,
    pub surface_indicator: Option<char>,
    pub special_requirements: Option<char>,
    /// Physical record (sector) length on tracks 1-76, in bytes.
    pub record_length: usize,
    pub sequence_code: String,
    pub label_standard: Option<char>,
}

const VOL_LABEL: Field = Field::new(0, 4);
const VOL_ID: Field = Field::new(4, 6);
const VOL_ACCESSIBILITY: Field = Field::new(10, 1);
const VOL_OWNER: Field = Field::new(37, 14);
const VOL_EXTENT_ARRANGEMENT: Field = Field::new(71, 1);
const VOL_SURFACE: Field = Field::new(72, 1);
const VOL_SPECIAL: Field = Field::new(73, 1);
const VOL_RECORD_LENGTH: Field = Field::new(75, 1);
const VOL_SEQUENCE: Field = Field::new(76, 2);
const VOL_STANDARD: Field = Field::new(79, 1);

impl VolumeLabel {
    fn read(record: &Record) -> io::Result<VolumeLabel> {
        // The four documented record lengths; anything else is a decode
        // error rather than a default.
        let record_length = match record.opt_char(VOL_RECORD_LENGTH) {
            None => 128,
            Some('1') => 256,
            Some('2') => 512,
            Some('3') => 1024,
            Some(_) => return Err(DiskError::InvalidRecordLength.into()),
        };
        Ok(VolumeLabel {
            label: record.text(VOL_LABEL).trim_end().to_string(),
            volume_id: record.text(VOL_ID).trim_end().to_string(),
            accessibility: record.opt_char(VOL_ACCESSIBILITY),
            owner_id: record.opt_text(VOL_OWNER),
            extent_arrangement: record.opt_char(VOL_EXTENT_ARRANGEMENT),
            surface_indicator: record.opt_char(VOL_SURFACE),
            special_requirements: record.opt_char(VOL_SPECIAL),
            record_length,
            sequence_code: record.text(VOL_SEQUENCE),
            label_standard: record.opt_char(VOL_STANDARD),
        })
    }

    /// A blank or "01" sequence code means the sectors are laid out
    /// sequentially.
    pub fn is_sequential(&self) -> bool {
        self.sequence_code == "  " || self.sequence_code == "01"
    }

    /// 'W' in the label-standard field means IBM standard labels are
    /// present.
    pub fn has_standard_labels(&self) -> bool {
        self.label_standard == Some('W')
    }
}

/// A track/sector address as recorded in a HDR1 extent field: two
/// decimal digits of track, two of sector, both 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Address {
    pub track: u32,
    pub sector: u32,
}

/// A HDR1 data-set label.
#[derive(Clone, Debug)]
pub struct HeaderRecord {
    /// The 17-character data-set name field, right-padded with blanks.
    pub name: String,
    /// Characters of data per physical record.
    pub record_data_length: usize,
    /// First record of the extent.
    pub begin: Address,
    /// End-of-data pointer: the first record past the data.
    pub end_of_data: Address,
}

const HDR_TAG: Field = Field::new(0, 5);
const HDR_NAME: Field = Field::new(5, 17);
const HDR_DATA_LENGTH: Field = Field::new(22, 5);
const HDR_BEGIN_TRACK: Field = Field::new(28, 2);
const HDR_BEGIN_SECTOR: Field = Field::new(31, 2);
const HDR_END_TRACK: Field = Field::new(74, 2);
const HDR_END_SECTOR: Field = Field::new(77, 2);

/// Width of the listing line; the remainder of a label sector is unused.
const HEADER_LINE_WIDTH: usize = 80;

impl HeaderRecord {
    /// Parse a label slot.  Returns `None` for slots whose tag is not
    /// exactly "HDR1 ".
    fn read(record: &Record) -> io::Result<Option<HeaderRecord>> {
        if !record.tag_matches(HDR_TAG, "HDR1 ") {
            return Ok(None);
        }
        Ok(Some(HeaderRecord {
            name: record.text(HDR_NAME),
            record_data_length: record.number(HDR_DATA_LENGTH)? as usize,
            begin: Address {
                track: record.number(HDR_BEGIN_TRACK)?,
                sector: record.number(HDR_BEGIN_SECTOR)?,
            },
            end_of_data: Address {
                track: record.number(HDR_END_TRACK)?,
                sector: record.number(HDR_END_SECTOR)?,
            },
        }))
    }

    /// The data-set name with trailing blanks stripped, as used for
    /// output file naming.
    pub fn file_name(&self) -> &str {
        self.name.trim_end()
    }
}

/// The label area of a standard-layout track 0: error map, volume
/// label, and the data-set labels in slot order.
#[derive(Clone, Debug)]
pub struct Labels {
    pub error_map: ErrorMap,
    pub volume: VolumeLabel,
    pub headers: Vec<HeaderRecord>,
    /// The 80-column listing line of every label slot (7 through 25) in
    /// scan order, blank and non-HDR1 slots included.
    pub slot_lines: Vec<String>,
}

/// Decoded snapshot of track 0.
#[derive(Clone, Debug)]
pub struct Track0 {
    pub ipl: Presence,
    pub scratch: Presence,
    pub reserved: Presence,
    /// `None` when the IPL/IMPL or reserved sectors hold data and the
    /// rest of the track uses an incompatible layout.
    pub labels: Option<Labels>,
}

impl Track0 {
    /// Decode track 0 from the start of the image.  Requires the image
    /// to hold at least the control sectors being read; a short image is
    /// an I/O error.
    pub fn read(image: &Image) -> io::Result<Track0> {
        let sector = |index: usize| image.slice(index * SECTOR_SIZE, SECTOR_SIZE);

        let ipl = Presence::of(
            !(is_unused_sector(sector(IPL_SECTORS[0])?)
                && is_unused_sector(sector(IPL_SECTORS[1])?)),
        );
        let scratch = Presence::of(!is_unused_sector(sector(SCRATCH_SECTOR)?));
        let reserved = Presence::of(!is_unused_sector(sector(RESERVED_SECTOR)?));

        // Scratch data alone does not change the layout; IPL/IMPL or
        // reserved-sector data does.
        if ipl.is_present() || reserved.is_present() {
            return Ok(Track0 {
                ipl,
                scratch,
                reserved,
                labels: None,
            });
        }

        let error_map = ErrorMap::read(&Record::from_sector(sector(ERMAP_SECTOR)?));
        let volume = VolumeLabel::read(&Record::from_sector(sector(VOLUME_LABEL_SECTOR)?))?;

        let mut headers = Vec::new();
        let mut slot_lines = Vec::new();
        for slot in FIRST_HEADER_SLOT..=LAST_HEADER_SLOT {
            let record = Record::from_sector(sector(slot)?);
            slot_lines.push(record.line(HEADER_LINE_WIDTH));
            if let Some(header) = HeaderRecord::read(&record)? {
                headers.push(header);
            }
        }

        Ok(Track0 {
            ipl,
            scratch,
            reserved,
            labels: Some(Labels {
                error_map,
                volume,
                headers,
                slot_lines,
            }),
        })
    }
}
