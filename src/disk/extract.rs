//! Data-set extraction from tracks 1 onward.
//!
//! Each HDR1 label describes one data set as a begin-of-extent address
//! and an end-of-data address (the first record past the data).  The
//! extractor turns that pair into a byte range of the image and copies
//! it out twice: verbatim, and as newline-delimited text with each
//! record truncated to its declared data length.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::disk::error::DiskError;
use crate::disk::image::Image;
use crate::disk::track0::HeaderRecord;
use crate::disk::{SECTORS_PER_TRACK, TRACK0_SIZE};
use crate::ebcdic;

/// The byte range a data set occupies within the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    /// Absolute byte offset of the first physical record.
    pub offset: usize,
    /// Number of consecutive physical records.
    pub sectors: usize,
}

impl Extent {
    /// Translate a header's begin/end addresses into a byte range.
    ///
    /// Tracks and sectors are 1-based with 26 sectors per track; the
    /// control area on track 0 always occupies 26 x 128 bytes no matter
    /// what record length the data tracks use.  An empty or reversed
    /// range is `MalformedExtent`.
    pub fn from_header(header: &HeaderRecord, record_length: usize) -> io::Result<Extent> {
        let (bt, bs) = (header.begin.track as i64, header.begin.sector as i64);
        let (et, es) = (header.end_of_data.track as i64, header.end_of_data.sector as i64);
        if bt < 1 || bs < 1 {
            return Err(DiskError::MalformedExtent.into());
        }
        let sectors = (et - bt) * SECTORS_PER_TRACK as i64 + es - (bs - 1) - 1;
        if sectors <= 0 {
            return Err(DiskError::MalformedExtent.into());
        }
        let offset =
            TRACK0_SIZE + ((bt - 1) as usize * SECTORS_PER_TRACK + (bs - 1) as usize) * record_length;
        Ok(Extent {
            offset,
            sectors: sectors as usize,
        })
    }
}

/// The artifacts written for one data set.
#[derive(Debug)]
pub struct Extracted {
    pub name: String,
    pub sectors: usize,
    pub binary_path: PathBuf,
    pub text_path: PathBuf,
}

/// Copies data sets out of an image, using the physical record length
/// resolved from the volume label.
pub struct Extractor<'a> {
    image: &'a Image,
    record_length: usize,
}

impl<'a> Extractor<'a> {
    pub fn new(image: &'a Image, record_length: usize) -> Extractor<'a> {
        Extractor {
            image,
            record_length,
        }
    }

    /// Create the output directory (which must not already exist) and
    /// extract every data set into it, in label order.  Any failure
    /// aborts the run; no partial skip-and-continue.
    pub fn extract_all(
        &self,
        headers: &[HeaderRecord],
        directory: &Path,
    ) -> io::Result<Vec<Extracted>> {
        fs::create_dir(directory)?;
        headers
            .iter()
            .map(|header| self.extract(header, directory))
            .collect()
    }

    /// Extract a single data set into an existing directory, producing
    /// `<name>` (raw records) and `<name>.ascii` (decoded text, one line
    /// per record, truncated to the declared data length).
    pub fn extract(&self, header: &HeaderRecord, directory: &Path) -> io::Result<Extracted> {
        let extent = Extent::from_header(header, self.record_length)?;
        let name = header.file_name().to_string();
        let binary_path = directory.join(&name);
        let text_path = directory.join(format!("{}.ascii", name));

        let mut binary = BufWriter::new(fs::File::create(&binary_path)?);
        let mut text = BufWriter::new(fs::File::create(&text_path)?);

        for index in 0..extent.sectors {
            let record = self
                .image
                .slice(extent.offset + index * self.record_length, self.record_length)?;
            binary.write_all(record)?;

            let data_length = header.record_data_length.min(record.len());
            let mut line = String::with_capacity(data_length + 1);
            for &byte in &record[..data_length] {
                line.push(ebcdic::decode_byte(byte));
            }
            line.push('\n');
            text.write_all(line.as_bytes())?;
        }

        binary.flush()?;
        text.flush()?;
        Ok(Extracted {
            name,
            sectors: extent.sectors,
            binary_path,
            text_path,
        })
    }
}
