//! Traits, structs, and functions relating to Diskette 1 images.

mod error;
mod extract;
mod image;
mod record;
mod track0;

use std::io;
use std::path::Path;

pub use self::error::DiskError;
pub use self::extract::{Extent, Extracted, Extractor};
pub use self::image::Image;
pub use self::record::{Field, Record};
pub use self::track0::{
    is_unused_sector, Address, ErrorMap, HeaderRecord, Labels, Presence, Track0, VolumeLabel,
};

/// Control sectors on track 0 are always 128 bytes, regardless of the
/// physical record length declared for the data tracks.
pub const SECTOR_SIZE: usize = 128;
/// Every track holds 26 sectors.
pub const SECTORS_PER_TRACK: usize = 26;
/// 77 tracks: track 0 for control structures, tracks 1-76 for data.
pub const TRACK_COUNT: usize = 77;
/// Byte size of the control-area reservation (all of track 0).
pub const TRACK0_SIZE: usize = SECTORS_PER_TRACK * SECTOR_SIZE;

/// An open Diskette 1 volume: the image plus its decoded track 0.
///
/// Decoding track 0 is a prerequisite of everything else (it resolves
/// the physical record length and detects incompatible layouts), so it
/// happens at open time.
pub struct Volume {
    image: Image,
    track0: Track0,
}

impl Volume {
    /// Open a disk image file read-only and decode its track 0.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Volume> {
        Volume::with_image(Image::open_read_only(path)?)
    }

    /// Wrap an in-memory image and decode its track 0.
    pub fn from_bytes(bytes: Vec<u8>) -> io::Result<Volume> {
        Volume::with_image(Image::open_memory(bytes))
    }

    fn with_image(image: Image) -> io::Result<Volume> {
        let track0 = Track0::read(&image)?;
        Ok(Volume { image, track0 })
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn track0(&self) -> &Track0 {
        &self.track0
    }

    /// The label area, when the volume has the standard layout.
    pub fn labels(&self) -> Option<&Labels> {
        self.track0.labels.as_ref()
    }

    /// Extract every data set into `directory`, which is created and
    /// must not already exist.  A volume with an incompatible track-0
    /// layout has no data-set labels and yields no artifacts.
    pub fn extract_to(&self, directory: &Path) -> io::Result<Vec<Extracted>> {
        match self.labels() {
            Some(labels) => Extractor::new(&self.image, labels.volume.record_length)
                .extract_all(&labels.headers, directory),
            None => Ok(Vec::new()),
        }
    }
}
