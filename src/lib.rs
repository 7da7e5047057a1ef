//! This is a Rust library for reading floppy images in the IBM
//! "Diskette 1" format used by 3740-era data entry systems.  The format
//! stores EBCDIC text in fixed-width records, with all of track 0
//! reserved for control structures and data sets occupying extents of
//! tracks 1 through 76.
//!
//! Features:
//!
//! * Decode the track-0 control records: IPL/IMPL, system scratch, and
//!   reserved-sector presence checks, the ERMAP error map, and the
//!   volume label (including the physical record length declared for
//!   the data tracks).
//! * List the HDR1 data-set labels in volume order.
//! * Extract each data set as a raw binary file plus a plain-text
//!   transliteration of its EBCDIC (code page 500) content.
//! * Recognize the incompatible track-0 variants (IPL/IMPL or
//!   reserved-sector data present) and stop cleanly after the presence
//!   checks.
//! * Convert between EBCDIC code page 500 and Unicode.
//! * A sample `idisk` program for inspecting and extracting images from
//!   the command line.
//!
//! # Example
//!
//! The following opens a disk image, prints its volume identifier, and
//! extracts every data set into a fresh directory:
//!
//! ```no_run
//! use std::io;
//! use std::path::Path;
//! use diskette::disk::Volume;
//!
//! # fn extract(image_filename: &str) -> io::Result<()> {
//! let volume = Volume::open(image_filename)?;
//!
//! if let Some(labels) = volume.labels() {
//!     println!("volume id: {}", labels.volume.volume_id);
//!     for extracted in volume.extract_to(Path::new("out"))? {
//!         println!("{}: {} sectors", extracted.name, extracted.sectors);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Design of disk image access
//!
//! Support for disk images was built using a layered scheme:
//!
//! 1. `Image` provides read-only access to the underlying storage
//!    containing the disk image -- either a memory-mapped file or an
//!    in-memory array.
//! 2. `Record` and `Field` decode one 128-byte control sector to
//!    characters and slice it by the fixed positions of the Diskette 1
//!    label layouts.
//! 3. `Track0` interprets the control sectors in order: presence
//!    checks, error map, volume label, data-set labels.
//! 4. `Extractor` translates each label's begin/end addresses into a
//!    byte range of the image and writes the data set out.
//!
//! All access is single-pass and read-only; writing or formatting
//! images is out of scope.

pub mod disk;

mod ebcdic;

pub use crate::ebcdic::Ebcdic;
