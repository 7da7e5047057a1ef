use std::fs::File;
use std::io;
use std::path::Path;

use memmap::{Mmap, MmapOptions};

use crate::disk::error::DiskError;

/// Provide backing storage (file or memory) for disk images.  Diskette 1
/// images are only ever read, so there is no writable variant.
pub enum Image {
    ReadOnlyMap(Mmap),
    Memory(Box<[u8]>),
}

impl Image {
    pub fn open_memory(bytes: Vec<u8>) -> Image {
        Image::Memory(bytes.into_boxed_slice())
    }

    pub fn open_read_only<P: AsRef<Path>>(path: P) -> io::Result<Image> {
        let file = File::open(path)?;
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(Image::ReadOnlyMap(mmap))
    }

    pub fn len(&self) -> usize {
        match self {
            Image::ReadOnlyMap(mmap) => mmap.len(),
            Image::Memory(array) => array.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_bounds(&self, offset: usize) -> io::Result<()> {
        if offset > self.len() {
            Err(DiskError::InvalidOffset.into())
        } else {
            Ok(())
        }
    }

    pub fn slice(&self, offset: usize, length: usize) -> io::Result<&[u8]> {
        self.check_bounds(offset + length)?;
        Ok(match self {
            Image::ReadOnlyMap(mmap) => &mmap[offset..offset + length],
            Image::Memory(array) => &array[offset..offset + length],
        })
    }
}
