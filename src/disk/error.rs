use std::error;
use std::fmt;
use std::io;

/// Errors that can be returned from disk image operations.  These are
/// generally converted into `io::Error`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiskError {
    /// Unknown error
    Unknown,
    /// Offset out of bounds (image too short for the requested range)
    InvalidOffset,
    /// Unrecognized physical-record-length code in the volume label
    InvalidRecordLength,
    /// A numeric field in a HDR1 record could not be parsed
    InvalidHeaderField,
    /// A data set's begin/end addresses yield an empty or reversed extent
    MalformedExtent,
}

impl error::Error for DiskError {}

impl fmt::Display for DiskError {
    /// Provide human-readable descriptions of the errors
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", &self.message())
    }
}

impl From<DiskError> for io::Error {
    fn from(error: DiskError) -> io::Error {
        use self::DiskError::*;
        use std::io::ErrorKind::*;
        match error {
            Unknown => io::Error::new(Other, error),
            InvalidOffset => io::Error::new(UnexpectedEof, error),
            InvalidRecordLength => io::Error::new(InvalidData, error),
            InvalidHeaderField => io::Error::new(InvalidData, error),
            MalformedExtent => io::Error::new(InvalidData, error),
        }
    }
}

impl From<io::Error> for DiskError {
    fn from(error: io::Error) -> DiskError {
        match error.into_inner() {
            Some(e) => match e.downcast_ref::<DiskError>() {
                Some(disk_error) => disk_error.clone(),
                None => DiskError::Unknown,
            },
            None => DiskError::Unknown,
        }
    }
}

impl DiskError {
    /// If the provided `io::Error` contains a `DiskError`, return the
    /// underlying `DiskError`.  If not, return None.
    pub fn from_io_error(error: &io::Error) -> Option<DiskError> {
        match error.get_ref() {
            Some(e) => e.downcast_ref::<DiskError>().cloned(),
            None => None,
        }
    }

    /// Provide terse descriptions of the errors.
    fn message(&self) -> &str {
        use self::DiskError::*;
        match *self {
            Unknown => "unknown error",
            InvalidOffset => "offset out of bounds",
            InvalidRecordLength => "unrecognized physical record length code",
            InvalidHeaderField => "malformed header record field",
            MalformedExtent => "data set extent is empty or reversed",
        }
    }
}

impl PartialEq<io::Error> for DiskError {
    fn eq(&self, other: &io::Error) -> bool {
        match DiskError::from_io_error(other) {
            Some(ref e) if e == self => true,
            _ => false,
        }
    }
}

impl PartialEq<DiskError> for io::Error {
    fn eq(&self, other: &DiskError) -> bool {
        match DiskError::from_io_error(self) {
            Some(ref e) if e == other => true,
            _ => false,
        }
    }
}
