use std::collections::TryReserveError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can stop a font from being split out of a collection.
///
/// The `Display` text is what the command line prints after `Error: `.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Not a TTC file")]
    NotTtc,

    #[error("Invalid arguments")]
    InvalidArguments,

    #[error("Unable to read file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to write file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid file format{}", path.as_ref().map(|p| format!(": {}", p.display())).unwrap_or_default())]
    InvalidFormat {
        path: Option<PathBuf>,
        #[source]
        source: otspec::Error,
    },

    #[error("Out of memory")]
    OutOfMemory(#[from] TryReserveError),

    #[error("The specified font index was out of range")]
    BadFontIndex { index: i64, count: Option<u32> },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<otspec::Error> for Error {
    fn from(source: otspec::Error) -> Self {
        Error::InvalidFormat { path: None, source }
    }
}

impl Error {
    /// Attach the input file to a format error raised while parsing its bytes.
    pub fn in_file(self, file: &Path) -> Self {
        match self {
            Error::InvalidFormat { path: None, source } => Error::InvalidFormat {
                path: Some(file.to_path_buf()),
                source,
            },
            other => other,
        }
    }

    /// The process exit status for this error. Zero is reserved for success.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::NotTtc => 1,
            Error::InvalidArguments => 2,
            Error::Read { .. } => 3,
            Error::Write { .. } => 4,
            Error::InvalidFormat { .. } => 5,
            Error::OutOfMemory(_) => 6,
            Error::BadFontIndex { .. } => 7,
        }
    }
}
