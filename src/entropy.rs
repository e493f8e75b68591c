use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::debug;

use crate::Error;

/// A secure source of random bytes.
pub trait EntropySource {
    /// Fill all of `buf`, or fail.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), Error>;
}

/// The platform CSPRNG (getrandom(2), BCryptGenRandom, SecRandomCopyBytes, ...).
#[derive(Debug)]
pub struct OsEntropy;

impl OsEntropy {
    const NAME: &'static str = "os rng";

    /// Probes the os rng once so a missing facility is reported before
    /// any password is started.
    pub fn new() -> Result<Self, Error> {
        let mut probe = [0u8; 1];
        getrandom::getrandom(&mut probe).map_err(|e| Error::Unavailable {
            source_name: Self::NAME.to_string(),
            source: io::Error::from(e),
        })?;
        debug!("using {}", Self::NAME);
        Ok(OsEntropy)
    }
}

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        getrandom::getrandom(buf).map_err(|e| Error::Read {
            source_name: Self::NAME.to_string(),
            source: io::Error::from(e),
        })
    }
}

/// Raw bytes from a random device such as /dev/urandom.
#[derive(Debug)]
pub struct DeviceEntropy {
    path: PathBuf,
    file: File,
}

impl DeviceEntropy {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let unavailable = |e| Error::Unavailable {
            source_name: path.display().to_string(),
            source: e,
        };
        let file = File::open(path).map_err(unavailable)?;
        // a directory opens fine on unix but can never be read
        if file.metadata().map_err(unavailable)?.is_dir() {
            return Err(unavailable(io::Error::new(io::ErrorKind::Other, "is a directory")));
        }
        debug!("using device {:?}", path);
        Ok(DeviceEntropy {
            path: path.to_path_buf(),
            file,
        })
    }
}

impl EntropySource for DeviceEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        // eof here means a regular file ran dry, not a device
        self.file.read_exact(buf).map_err(|e| Error::Read {
            source_name: self.path.display().to_string(),
            source: e,
        })
    }
}
