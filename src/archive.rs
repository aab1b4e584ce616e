use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    encoder::Compressed,
    error::{HuffmanError, Result},
    utils,
};

pub const ARCHIVE_VERSION: u32 = 1;

/// Self-contained container holding the code table, the bit length and the payload, stored as
/// `<basename>.hz` with bincode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    pub version: u32,
    pub compressed: Compressed,
}

impl From<Compressed> for Archive {
    fn from(compressed: Compressed) -> Self {
        Self { version: ARCHIVE_VERSION, compressed }
    }
}

impl Archive {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decodes an archive and checks its version.
    ///
    /// The code table and the payload are validated while decoding, so a table that is not
    /// prefix-free or a bit length that does not match the payload fails with
    /// [`HuffmanError::Archive`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let archive: Archive = bincode::deserialize(bytes)?;

        if archive.version != ARCHIVE_VERSION {
            return Err(HuffmanError::Archive(format!("unsupported version {}", archive.version)));
        }

        Ok(archive)
    }

    /// Writes `<basename>.hz`.
    pub fn store(&self, basename: &str) -> Result<()> {
        utils::write_atomic(Path::new(&format!("{}.hz", basename)), &self.to_bytes()?)
    }

    /// Reads `<basename>.hz`.
    pub fn load(basename: &str) -> Result<Self> {
        Self::from_bytes(&fs::read(format!("{}.hz", basename))?)
    }

    pub fn into_text(self) -> Result<String> {
        self.compressed.decompress()
    }
}
