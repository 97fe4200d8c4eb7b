//! High-level API for reading LAS files.

use crate::error::{Error, Result};
use crate::las::LasTextReader;
use crate::models::{LasFile, MnemonicCase};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// A reader for LAS 2.0 files.
///
/// # Examples
///
/// ```no_run
/// use las_drillhole::LasReader;
///
/// let las = LasReader::from_file("dh1.las")?.read()?;
/// println!("{} curves", las.curves.len());
/// # Ok::<(), las_drillhole::Error>(())
/// ```
pub struct LasReader {
    text: String,
    mnemonic_case: MnemonicCase,
}

impl LasReader {
    /// Create a reader from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not UTF-8 text or does
    /// not look like a LAS file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mmap = unsafe { Mmap::map(&file)? };
        let text = String::from_utf8_lossy(&mmap).into_owned();
        Self::from_string(text)
    }

    /// Create a reader from LAS text already in memory.
    pub fn from_string(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if !LasTextReader::new(&text).is_valid() {
            return Err(Error::Parse("Not a valid LAS file".to_string()));
        }

        Ok(Self {
            text,
            mnemonic_case: MnemonicCase::Preserve,
        })
    }

    /// Parse the whole file.
    pub fn read(self) -> Result<LasFile> {
        LasTextReader::new(&self.text)
            .parse(self.mnemonic_case)
            .map_err(|e| Error::Parse(e.to_string()))
    }
}

/// Builder for configuring LAS parsing options.
///
/// ```no_run
/// use las_drillhole::{LasReaderBuilder, MnemonicCase};
///
/// let las = LasReaderBuilder::new()
///     .mnemonic_case(MnemonicCase::Upper)
///     .from_file("dh1.las")?
///     .read()?;
/// # Ok::<(), las_drillhole::Error>(())
/// ```
pub struct LasReaderBuilder {
    mnemonic_case: MnemonicCase,
}

impl LasReaderBuilder {
    pub fn new() -> Self {
        Self {
            mnemonic_case: MnemonicCase::Preserve,
        }
    }

    /// Case applied to every mnemonic. Default preserves the file's case.
    pub fn mnemonic_case(mut self, case: MnemonicCase) -> Self {
        self.mnemonic_case = case;
        self
    }

    pub fn from_file<P: AsRef<Path>>(self, path: P) -> Result<LasReader> {
        let mut reader = LasReader::from_file(path)?;
        reader.mnemonic_case = self.mnemonic_case;
        Ok(reader)
    }

    pub fn from_string(self, text: impl Into<String>) -> Result<LasReader> {
        let mut reader = LasReader::from_string(text)?;
        reader.mnemonic_case = self.mnemonic_case;
        Ok(reader)
    }
}

impl Default for LasReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for `LasReader::from_file(path)?.read()`.
pub fn read_las<P: AsRef<Path>>(path: P) -> Result<LasFile> {
    LasReader::from_file(path)?.read()
}
