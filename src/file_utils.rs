use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::caption_processor::SNIFF_PREFIX_LEN;
use crate::errors::AppError;

// @module: File reading utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    /// Read at most `limit` leading bytes; shorter files yield fewer bytes.
    ///
    /// `limit` comes from configuration and may be arbitrarily large, so only the
    /// default prefix size is reserved up front.
    pub fn read_header<P: AsRef<Path>>(path: P, limit: usize) -> Result<Vec<u8>, AppError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AppError::file(path, e))?;

        let mut header = Vec::with_capacity(limit.min(SNIFF_PREFIX_LEN));
        file.take(limit as u64)
            .read_to_end(&mut header)
            .map_err(|e| AppError::file(path, e))?;
        Ok(header)
    }

    /// Read a whole file as raw bytes
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, AppError> {
        let path = path.as_ref();
        fs::read(path).map_err(|e| AppError::file(path, e))
    }

    /// Read a file to a string, replacing invalid UTF-8 sequences
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, AppError> {
        let bytes = Self::read_bytes(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
