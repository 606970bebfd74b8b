// ==============================================================================
// validator.rs - Input Table Validation
// ==============================================================================
// Description: Validates the pedigree/variant table before any row is parsed
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// Security: Size cap, SHA-256 provenance hash
// ==============================================================================

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::parsers::pedigree_table::ID_COLUMN;
use crate::parsers::PedigreeTableReader;

pub const DEFAULT_MAX_INPUT_SIZE: u64 = 100 * 1024 * 1024; // 100 MB

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input path '{}' is not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("Input file is empty")]
    EmptyInput,

    #[error("Required column '{0}' missing from header")]
    MissingColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct ValidatedInput {
    pub path: PathBuf,
    pub delimiter: u8,
    pub size: u64,
    pub hash_sha256: String,
}

pub struct InputValidator {
    max_file_size: u64,
}

impl InputValidator {
    pub fn new() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }

    pub fn with_max_file_size(mut self, max: u64) -> Self {
        self.max_file_size = max;
        self
    }

    pub fn validate(&self, path: &Path) -> Result<ValidatedInput, ValidationError> {
        info!("Validating input table: {:?}", path);

        // 1. Existence
        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ValidationError::InputNotFound(path.to_path_buf()),
            _ => ValidationError::Io(e),
        })?;

        if !metadata.is_file() {
            return Err(ValidationError::NotAFile(path.to_path_buf()));
        }

        // 2. Size check
        let size = metadata.len();
        if size > self.max_file_size {
            return Err(ValidationError::TooLarge {
                size,
                max: self.max_file_size,
            });
        }
        if size == 0 {
            return Err(ValidationError::EmptyInput);
        }
        debug!("Size check passed: {} bytes", size);

        // 3. Header check (.tsv/.txt are tab-delimited, anything else is CSV)
        let delimiter = PedigreeTableReader::for_path(path).delimiter();
        self.validate_header(path, delimiter)?;
        debug!("Header check passed");

        // 4. Compute SHA-256 hash
        let hash = self.compute_sha256(path)?;
        info!("Input SHA-256: {}", hash);

        Ok(ValidatedInput {
            path: path.to_path_buf(),
            delimiter,
            size,
            hash_sha256: hash,
        })
    }

    fn validate_header(&self, path: &Path, delimiter: u8) -> Result<(), ValidationError> {
        let reader = BufReader::new(File::open(path)?);
        let first_line = reader
            .lines()
            .next()
            .ok_or(ValidationError::EmptyInput)??;

        let has_id = first_line
            .trim_start_matches('\u{feff}')
            .split(delimiter as char)
            .any(|column| column.trim().trim_matches('"') == ID_COLUMN);

        if !has_id {
            return Err(ValidationError::MissingColumn(ID_COLUMN.to_string()));
        }

        Ok(())
    }

    fn compute_sha256(&self, path: &Path) -> Result<String, ValidationError> {
        let mut file = File::open(path)?;
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; 8192];

        loop {
            let n = file.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }

        Ok(format!("{:x}", hasher.finalize()))
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn table(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_validate_csv() {
        let file = table("ID,SEX\nFAM1_PROBAND,male\n", ".csv");

        let validated = InputValidator::new().validate(file.path()).unwrap();
        assert_eq!(validated.delimiter, b',');
        assert_eq!(validated.size, 25);
        assert_eq!(validated.hash_sha256.len(), 64);
    }

    #[test]
    fn test_validate_quoted_tsv_header() {
        let file = table("\"ID\"\t\"SEX\"\nFAM1_PROBAND\tmale\n", ".tsv");

        let validated = InputValidator::new().validate(file.path()).unwrap();
        assert_eq!(validated.delimiter, b'\t');
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");

        match InputValidator::new().validate(&missing) {
            Err(ValidationError::InputNotFound(path)) => assert_eq!(path, missing),
            other => panic!("Expected InputNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            InputValidator::new().validate(dir.path()),
            Err(ValidationError::NotAFile(_))
        ));
    }

    #[test]
    fn test_any_extension_is_read_as_csv() {
        for suffix in ["", ".dat", ".xlsx"] {
            let file = table("ID,SEX\nFAM1_PROBAND,male\n", suffix);
            let validated = InputValidator::new().validate(file.path()).unwrap();
            assert_eq!(validated.delimiter, b',', "suffix '{}'", suffix);
        }
    }

    #[test]
    fn test_size_limit() {
        let file = table("ID,SEX\nFAM1_PROBAND,male\n", ".csv");
        assert!(matches!(
            InputValidator::new().with_max_file_size(4).validate(file.path()),
            Err(ValidationError::TooLarge { size: 25, max: 4 })
        ));
    }

    #[test]
    fn test_missing_id_column() {
        let file = table("SAMPLE,SEX\nFAM1_PROBAND,male\n", ".csv");
        assert!(matches!(
            InputValidator::new().validate(file.path()),
            Err(ValidationError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        let file = table("", ".csv");
        assert!(matches!(
            InputValidator::new().validate(file.path()),
            Err(ValidationError::EmptyInput)
        ));
    }
}
