// ==============================================================================
// parsers/pedigree_table.rs - Pedigree/Variant Table Reader
// ==============================================================================
// Description: Header-keyed CSV/TSV reader for one-row-per-family-member tables
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Format: CSV (or TSV) with header, one row per family member
// Example:
//   ID,SEX,AFFECTED STATUS,HPO PRESENT,AGE OF ONSET (yrs),Gene,Transcript,Zygosity,Chrom-1,Pos-1,...
//   FAM1_PROBAND,male,affected,HP:0001250 (Seizure),3,ABC,NM_1,Heterozygous,1,100,...
//   FAM1_FATHER,male,unaffected,,,ABC,NM_1,Heterozygous,1,100,...
//
// Only the ID column is required. Every other column may be absent or blank.
// ==============================================================================

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const ID_COLUMN: &str = "ID";

/// One raw table row, keyed by header name
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PedigreeRow {
    /// 1-based data row number (header excluded)
    #[serde(skip)]
    pub row_number: usize,

    #[serde(rename = "ID", default)]
    pub id: Option<String>,
    #[serde(rename = "SEX", default)]
    pub sex: Option<String>,
    #[serde(rename = "AFFECTED STATUS", default)]
    pub affected_status: Option<String>,
    #[serde(rename = "HPO PRESENT", default)]
    pub hpo_present: Option<String>,
    #[serde(rename = "AGE OF ONSET (yrs)", default)]
    pub age_of_onset: Option<String>,

    #[serde(rename = "Gene", default)]
    pub gene: Option<String>,
    #[serde(rename = "Transcript", default)]
    pub transcript: Option<String>,
    #[serde(rename = "Zygosity", default)]
    pub zygosity: Option<String>,

    #[serde(rename = "Chrom-1", default)]
    pub chrom_1: Option<String>,
    #[serde(rename = "Pos-1", default)]
    pub pos_1: Option<String>,
    #[serde(rename = "Ref-1", default)]
    pub ref_1: Option<String>,
    #[serde(rename = "Alt-1", default)]
    pub alt_1: Option<String>,
    #[serde(rename = "HGVSc-1", default)]
    pub hgvsc_1: Option<String>,
    #[serde(rename = "HGVSp-1", default)]
    pub hgvsp_1: Option<String>,

    #[serde(rename = "Chrom-2", default)]
    pub chrom_2: Option<String>,
    #[serde(rename = "Pos-2", default)]
    pub pos_2: Option<String>,
    #[serde(rename = "Ref-2", default)]
    pub ref_2: Option<String>,
    #[serde(rename = "Alt-2", default)]
    pub alt_2: Option<String>,
    #[serde(rename = "HGVSc-2", default)]
    pub hgvsc_2: Option<String>,
    #[serde(rename = "HGVSp-2", default)]
    pub hgvsp_2: Option<String>,
}

/// Borrowed view of one `-1` or `-2` variant column slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantColumns<'a> {
    pub slot: u8,
    pub chrom: Option<&'a str>,
    pub pos: Option<&'a str>,
    pub reference: Option<&'a str>,
    pub alternate: Option<&'a str>,
    pub hgvsc: Option<&'a str>,
    pub hgvsp: Option<&'a str>,
}

impl PedigreeRow {
    /// Variant slots in column order: `-1` first, then `-2`
    pub fn variant_slots(&self) -> [VariantColumns<'_>; 2] {
        [
            VariantColumns {
                slot: 1,
                chrom: self.chrom_1.as_deref(),
                pos: self.pos_1.as_deref(),
                reference: self.ref_1.as_deref(),
                alternate: self.alt_1.as_deref(),
                hgvsc: self.hgvsc_1.as_deref(),
                hgvsp: self.hgvsp_1.as_deref(),
            },
            VariantColumns {
                slot: 2,
                chrom: self.chrom_2.as_deref(),
                pos: self.pos_2.as_deref(),
                reference: self.ref_2.as_deref(),
                alternate: self.alt_2.as_deref(),
                hgvsc: self.hgvsc_2.as_deref(),
                hgvsp: self.hgvsp_2.as_deref(),
            },
        ]
    }
}

/// Errors that abort reading the whole table
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("Required column '{0}' missing from header")]
    MissingColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}

/// Reader for pedigree/variant tables
#[derive(Debug, Clone)]
pub struct PedigreeTableReader {
    delimiter: u8,
}

impl Default for PedigreeTableReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PedigreeTableReader {
    /// Comma-delimited reader
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Tab-delimited reader
    pub fn tab_delimited() -> Self {
        Self { delimiter: b'\t' }
    }

    /// Pick the delimiter from the file extension (`.tsv`/`.txt` are tab-delimited)
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());

        match ext.as_deref() {
            Some("tsv") | Some("txt") => Self::tab_delimited(),
            _ => Self::new(),
        }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Read every row of the table at `path`
    ///
    /// # Returns
    /// * `Ok(Vec<PedigreeRow>)` - Rows in file order; malformed records are skipped
    /// * `Err(TableError::InputNotFound)` - File cannot be opened
    /// * `Err(TableError::MissingColumn)` - Header has no `ID` column
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Vec<PedigreeRow>, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TableError::InputNotFound(path.to_path_buf()),
            _ => TableError::Io(e),
        })?;

        self.read_from(file)
    }

    /// Read rows from any byte source
    pub fn read_from<R: Read>(&self, source: R) -> Result<Vec<PedigreeRow>, TableError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        if !headers.iter().any(|h| h == ID_COLUMN) {
            return Err(TableError::MissingColumn(ID_COLUMN.to_string()));
        }
        debug!("Table header: {} columns", headers.len());

        let mut rows = Vec::new();

        for (idx, result) in reader.deserialize::<PedigreeRow>().enumerate() {
            let row_number = idx + 1;
            match result {
                Ok(mut row) => {
                    row.row_number = row_number;
                    rows.push(row);
                }
                Err(e) => {
                    warn!("Skipping row {} - unreadable record: {}", row_number, e);
                }
            }
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "ID,SEX,AFFECTED STATUS,HPO PRESENT,AGE OF ONSET (yrs),Gene,Transcript,Zygosity,Chrom-1,Pos-1,Ref-1,Alt-1,HGVSc-1,HGVSp-1,Chrom-2,Pos-2,Ref-2,Alt-2,HGVSc-2,HGVSp-2";

    fn create_test_file(contents: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_full_row() {
        let contents = format!(
            "{}\nFAM1_PROBAND,male,affected,HP:0001250 (Seizure),3,ABC,NM_1,Heterozygous,1,100,A,G,c.1A>G,p.M1V,,,,,,\n",
            HEADER
        );
        let file = create_test_file(&contents, ".csv");

        let rows = PedigreeTableReader::new().read(file.path()).unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.row_number, 1);
        assert_eq!(row.id.as_deref(), Some("FAM1_PROBAND"));
        assert_eq!(row.hpo_present.as_deref(), Some("HP:0001250 (Seizure)"));
        assert_eq!(row.age_of_onset.as_deref(), Some("3"));

        let [first, second] = row.variant_slots();
        assert_eq!(first.slot, 1);
        assert_eq!(first.chrom, Some("1"));
        assert_eq!(first.pos, Some("100"));
        assert_eq!(first.hgvsp, Some("p.M1V"));
        assert_eq!(second.slot, 2);
        assert!(second.chrom.map_or(true, |c| c.trim().is_empty()));
    }

    #[test]
    fn test_missing_optional_columns() {
        let file = create_test_file("ID,SEX\nFAM1_MOTHER,female\nFAM1_FATHER,male\n", ".csv");

        let rows = PedigreeTableReader::new().read(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].row_number, 2);
        assert_eq!(rows[0].sex.as_deref(), Some("female"));
        assert!(rows[0].affected_status.is_none());
        assert!(rows[0].chrom_1.is_none());
        assert!(rows[0].gene.is_none());
    }

    #[test]
    fn test_missing_id_column_is_fatal() {
        let file = create_test_file("SEX,AFFECTED STATUS\nmale,affected\n", ".csv");

        match PedigreeTableReader::new().read(file.path()) {
            Err(TableError::MissingColumn(column)) => assert_eq!(column, "ID"),
            other => panic!("Expected MissingColumn error, got {:?}", other),
        }
    }

    #[test]
    fn test_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.csv");

        match PedigreeTableReader::new().read(&missing) {
            Err(TableError::InputNotFound(path)) => assert_eq!(path, missing),
            other => panic!("Expected InputNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_tab_delimited_by_extension() {
        let file = create_test_file("ID\tSEX\nFAM2_SIBLING\tfemale\n", ".tsv");

        let reader = PedigreeTableReader::for_path(file.path());
        assert_eq!(reader.delimiter(), b'\t');

        let rows = reader.read(file.path()).unwrap();
        assert_eq!(rows[0].id.as_deref(), Some("FAM2_SIBLING"));
        assert_eq!(rows[0].sex.as_deref(), Some("female"));
    }

    #[test]
    fn test_ragged_rows_tolerated() {
        let file = create_test_file("ID,SEX,AFFECTED STATUS\nFAM1_PROBAND,male\n", ".csv");

        let rows = PedigreeTableReader::new().read(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sex.as_deref(), Some("male"));
        assert!(rows[0].affected_status.is_none());
    }

    #[test]
    fn test_values_trimmed() {
        let file = create_test_file("ID,SEX\n  FAM1_PROBAND  , male \n", ".csv");

        let rows = PedigreeTableReader::new().read(file.path()).unwrap();
        assert_eq!(rows[0].id.as_deref(), Some("FAM1_PROBAND"));
        assert_eq!(rows[0].sex.as_deref(), Some("male"));
    }
}
