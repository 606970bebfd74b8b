// ==============================================================================
// processor.rs - Family Phenopacket Pipeline
// ==============================================================================
// Description: Table rows -> individual records -> families -> JSON documents
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Stages run strictly in order: every row is converted before any grouping,
// and grouping completes before any family is assembled or written.
// ==============================================================================

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::MetadataConfig;
use crate::family::{group_by_family, FamilyAssembler};
use crate::individual::{IndividualBuilder, IndividualRecord};
use crate::output::FamilyWriter;
use crate::parsers::{PedigreeRow, PedigreeTableReader};
use crate::schema::Family;
use crate::validator::{InputValidator, DEFAULT_MAX_INPUT_SIZE};

/// Counts reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub rows_read: usize,
    pub members_parsed: usize,
    pub rows_skipped: usize,
    pub families: usize,
    pub written: Vec<PathBuf>,
}

/// Families built from one batch of rows, plus the rows that were dropped
#[derive(Debug, Clone)]
pub struct FamilyBatch {
    pub families: Vec<Family>,
    pub members_parsed: usize,
    pub rows_skipped: usize,
}

pub struct FamilyProcessor {
    input_file: PathBuf,
    output_dir: PathBuf,
    metadata: MetadataConfig,
    max_input_size: u64,
}

impl FamilyProcessor {
    pub fn new(input_file: PathBuf, output_dir: PathBuf, metadata: MetadataConfig) -> Self {
        Self {
            input_file,
            output_dir,
            metadata,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }

    pub fn with_max_input_size(mut self, max: u64) -> Self {
        self.max_input_size = max;
        self
    }

    /// Main processing pipeline
    pub fn process(&self) -> Result<RunSummary> {
        // 1. Validate input (missing file or ID column aborts here)
        let validated = InputValidator::new()
            .with_max_file_size(self.max_input_size)
            .validate(&self.input_file)
            .context("Input validation failed")?;

        // 2. Prepare output directory
        let writer = FamilyWriter::create(&self.output_dir)?;

        // 3. Read rows
        info!(
            "Reading samples from {:?} ({} bytes, {} delimited)...",
            validated.path,
            validated.size,
            if validated.delimiter == b'\t' { "tab" } else { "comma" }
        );
        let rows = PedigreeTableReader::for_path(&validated.path)
            .read(&validated.path)
            .context("Failed to read pedigree table")?;

        // 4. Build families
        let batch = self.build_families(&rows);
        info!("Parsed {} family members", batch.members_parsed);
        info!("Found {} families", batch.families.len());

        // 5. Write one document per family
        info!("Creating phenopacket files...");
        let mut written = Vec::with_capacity(batch.families.len());
        for family in &batch.families {
            let path = writer
                .write(family)
                .with_context(|| format!("Failed to write family {}", family.id))?;
            written.push(path);
        }

        let summary = RunSummary {
            rows_read: rows.len(),
            members_parsed: batch.members_parsed,
            rows_skipped: batch.rows_skipped,
            families: batch.families.len(),
            written,
        };

        info!(
            "Completed! {} files created in {:?} ({} rows read, {} skipped)",
            summary.written.len(),
            writer.output_dir(),
            summary.rows_read,
            summary.rows_skipped
        );

        Ok(summary)
    }

    /// Convert rows into assembled families without touching the filesystem
    pub fn build_families(&self, rows: &[PedigreeRow]) -> FamilyBatch {
        let builder = IndividualBuilder::new(&self.metadata);

        let mut members: Vec<IndividualRecord> = Vec::with_capacity(rows.len());
        let mut rows_skipped = 0;

        for row in rows {
            match builder.build(row) {
                Ok(member) => members.push(member),
                Err(e) => {
                    warn!("Skipping row {} - {}", row.row_number, e);
                    rows_skipped += 1;
                }
            }
        }

        let members_parsed = members.len();

        let assembler = FamilyAssembler::new(&self.metadata);
        let families = group_by_family(members)
            .into_iter()
            .map(|group| assembler.assemble(group))
            .collect();

        FamilyBatch {
            families,
            members_parsed,
            rows_skipped,
        }
    }
}
