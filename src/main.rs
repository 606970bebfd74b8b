// ==============================================================================
// main.rs - Family Phenopacket Builder Entry Point
// ==============================================================================
// Description: Converts a pedigree/variant table into phenopacket Family JSON files
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use family_phenopackets::config::{MetadataConfig, DEFAULT_CREATED_BY, DEFAULT_GENOME_ASSEMBLY};
use family_phenopackets::processor::FamilyProcessor;
use family_phenopackets::validator::DEFAULT_MAX_INPUT_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Create phenopacket Family objects from variant CSV files", long_about = None)]
struct Args {
    /// Input CSV/TSV file (one row per family member)
    input_file: PathBuf,

    /// Output directory for JSON files
    output_directory: PathBuf,

    /// Producer identity recorded in metaData.createdBy
    #[arg(long, env = "PHENOPACKET_CREATED_BY", default_value = DEFAULT_CREATED_BY)]
    created_by: String,

    /// Genome assembly recorded on every VCF record
    #[arg(long, env = "PHENOPACKET_GENOME_ASSEMBLY", default_value = DEFAULT_GENOME_ASSEMBLY)]
    genome_assembly: String,

    /// JSON array of ontology resources replacing the built-in HP/MONDO/GENO set
    #[arg(long, env = "PHENOPACKET_RESOURCES")]
    resources: Option<PathBuf>,

    /// Maximum accepted input size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_SIZE)]
    max_input_size: u64,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "family_phenopackets=info".into());

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.log_format);

    info!("Family phenopacket builder starting...");

    // Metadata is fixed for the whole run
    let mut metadata = MetadataConfig::default()
        .with_created_by(args.created_by)
        .with_genome_assembly(args.genome_assembly);

    if let Some(resources) = &args.resources {
        metadata = metadata.with_resources_file(resources)?;
    }

    let summary = FamilyProcessor::new(args.input_file, args.output_directory, metadata)
        .with_max_input_size(args.max_input_size)
        .process()?;

    info!(
        "{} families written, {} rows skipped",
        summary.families, summary.rows_skipped
    );

    Ok(())
}
