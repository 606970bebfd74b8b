// ==============================================================================
// config.rs - Metadata Configuration
// ==============================================================================
// Description: Read-only ontology resource and producer metadata for phenopackets
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::schema::{MetaData, Resource};

pub const PHENOPACKET_SCHEMA_VERSION: &str = "2.0";
pub const DEFAULT_CREATED_BY: &str = "family-phenopackets";
pub const DEFAULT_GENOME_ASSEMBLY: &str = "GRCh38";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid resources file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Resources file contains no resources")]
    EmptyResources,
}

/// Process-wide metadata configuration.
///
/// Built once at startup and handed by reference to the individual and
/// family builders. The `created` timestamp is captured at construction so
/// every document produced by one run shares it.
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    pub created: DateTime<Utc>,
    pub created_by: String,
    pub schema_version: String,
    pub genome_assembly: String,
    pub resources: Vec<Resource>,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            created: Utc::now(),
            created_by: DEFAULT_CREATED_BY.to_string(),
            schema_version: PHENOPACKET_SCHEMA_VERSION.to_string(),
            genome_assembly: DEFAULT_GENOME_ASSEMBLY.to_string(),
            resources: default_resources(),
        }
    }
}

impl MetadataConfig {
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    pub fn with_genome_assembly(mut self, assembly: impl Into<String>) -> Self {
        self.genome_assembly = assembly.into();
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Replace the built-in resources with a JSON array read from `path`
    pub fn with_resources_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let resources: Vec<Resource> = serde_json::from_reader(reader)?;

        if resources.is_empty() {
            return Err(ConfigError::EmptyResources);
        }

        info!("Loaded {} ontology resources from {:?}", resources.len(), path);
        self.resources = resources;
        Ok(self)
    }

    /// Metadata advertising the full ontology resource set
    pub fn full(&self) -> MetaData {
        MetaData {
            created: self.created,
            created_by: self.created_by.clone(),
            resources: self.resources.clone(),
            phenopacket_schema_version: self.schema_version.clone(),
        }
    }

    /// Metadata without resource provenance
    pub fn minimal(&self) -> MetaData {
        MetaData {
            created: self.created,
            created_by: self.created_by.clone(),
            resources: Vec::new(),
            phenopacket_schema_version: self.schema_version.clone(),
        }
    }
}

/// HP, MONDO and GENO resources with the versions the terms were curated against
pub fn default_resources() -> Vec<Resource> {
    vec![
        Resource {
            id: "hp".to_string(),
            name: "Human Phenotype Ontology".to_string(),
            url: "http://purl.obolibrary.org/obo/hp.owl".to_string(),
            version: "2026-01-08".to_string(),
            namespace_prefix: "HP".to_string(),
            iri_prefix: "http://purl.obolibrary.org/obo/HP_".to_string(),
        },
        Resource {
            id: "mondo".to_string(),
            name: "Mondo Disease Ontology".to_string(),
            url: "http://purl.obolibrary.org/obo/mondo/mondo-international.owl".to_string(),
            version: "2026-02-03".to_string(),
            namespace_prefix: "MONDO".to_string(),
            iri_prefix: "http://purl.obolibrary.org/obo/MONDO_".to_string(),
        },
        Resource {
            id: "geno".to_string(),
            name: "Genotype Ontology".to_string(),
            url: "http://purl.obolibrary.org/obo/geno.owl".to_string(),
            version: "2025-07-25".to_string(),
            namespace_prefix: "GENO".to_string(),
            iri_prefix: "http://purl.obolibrary.org/obo/GENO_".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_full_and_minimal_metadata() {
        let config = MetadataConfig::default().with_created_by("unit-test");

        let full = config.full();
        assert_eq!(full.resources.len(), 3);
        assert_eq!(full.resources[0].id, "hp");
        assert_eq!(full.created_by, "unit-test");
        assert_eq!(full.phenopacket_schema_version, "2.0");

        let minimal = config.minimal();
        assert!(minimal.resources.is_empty());
        assert_eq!(minimal.created, full.created);
    }

    #[test]
    fn test_resources_file_override() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"hp","name":"HPO","url":"http://example.org/hp.owl","version":"2030-01-01","namespacePrefix":"HP","iriPrefix":"http://example.org/HP_"}}]"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = MetadataConfig::default()
            .with_resources_file(file.path())
            .unwrap();

        assert_eq!(config.resources.len(), 1);
        assert_eq!(config.resources[0].version, "2030-01-01");
    }

    #[test]
    fn test_empty_resources_file_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        file.flush().unwrap();

        match MetadataConfig::default().with_resources_file(file.path()) {
            Err(ConfigError::EmptyResources) => {}
            other => panic!("Expected EmptyResources, got {:?}", other),
        }
    }
}
