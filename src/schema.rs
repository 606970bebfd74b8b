// ==============================================================================
// schema.rs - Phenopacket Document Types
// ==============================================================================
// Description: Serializable GA4GH Phenopacket v2 Family document structures
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Field names follow the camelCase JSON mapping of the phenopacket schema.
// Empty sequences and absent optionals are omitted from the document.
// ==============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AffectedStatus, InterpretationStatus, ProgressStatus, Sex};

/// Ontology term reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyClass {
    pub id: String,
    pub label: String,
}

impl OntologyClass {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Ontology resource advertised in metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub url: String,
    pub version: String,
    pub namespace_prefix: String,
    pub iri_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    pub created: DateTime<Utc>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
    pub phenopacket_schema_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Age {
    /// ISO-8601 duration, e.g. "P5Y"
    pub iso8601duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeElement {
    pub age: Age,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Individual {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_at_last_encounter: Option<TimeElement>,
    pub sex: Sex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenotypicFeature {
    #[serde(rename = "type")]
    pub term: OntologyClass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneDescriptor {
    pub value_id: String,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub syntax: String,
    pub value: String,
}

impl Expression {
    pub fn hgvs(value: impl Into<String>) -> Self {
        Self {
            syntax: "hgvs".to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VcfRecord {
    pub genome_assembly: String,
    pub chrom: String,
    pub pos: u64,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "alt")]
    pub alternate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariationDescriptor {
    pub id: String,
    pub gene_context: GeneDescriptor,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expressions: Vec<Expression>,
    pub vcf_record: VcfRecord,
    pub allelic_state: OntologyClass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInterpretation {
    pub variation_descriptor: VariationDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenomicInterpretation {
    pub subject_or_biosample_id: String,
    pub interpretation_status: InterpretationStatus,
    pub variant_interpretation: VariantInterpretation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub disease: OntologyClass,
    pub genomic_interpretations: Vec<GenomicInterpretation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    pub id: String,
    pub progress_status: ProgressStatus,
    pub diagnosis: Diagnosis,
}

/// Per-individual clinical record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phenopacket {
    pub id: String,
    pub subject: Individual,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phenotypic_features: Vec<PhenotypicFeature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interpretations: Vec<Interpretation>,
    pub meta_data: MetaData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub family_id: String,
    pub individual_id: String,
    pub paternal_id: String,
    pub maternal_id: String,
    pub sex: Sex,
    pub affected_status: AffectedStatus,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pedigree {
    pub persons: Vec<Person>,
}

/// Family-level genealogy record, one per distinct family ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proband: Option<Phenopacket>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relatives: Vec<Phenopacket>,
    pub pedigree: Pedigree,
    pub meta_data: MetaData,
}
