// ==============================================================================
// individual.rs - Individual Clinical Record Builder
// ==============================================================================
// Description: Converts one pedigree table row into a per-individual phenopacket
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// The ID column is the only field that can reject a row. Everything else
// degrades to a default:
//   - unrecognized SEX / AFFECTED STATUS -> UNKNOWN_SEX / MISSING
//   - malformed HPO terms                -> dropped
//   - blank Chrom-N                      -> no variant call for slot N
//   - unparsable Pos-N                   -> no variant call for slot N
// ==============================================================================

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::MetadataConfig;
use crate::models::{
    AffectedStatus, IndividualId, InterpretationStatus, ProgressStatus, Role, Sex, VariantCall,
};
use crate::parsers::{
    normalize_affected, normalize_sex, parse_age, parse_hpo_terms, parse_zygosity, PedigreeRow,
    VariantColumns,
};
use crate::schema::{
    Diagnosis, Expression, GeneDescriptor, GenomicInterpretation, Individual, Interpretation,
    OntologyClass, Phenopacket, PhenotypicFeature, TimeElement, VariantInterpretation,
    VariationDescriptor, VcfRecord,
};

/// The input carries no disease column, so every diagnosis references this stub
pub const STUB_DISEASE_ID: &str = "MONDO:0003847";
pub const STUB_DISEASE_LABEL: &str = "hereditary disease";

const INDIVIDUAL_ID_PATTERN: &str = r"^(.+)_(MOTHER|FATHER|PROBAND|SIBLING)";

// Literal pattern, covered by test_individual_id_pattern_compiles
static INDIVIDUAL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(INDIVIDUAL_ID_PATTERN).expect("individual ID pattern is valid"));

/// Row-level failures; the row is skipped and processing continues
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid ID format: {0}")]
    InvalidIdentifierFormat(String),
}

/// Split an individual ID into family prefix and role.
///
/// The prefix is greedy and the pattern is not anchored at the end, so
/// `FAM1_SIBLING2` is a SIBLING of family `FAM1` and `A_B_MOTHER` belongs to
/// family `A_B`.
pub fn parse_individual_id(raw: &str) -> Result<IndividualId, ParseError> {
    let caps = INDIVIDUAL_ID
        .captures(raw)
        .ok_or_else(|| ParseError::InvalidIdentifierFormat(raw.to_string()))?;

    let role = Role::from_suffix(&caps[2])
        .ok_or_else(|| ParseError::InvalidIdentifierFormat(raw.to_string()))?;

    Ok(IndividualId {
        raw: raw.to_string(),
        family_id: caps[1].to_string(),
        role,
    })
}

/// One fully-formed individual clinical record
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualRecord {
    pub id: IndividualId,
    pub sex: Sex,
    pub affected_status: AffectedStatus,
    pub phenopacket: Phenopacket,
}

impl IndividualRecord {
    pub fn family_id(&self) -> &str {
        &self.id.family_id
    }

    pub fn individual_id(&self) -> &str {
        &self.id.raw
    }

    pub fn role(&self) -> Role {
        self.id.role
    }

    pub fn phenotypic_features(&self) -> &[PhenotypicFeature] {
        &self.phenopacket.phenotypic_features
    }

    pub fn variant_interpretations(&self) -> &[Interpretation] {
        &self.phenopacket.interpretations
    }
}

/// Builds individual records against a shared metadata configuration
#[derive(Debug, Clone, Copy)]
pub struct IndividualBuilder<'a> {
    metadata: &'a MetadataConfig,
}

impl<'a> IndividualBuilder<'a> {
    pub fn new(metadata: &'a MetadataConfig) -> Self {
        Self { metadata }
    }

    /// Build one individual record from a raw table row
    ///
    /// # Returns
    /// * `Ok(IndividualRecord)` - Record with phenotypes and 0 or 1 interpretation
    /// * `Err(ParseError::InvalidIdentifierFormat)` - ID does not end in a known role
    pub fn build(&self, row: &PedigreeRow) -> Result<IndividualRecord, ParseError> {
        let id = parse_individual_id(row.id.as_deref().unwrap_or_default())?;

        let sex = normalize_sex(row.sex.as_deref());
        let affected_status = normalize_affected(row.affected_status.as_deref());

        let phenotypic_features: Vec<PhenotypicFeature> =
            parse_hpo_terms(row.hpo_present.as_deref().unwrap_or_default())
                .into_iter()
                .map(|term| PhenotypicFeature { term })
                .collect();

        let time_at_last_encounter = row
            .age_of_onset
            .as_deref()
            .and_then(parse_age)
            .map(|age| TimeElement { age });

        let calls = read_variant_calls(row);
        let interpretations =
            self.build_interpretations(&id.raw, affected_status, &calls);

        // Intentional asymmetry: only phenotype-bearing records advertise
        // ontology resource versions. Downstream consumers rely on resource
        // provenance being absent when there are no HPO terms.
        let meta_data = if phenotypic_features.is_empty() {
            self.metadata.minimal()
        } else {
            self.metadata.full()
        };

        debug!(
            "Built {} ({}): {} phenotypes, {} variant calls",
            id.raw,
            id.role,
            phenotypic_features.len(),
            calls.len()
        );

        // Packet id is role-level; the raw ID stays on the subject
        let phenopacket = Phenopacket {
            id: format!("{}_{}", id.family_id, id.role),
            subject: Individual {
                id: id.raw.clone(),
                time_at_last_encounter,
                sex,
            },
            phenotypic_features,
            interpretations,
            meta_data,
        };

        Ok(IndividualRecord {
            id,
            sex,
            affected_status,
            phenopacket,
        })
    }

    /// One interpretation aggregating every call, or none when there are no calls
    fn build_interpretations(
        &self,
        individual_id: &str,
        affected: AffectedStatus,
        calls: &[VariantCall],
    ) -> Vec<Interpretation> {
        if calls.is_empty() {
            return Vec::new();
        }

        let status = InterpretationStatus::for_calls(affected, calls.len());

        let genomic_interpretations = calls
            .iter()
            .map(|call| GenomicInterpretation {
                subject_or_biosample_id: individual_id.to_string(),
                interpretation_status: status,
                variant_interpretation: VariantInterpretation {
                    variation_descriptor: self.variation_descriptor(call),
                },
            })
            .collect();

        vec![Interpretation {
            id: individual_id.to_string(),
            progress_status: ProgressStatus::for_affected(affected),
            diagnosis: Diagnosis {
                disease: OntologyClass::new(STUB_DISEASE_ID, STUB_DISEASE_LABEL),
                genomic_interpretations,
            },
        }]
    }

    fn variation_descriptor(&self, call: &VariantCall) -> VariationDescriptor {
        let mut expressions = Vec::with_capacity(2);
        if !call.hgvsc.is_empty() {
            expressions.push(Expression::hgvs(format!("{}:{}", call.transcript, call.hgvsc)));
        }
        if !call.hgvsp.is_empty() {
            expressions.push(Expression::hgvs(call.hgvsp.clone()));
        }

        let (state_id, state_label) = call.zygosity.geno_term();

        VariationDescriptor {
            id: call.key(),
            gene_context: GeneDescriptor {
                value_id: String::new(),
                symbol: call.gene.clone(),
            },
            expressions,
            vcf_record: VcfRecord {
                genome_assembly: self.metadata.genome_assembly.clone(),
                chrom: call.chromosome.clone(),
                pos: call.position,
                reference: call.reference.clone(),
                alternate: call.alternate.clone(),
            },
            allelic_state: OntologyClass::new(state_id, state_label),
        }
    }
}

/// Read up to two variant calls from the `-1` and `-2` column slots.
///
/// A slot counts only when its chromosome is non-blank. Gene, transcript and
/// zygosity are shared by both slots.
pub fn read_variant_calls(row: &PedigreeRow) -> Vec<VariantCall> {
    row.variant_slots()
        .iter()
        .filter_map(|columns| variant_call(row, columns))
        .collect()
}

fn variant_call(row: &PedigreeRow, columns: &VariantColumns<'_>) -> Option<VariantCall> {
    let chromosome = columns.chrom.map(str::trim).filter(|c| !c.is_empty())?;

    let raw_pos = columns.pos.unwrap_or_default().trim();
    let position = match raw_pos.parse::<u64>() {
        Ok(pos) if pos > 0 => pos,
        _ => {
            warn!(
                "Row {}: dropping variant slot {} on chromosome {} - invalid position '{}'",
                row.row_number, columns.slot, chromosome, raw_pos
            );
            return None;
        }
    };

    let text = |value: Option<&str>| value.unwrap_or_default().trim().to_string();

    Some(VariantCall {
        chromosome: chromosome.to_string(),
        position,
        reference: text(columns.reference),
        alternate: text(columns.alternate),
        gene: text(row.gene.as_deref()),
        transcript: text(row.transcript.as_deref()),
        hgvsc: text(columns.hgvsc),
        hgvsp: text(columns.hgvsp),
        zygosity: parse_zygosity(row.zygosity.as_deref()),
    })
}
