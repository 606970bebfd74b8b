// ==============================================================================
// models.rs - Pedigree Domain Models
// ==============================================================================
// Description: Closed enumerations and value types for family/variant records
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of an individual within a family, taken from the ID suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Mother,
    Father,
    Proband,
    Sibling,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Mother => "MOTHER",
            Role::Father => "FATHER",
            Role::Proband => "PROBAND",
            Role::Sibling => "SIBLING",
        }
    }

    /// Parse the exact upper-case suffix used in individual IDs
    pub fn from_suffix(value: &str) -> Option<Self> {
        match value {
            "MOTHER" => Some(Role::Mother),
            "FATHER" => Some(Role::Father),
            "PROBAND" => Some(Role::Proband),
            "SIBLING" => Some(Role::Sibling),
            _ => None,
        }
    }

    /// Founders carry the "0" sentinel for both parent fields in a pedigree
    pub fn is_parent(&self) -> bool {
        matches!(self, Role::Mother | Role::Father)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phenotypic sex of an individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    #[default]
    UnknownSex,
    Female,
    Male,
    OtherSex,
}

impl Sex {
    /// Exhaustive lookup over the upper-cased input; `None` for anything else
    pub fn from_normalized(value: &str) -> Option<Self> {
        match value {
            "MALE" => Some(Sex::Male),
            "FEMALE" => Some(Sex::Female),
            "OTHER_SEX" => Some(Sex::OtherSex),
            "UNKNOWN_SEX" => Some(Sex::UnknownSex),
            _ => None,
        }
    }
}

/// Affected status of a pedigree member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AffectedStatus {
    #[default]
    Missing,
    Unaffected,
    Affected,
}

impl AffectedStatus {
    /// Exhaustive lookup over the upper-cased input; "UNKNOWN" folds into MISSING
    pub fn from_normalized(value: &str) -> Option<Self> {
        match value {
            "AFFECTED" => Some(AffectedStatus::Affected),
            "UNAFFECTED" => Some(AffectedStatus::Unaffected),
            "MISSING" | "UNKNOWN" => Some(AffectedStatus::Missing),
            _ => None,
        }
    }
}

/// Allelic state of a variant call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zygosity {
    Homozygous,
    #[default]
    Heterozygous,
}

impl Zygosity {
    /// GENO ontology term (id, label) for this allelic state
    pub fn geno_term(&self) -> (&'static str, &'static str) {
        match self {
            Zygosity::Homozygous => ("GENO:0000136", "homozygous"),
            Zygosity::Heterozygous => ("GENO:0000135", "heterozygous"),
        }
    }
}

/// Per-variant interpretation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterpretationStatus {
    Candidate,
    Causative,
    Contributory,
}

impl InterpretationStatus {
    /// Status is a pure function of affected status and the number of calls.
    ///
    /// - AFFECTED with two calls (compound heterozygous) -> CONTRIBUTORY
    /// - AFFECTED with one call -> CAUSATIVE
    /// - anything else -> CANDIDATE
    pub fn for_calls(affected: AffectedStatus, variant_count: usize) -> Self {
        match (affected, variant_count) {
            (AffectedStatus::Affected, 2) => InterpretationStatus::Contributory,
            (AffectedStatus::Affected, _) => InterpretationStatus::Causative,
            _ => InterpretationStatus::Candidate,
        }
    }
}

/// Progress status of an interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStatus {
    Completed,
    Solved,
}

impl ProgressStatus {
    pub fn for_affected(affected: AffectedStatus) -> Self {
        if affected == AffectedStatus::Affected {
            ProgressStatus::Solved
        } else {
            ProgressStatus::Completed
        }
    }
}

/// Individual identifier split into family prefix and role suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndividualId {
    /// Raw identifier as read from the `ID` column
    pub raw: String,
    /// Prefix preceding the last `_ROLE` suffix
    pub family_id: String,
    pub role: Role,
}

/// A single variant call read from one `-1`/`-2` column slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantCall {
    pub chromosome: String,
    /// 1-based position, always positive
    pub position: u64,
    pub reference: String,
    pub alternate: String,
    pub gene: String,
    pub transcript: String,
    pub hgvsc: String,
    pub hgvsp: String,
    pub zygosity: Zygosity,
}

impl VariantCall {
    /// Stable variant identifier: `chrom-pos-ref-alt`
    pub fn key(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.chromosome, self.position, self.reference, self.alternate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpretation_status_rules() {
        use InterpretationStatus::*;

        assert_eq!(InterpretationStatus::for_calls(AffectedStatus::Affected, 2), Contributory);
        assert_eq!(InterpretationStatus::for_calls(AffectedStatus::Affected, 1), Causative);

        for count in [1, 2] {
            assert_eq!(InterpretationStatus::for_calls(AffectedStatus::Unaffected, count), Candidate);
            assert_eq!(InterpretationStatus::for_calls(AffectedStatus::Missing, count), Candidate);
        }
    }

    #[test]
    fn test_progress_status() {
        assert_eq!(ProgressStatus::for_affected(AffectedStatus::Affected), ProgressStatus::Solved);
        assert_eq!(ProgressStatus::for_affected(AffectedStatus::Missing), ProgressStatus::Completed);
    }

    #[test]
    fn test_role_suffix_lookup() {
        assert_eq!(Role::from_suffix("SIBLING"), Some(Role::Sibling));
        assert_eq!(Role::from_suffix("sibling"), None);
        assert!(Role::Father.is_parent());
        assert!(!Role::Proband.is_parent());
    }

    #[test]
    fn test_enum_serde_names() {
        assert_eq!(serde_json::to_string(&Sex::OtherSex).unwrap(), "\"OTHER_SEX\"");
        assert_eq!(serde_json::to_string(&Sex::UnknownSex).unwrap(), "\"UNKNOWN_SEX\"");
        assert_eq!(serde_json::to_string(&AffectedStatus::Missing).unwrap(), "\"MISSING\"");
        assert_eq!(
            serde_json::to_string(&InterpretationStatus::Contributory).unwrap(),
            "\"CONTRIBUTORY\""
        );
    }

    #[test]
    fn test_variant_key() {
        let call = VariantCall {
            chromosome: "1".to_string(),
            position: 100,
            reference: "A".to_string(),
            alternate: "G".to_string(),
            gene: "ABC".to_string(),
            transcript: "NM_1".to_string(),
            hgvsc: "c.1A>G".to_string(),
            hgvsp: "p.M1V".to_string(),
            zygosity: Zygosity::Heterozygous,
        };
        assert_eq!(call.key(), "1-100-A-G");
    }
}
