// ==============================================================================
// parsers/fields.rs - Pedigree Field Parsers
// ==============================================================================
// Description: Pure conversions from raw table text into typed values
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// None of these functions fail. Anything that does not parse strictly falls
// back to a documented default and is reported at DEBUG level only.
//
// Formats:
//   HPO PRESENT         HP:0001250 (Seizure); HP:0001263 (Global developmental delay)
//                       ('|' is accepted as a separator too)
//   AGE OF ONSET (yrs)  12
//   Zygosity            Homozygous | anything else
//   SEX                 male / FEMALE / other_sex / unknown_sex
//   AFFECTED STATUS     affected / unaffected / unknown / missing
// ==============================================================================

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::models::{AffectedStatus, Sex, Zygosity};
use crate::schema::{Age, OntologyClass};

const HPO_TERM_PATTERN: &str = r"^(HP:\d+)\s*\(([^)]+)\)";

// Literal pattern, covered by test_hpo_term_pattern_compiles
static HPO_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HPO_TERM_PATTERN).expect("HPO term pattern is valid"));

/// Parse a `;`/`|` separated list of `HP:nnnnnnn (Label)` terms.
///
/// Terms that do not have the `CODE (Label)` shape are dropped; the order of
/// the remaining terms is preserved.
pub fn parse_hpo_terms(value: &str) -> Vec<OntologyClass> {
    value
        .split(|c: char| c == ';' || c == '|')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .filter_map(|term| match HPO_TERM.captures(term) {
            Some(caps) => Some(OntologyClass::new(&caps[1], &caps[2])),
            None => {
                debug!("Dropping malformed HPO term: '{}'", term);
                None
            }
        })
        .collect()
}

/// Parse an age-of-onset in years into an ISO-8601 `P<n>Y` duration.
///
/// Blank input means no age was recorded. Fractional years are truncated;
/// negative or non-numeric values are treated as absent.
pub fn parse_age(value: &str) -> Option<Age> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let years = match value.parse::<u32>() {
        Ok(years) => years,
        Err(_) => match value.parse::<f64>() {
            Ok(years) if years.is_finite() && years >= 0.0 && years <= u32::MAX as f64 => {
                debug!("Truncating fractional age '{}' to whole years", value);
                years.trunc() as u32
            }
            _ => {
                debug!("Ignoring unparsable age of onset: '{}'", value);
                return None;
            }
        },
    };

    Some(Age {
        iso8601duration: format!("P{}Y", years),
    })
}

/// Map the zygosity column onto an allelic state.
///
/// Only the exact, case-sensitive literal `"Homozygous"` yields
/// `Zygosity::Homozygous`. Every other value, including "homozygous",
/// "HOM" and blank, is heterozygous. Widening this match changes how
/// existing inputs are classified.
pub fn parse_zygosity(value: Option<&str>) -> Zygosity {
    match value {
        Some("Homozygous") => Zygosity::Homozygous,
        _ => Zygosity::Heterozygous,
    }
}

/// Upper-case and map the SEX column, defaulting to `UNKNOWN_SEX`
pub fn normalize_sex(value: Option<&str>) -> Sex {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Sex::default();
    };

    Sex::from_normalized(&raw.to_uppercase()).unwrap_or_else(|| {
        debug!("Unrecognized sex '{}', using UNKNOWN_SEX", raw);
        Sex::default()
    })
}

/// Upper-case and map the AFFECTED STATUS column, defaulting to `MISSING`
pub fn normalize_affected(value: Option<&str>) -> AffectedStatus {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return AffectedStatus::default();
    };

    AffectedStatus::from_normalized(&raw.to_uppercase()).unwrap_or_else(|| {
        debug!("Unrecognized affected status '{}', using MISSING", raw);
        AffectedStatus::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hpo_term_pattern_compiles() {
        assert!(Regex::new(HPO_TERM_PATTERN).is_ok());
    }

    #[test]
    fn test_parse_hpo_terms_mixed_separators() {
        let terms = parse_hpo_terms(
            "HP:0001250 (Seizure); HP:0001263 (Global developmental delay) | HP:0000252 (Microcephaly)",
        );

        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0], OntologyClass::new("HP:0001250", "Seizure"));
        assert_eq!(terms[1].label, "Global developmental delay");
        assert_eq!(terms[2].id, "HP:0000252");
    }

    #[test]
    fn test_parse_hpo_terms_drops_malformed() {
        let terms = parse_hpo_terms("Seizure; HP:0001250 (Seizure); HP:123; ;MONDO:1 (x)");
        assert_eq!(terms, vec![OntologyClass::new("HP:0001250", "Seizure")]);
    }

    #[test]
    fn test_parse_hpo_terms_no_space_before_label() {
        let terms = parse_hpo_terms("HP:0001250(Seizure)");
        assert_eq!(terms, vec![OntologyClass::new("HP:0001250", "Seizure")]);
    }

    #[test]
    fn test_parse_hpo_terms_empty() {
        assert!(parse_hpo_terms("").is_empty());
        assert!(parse_hpo_terms("  ;  | ").is_empty());
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("5").unwrap().iso8601duration, "P5Y");
        assert_eq!(parse_age(" 0 ").unwrap().iso8601duration, "P0Y");
        assert_eq!(parse_age("2.7").unwrap().iso8601duration, "P2Y");
        assert!(parse_age("").is_none());
        assert!(parse_age("   ").is_none());
        assert!(parse_age("-3").is_none());
        assert!(parse_age("infancy").is_none());
    }

    #[test]
    fn test_parse_zygosity_is_exact_match() {
        assert_eq!(parse_zygosity(Some("Homozygous")), Zygosity::Homozygous);
        assert_eq!(parse_zygosity(Some("homozygous")), Zygosity::Heterozygous);
        assert_eq!(parse_zygosity(Some("Heterozygous")), Zygosity::Heterozygous);
        assert_eq!(parse_zygosity(Some("")), Zygosity::Heterozygous);
        assert_eq!(parse_zygosity(None), Zygosity::Heterozygous);
    }

    #[test]
    fn test_normalize_sex() {
        assert_eq!(normalize_sex(Some("male")), Sex::Male);
        assert_eq!(normalize_sex(Some("Female")), Sex::Female);
        assert_eq!(normalize_sex(Some("other_sex")), Sex::OtherSex);
        assert_eq!(normalize_sex(Some("M")), Sex::UnknownSex);
        assert_eq!(normalize_sex(Some("")), Sex::UnknownSex);
        assert_eq!(normalize_sex(None), Sex::UnknownSex);
    }

    #[test]
    fn test_normalize_affected() {
        assert_eq!(normalize_affected(Some("affected")), AffectedStatus::Affected);
        assert_eq!(normalize_affected(Some("Unaffected")), AffectedStatus::Unaffected);
        assert_eq!(normalize_affected(Some("unknown")), AffectedStatus::Missing);
        assert_eq!(normalize_affected(Some("yes")), AffectedStatus::Missing);
        assert_eq!(normalize_affected(None), AffectedStatus::Missing);
    }
}
