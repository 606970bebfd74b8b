// ==============================================================================
// parsers/mod.rs - Input parser modules
// ==============================================================================
// Description: Table reader and field-level parsers for pedigree/variant data
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

pub mod fields;
pub mod pedigree_table;

pub use fields::{normalize_affected, normalize_sex, parse_age, parse_hpo_terms, parse_zygosity};
pub use pedigree_table::{PedigreeRow, PedigreeTableReader, TableError, VariantColumns};
