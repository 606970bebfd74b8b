// ==============================================================================
// lib.rs - Family Phenopacket Library
// ==============================================================================
// Description: Library interface for pedigree table to phenopacket Family conversion
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

pub mod parsers;
pub mod models;
pub mod schema;
pub mod config;
pub mod individual;
pub mod family;
pub mod validator;
pub mod output;
pub mod processor;
