// ==============================================================================
// family.rs - Family Aggregation and Assembly
// ==============================================================================
// Description: Groups individuals by family, derives pedigrees, builds Family records
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Pedigree rules:
//   MOTHER / FATHER          -> paternalId = maternalId = "0" (founders)
//   PROBAND / SIBLING        -> paternalId = first FATHER id, maternalId = first MOTHER id
//                               ("0" when the family has no such row)
// Duplicate parent rows are not rejected; the first one wins and a warning is logged.
// ==============================================================================

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::MetadataConfig;
use crate::individual::IndividualRecord;
use crate::models::Role;
use crate::schema::{Family, Pedigree, Person};

/// Placeholder for "no recorded parent"
pub const FOUNDER_SENTINEL: &str = "0";

/// All individuals sharing one family ID, in encounter order
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyGroup {
    pub family_id: String,
    pub members: Vec<IndividualRecord>,
}

/// Group records by family ID.
///
/// Families appear in first-seen order and members keep their input order.
pub fn group_by_family(records: Vec<IndividualRecord>) -> Vec<FamilyGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<FamilyGroup> = Vec::new();

    for record in records {
        let slot = *index
            .entry(record.family_id().to_string())
            .or_insert_with(|| {
                groups.push(FamilyGroup {
                    family_id: record.family_id().to_string(),
                    members: Vec::new(),
                });
                groups.len() - 1
            });
        groups[slot].members.push(record);
    }

    groups
}

/// First individual ID with the given role, or the founder sentinel
fn resolve_parent(family_id: &str, members: &[IndividualRecord], role: Role) -> String {
    let mut matches = members.iter().filter(|m| m.role() == role);

    let Some(first) = matches.next() else {
        return FOUNDER_SENTINEL.to_string();
    };

    let extra: Vec<&str> = matches.map(|m| m.individual_id()).collect();
    if !extra.is_empty() {
        warn!(
            "Family {} has {} {} rows; using {} and ignoring {:?}",
            family_id,
            extra.len() + 1,
            role,
            first.individual_id(),
            extra
        );
    }

    first.individual_id().to_string()
}

/// Derive the pedigree for one family
pub fn build_pedigree(family_id: &str, members: &[IndividualRecord]) -> Pedigree {
    let father_id = resolve_parent(family_id, members, Role::Father);
    let mother_id = resolve_parent(family_id, members, Role::Mother);

    let persons = members
        .iter()
        .map(|member| {
            let (paternal_id, maternal_id) = if member.role().is_parent() {
                (FOUNDER_SENTINEL.to_string(), FOUNDER_SENTINEL.to_string())
            } else {
                (father_id.clone(), mother_id.clone())
            };

            Person {
                family_id: family_id.to_string(),
                individual_id: member.individual_id().to_string(),
                paternal_id,
                maternal_id,
                sex: member.sex,
                affected_status: member.affected_status,
            }
        })
        .collect();

    Pedigree { persons }
}

/// Assembles Family records; family metadata always advertises the full resource set
#[derive(Debug, Clone, Copy)]
pub struct FamilyAssembler<'a> {
    metadata: &'a MetadataConfig,
}

impl<'a> FamilyAssembler<'a> {
    pub fn new(metadata: &'a MetadataConfig) -> Self {
        Self { metadata }
    }

    /// Build the Family record for one group.
    ///
    /// The first PROBAND becomes the proband (absent if there is none); every
    /// other member becomes a relative in encounter order.
    pub fn assemble(&self, group: FamilyGroup) -> Family {
        let FamilyGroup { family_id, members } = group;

        let pedigree = build_pedigree(&family_id, &members);

        let mut proband = None;
        let mut relatives = Vec::with_capacity(members.len());

        for member in members {
            if proband.is_none() && member.role() == Role::Proband {
                proband = Some(member.phenopacket);
            } else {
                if member.role() == Role::Proband {
                    warn!(
                        "Family {} has more than one PROBAND; {} kept as a relative",
                        family_id,
                        member.individual_id()
                    );
                }
                relatives.push(member.phenopacket);
            }
        }

        if proband.is_none() {
            warn!("Family {} has no PROBAND row", family_id);
        }

        debug!(
            "Assembled family {}: proband={}, {} relatives, {} pedigree persons",
            family_id,
            proband.is_some(),
            relatives.len(),
            pedigree.persons.len()
        );

        Family {
            id: family_id,
            proband,
            relatives,
            pedigree,
            meta_data: self.metadata.full(),
        }
    }
}
