// ==============================================================================
// output.rs - Family Document Output
// ==============================================================================
// Description: Writes one phenopacket Family JSON document per family
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::schema::Family;

/// Fixed suffix appended to the family ID for output file names
pub const OUTPUT_SUFFIX: &str = "_PROBAND.json";

/// Deterministic output file name for a family
///
/// The family ID comes straight from the input table, so path separators and
/// anything outside `[A-Za-z0-9_.-]` are removed before it is used as a file
/// name. The result never names a path outside the output directory.
pub fn family_file_name(family_id: &str) -> String {
    format!("{}{}", sanitize_file_stem(family_id), OUTPUT_SUFFIX)
}

fn sanitize_file_stem(name: &str) -> String {
    // Remove path separators, null bytes, control characters
    name.replace(['/', '\\', '\0'], "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '.' || *c == '-')
        .collect()
}

/// Writes Family documents into an output directory
pub struct FamilyWriter {
    output_dir: PathBuf,
}

impl FamilyWriter {
    /// Create a writer, creating the output directory if needed
    pub fn create(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Serialize one Family as pretty-printed JSON
    ///
    /// # Returns
    /// * Path of the written file (`<output_dir>/<familyId>_PROBAND.json`)
    pub fn write(&self, family: &Family) -> Result<PathBuf> {
        let file_name = family_file_name(&family.id);
        if file_name != format!("{}{}", family.id, OUTPUT_SUFFIX) {
            warn!(
                "Family ID '{}' is not a safe file name, writing {}",
                family.id, file_name
            );
        }
        let path = self.output_dir.join(file_name);

        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file {:?}", path))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, family)
            .context("Failed to write Family JSON")?;
        writer.write_all(b"\n")?;
        writer.flush().context("Failed to flush Family JSON")?;

        info!(
            "Created {} ({} relatives, {} pedigree persons)",
            path.display(),
            family.relatives.len(),
            family.pedigree.persons.len()
        );

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetadataConfig;
    use crate::schema::Pedigree;

    #[test]
    fn test_family_file_name() {
        assert_eq!(family_file_name("FAM1"), "FAM1_PROBAND.json");
    }

    #[test]
    fn test_family_file_name_strips_path_components() {
        assert_eq!(family_file_name("../escaped"), ".._escaped_PROBAND.json");
        assert_eq!(family_file_name("a\\b\0c"), "a_b_c_PROBAND.json");
        assert_eq!(family_file_name("/etc/passwd"), "_etc_passwd_PROBAND.json");
        assert_eq!(family_file_name("FAM 1"), "FAM1_PROBAND.json");
    }

    #[test]
    fn test_write_stays_inside_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let writer = FamilyWriter::create(&out).unwrap();

        let family = Family {
            id: "../escaped".to_string(),
            proband: None,
            relatives: Vec::new(),
            pedigree: Pedigree::default(),
            meta_data: MetadataConfig::default().full(),
        };

        let path = writer.write(&family).unwrap();
        assert_eq!(path.parent(), Some(out.as_path()));
        assert!(path.is_file());
        assert!(!dir.path().join("escaped_PROBAND.json").exists());
    }

    #[test]
    fn test_write_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("families");

        let writer = FamilyWriter::create(&nested).unwrap();
        assert!(writer.output_dir().is_dir());

        let family = Family {
            id: "FAM9".to_string(),
            proband: None,
            relatives: Vec::new(),
            pedigree: Pedigree::default(),
            meta_data: MetadataConfig::default().full(),
        };

        let path = writer.write(&family).unwrap();
        assert_eq!(path, nested.join("FAM9_PROBAND.json"));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["id"], "FAM9");
        assert!(json.get("proband").is_none());
        assert_eq!(json["pedigree"]["persons"], serde_json::json!([]));
        assert_eq!(json["metaData"]["phenopacketSchemaVersion"], "2.0");
        assert_eq!(json["metaData"]["resources"][2]["namespacePrefix"], "GENO");
    }
}
