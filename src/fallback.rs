//! Fallback dataset.
//!
//! The registry is flaky; when live extraction yields nothing the pipeline
//! exports a curated program listing instead. The listing ships as
//! `config/fallback_programs.yml` so it can be updated without touching
//! code; a compiled-in copy backs it so the pipeline can always produce
//! output even with the asset missing or mangled.

use crate::types::{Accreditation, Institution, InstitutionStatus, Program};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::PathBuf;

/// The curated record set, preferring the on-disk asset.
pub fn institution(root: &str) -> Institution {
    match load_from_disk(root) {
        Ok(curated) => curated,
        Err(e) => {
            warn!("Fallback asset unusable ({:#}), using built-in copy", e);
            builtin()
        }
    }
}

fn load_from_disk(root: &str) -> Result<Institution> {
    let path = PathBuf::from(root).join("config/fallback_programs.yml");
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read fallback data from {:?}", path))?;
    serde_yaml::from_str(&content).context("Failed to parse fallback YAML")
}

/// Known Universitas Ekasakti programs, mirroring the shipped asset.
pub fn builtin() -> Institution {
    let programs = [
        "Teknik Sipil",
        "Teknik Mesin",
        "Teknik Elektro",
        "Arsitektur",
        "Manajemen",
        "Akuntansi",
        "Ilmu Hukum",
        "Sastra Inggris",
        "Psikologi",
    ]
    .iter()
    .map(|name| Program {
        nama_prodi: name.to_string(),
        jenjang: "S1".to_string(),
        akreditasi: String::new(),
        status: "Aktif".to_string(),
    })
    .collect();

    Institution {
        name: "Universitas Ekasakti".to_string(),
        status: InstitutionStatus::Swasta,
        akreditasi: Accreditation::B,
        programs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_nine_programs() {
        let curated = builtin();
        assert_eq!(curated.programs.len(), 9);
        assert_eq!(curated.name, "Universitas Ekasakti");
        assert_eq!(curated.status, InstitutionStatus::Swasta);
        assert_eq!(curated.akreditasi, Accreditation::B);
        assert!(curated.programs.iter().all(|p| p.jenjang == "S1"));
        assert!(curated.programs.iter().all(|p| p.status == "Aktif"));
    }

    #[test]
    fn test_shipped_asset_matches_builtin() {
        let from_disk = load_from_disk(env!("CARGO_MANIFEST_DIR")).unwrap();
        assert_eq!(from_disk, builtin());
    }

    #[test]
    fn test_missing_asset_falls_back_to_builtin() {
        assert_eq!(institution("/no/such/root"), builtin());
    }
}
