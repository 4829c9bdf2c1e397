//! CSV export.

use crate::error::ScrapeError;
use crate::types::Institution;
use chrono::Local;
use csv::Writer;
use log::info;
use std::path::{Path, PathBuf};

/// Column order is fixed; downstream spreadsheets key on these headers.
const HEADERS: [&str; 9] = [
    "Nama Universitas",
    "Status Universitas",
    "Akreditasi Universitas",
    "Nama Program Studi",
    "Jenjang",
    "Akreditasi Program Studi",
    "Status Program Studi",
    "Tanggal Scraping",
    "Sumber Data",
];

const DATA_SOURCE_LABEL: &str = "PDDikti Website Scraping";

/// Flatten the institution into one row per program, overwriting `path`.
/// Filesystem failures surface as `ScrapeError::Write`; by this point there
/// is nothing left to fall back to.
pub fn export_csv(institution: &Institution, path: &Path) -> Result<PathBuf, ScrapeError> {
    let capture_date = Local::now().format("%Y-%m-%d").to_string();
    write_rows(institution, path, &capture_date)?;
    info!(
        "Exported {} records to {}",
        institution.programs.len(),
        path.display()
    );
    Ok(path.to_path_buf())
}

/// Split out so tests can pin the capture date.
fn write_rows(
    institution: &Institution,
    path: &Path,
    capture_date: &str,
) -> Result<(), ScrapeError> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(HEADERS)?;

    let status = institution.status.to_string();
    let akreditasi = institution.akreditasi.to_string();
    for program in &institution.programs {
        writer.write_record([
            institution.name.as_str(),
            status.as_str(),
            akreditasi.as_str(),
            program.nama_prodi.as_str(),
            program.jenjang.as_str(),
            program.akreditasi.as_str(),
            program.status.as_str(),
            capture_date,
            DATA_SOURCE_LABEL,
        ])?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;
    use std::fs;

    fn temp_csv(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pddikti_export_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_header_row_is_fixed() {
        let path = temp_csv("header.csv");
        write_rows(&fallback::builtin(), &path, "2026-01-01").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.lines().next().unwrap(),
            "Nama Universitas,Status Universitas,Akreditasi Universitas,\
             Nama Program Studi,Jenjang,Akreditasi Program Studi,\
             Status Program Studi,Tanggal Scraping,Sumber Data"
        );
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_one_row_per_program() {
        let path = temp_csv("rows.csv");
        let curated = fallback::builtin();
        write_rows(&curated, &path, "2026-01-01").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1 + curated.programs.len());
        let first_row = content.lines().nth(1).unwrap();
        assert_eq!(
            first_row,
            "Universitas Ekasakti,Swasta,B,Teknik Sipil,S1,,Aktif,2026-01-01,\
             PDDikti Website Scraping"
        );
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_rewrites_are_byte_identical_for_pinned_date() {
        let path = temp_csv("idempotent.csv");
        let curated = fallback::builtin();

        write_rows(&curated, &path, "2026-01-01").unwrap();
        let first = fs::read(&path).unwrap();
        write_rows(&curated, &path, "2026-01-01").unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unwritable_path_surfaces_write_error() {
        let path = PathBuf::from("/no/such/directory/out.csv");
        let result = write_rows(&fallback::builtin(), &path, "2026-01-01");
        assert!(matches!(result, Err(ScrapeError::Write(_))));
    }
}
