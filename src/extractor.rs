//! Study-program extraction.
//!
//! Strategies are pure `fn(&Html) -> Vec<Program>` lookups tried in order;
//! the first non-empty result wins and later strategies never run, so
//! overlapping sources cannot double-report a program. Yielding zero
//! programs is a valid result meaning "try the fallback", never an error.

use crate::types::{Accreditation, Institution, InstitutionStatus, Program};
use log::info;
use regex::Regex;
use scraper::Html;
use scraper::Selector;

/// Minimum characters for a cell or line to count as a program name.
const MIN_NAME_CHARS: usize = 4;

/// Substrings that mark a row as a column header rather than data.
const HEADER_HINTS: &[&str] = &["program studi", "nama prodi"];

/// Keywords associated with academic fields, used by the text heuristic.
const FIELD_KEYWORDS: &[&str] = &[
    "teknik",
    "ekonomi",
    "hukum",
    "sastra",
    "ilmu",
    "manajemen",
    "akuntansi",
];

/// Pull an institution record out of a page believed to be about the
/// university. Program strategies short-circuit on the first non-empty
/// result; institution-level fields are regex matches over the full text
/// and absence just leaves them unknown.
pub fn extract(html: &str, university_name: &str) -> Institution {
    let document = Html::parse_document(html);
    let text = page_text(&document);

    let strategies: &[(&str, fn(&Html) -> Vec<Program>)] =
        &[("table rows", table_strategy), ("text lines", text_strategy)];

    let mut programs = Vec::new();
    for (label, strategy) in strategies {
        programs = strategy(&document);
        if !programs.is_empty() {
            info!("Extracted {} programs via {}", programs.len(), label);
            break;
        }
    }

    Institution {
        name: university_name.to_string(),
        status: institution_status(&text),
        akreditasi: institution_accreditation(&text),
        programs,
    }
}

/// Structured strategy: every table row after the header row, first three
/// cells as (nama_prodi, jenjang, akreditasi).
fn table_strategy(document: &Html) -> Vec<Program> {
    let mut programs = Vec::new();

    let parsed = (
        Selector::parse("table"),
        Selector::parse("tr"),
        Selector::parse("td, th"),
    );
    let (Ok(tables), Ok(rows), Ok(cells)) = parsed else {
        return programs;
    };

    for table in document.select(&tables) {
        for (index, row) in table.select(&rows).enumerate() {
            if index == 0 {
                continue;
            }
            let cell_texts: Vec<String> = row
                .select(&cells)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect();
            if cell_texts.len() < 2 {
                continue;
            }
            let nama = &cell_texts[0];
            if !plausible_program_name(nama) {
                continue;
            }
            programs.push(Program {
                nama_prodi: nama.clone(),
                jenjang: cell_texts.get(1).cloned().unwrap_or_default(),
                akreditasi: cell_texts.get(2).cloned().unwrap_or_default(),
                status: String::new(),
            });
        }
    }

    programs
}

/// Heuristic strategy: keep lines of the page text that look like program
/// names, by field keyword and length, skipping faculty section headers.
fn text_strategy(document: &Html) -> Vec<Program> {
    page_text(document)
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let lower = trimmed.to_lowercase();
            let keyword_hit = FIELD_KEYWORDS.iter().any(|k| lower.contains(k));
            let length = trimmed.chars().count();
            if keyword_hit && !lower.contains("fakultas") && length > 5 && length < 100 {
                Some(Program {
                    nama_prodi: trimmed.to_string(),
                    jenjang: String::new(),
                    akreditasi: String::new(),
                    status: String::new(),
                })
            } else {
                None
            }
        })
        .collect()
}

fn plausible_program_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    name.chars().count() >= MIN_NAME_CHARS && !HEADER_HINTS.iter().any(|h| lower.contains(h))
}

/// First `(swasta|negeri)` match wins; no match leaves the field unknown.
fn institution_status(text: &str) -> InstitutionStatus {
    if let Ok(re) = Regex::new(r"(?i)(swasta|negeri)") {
        if let Some(caps) = re.captures(text) {
            return InstitutionStatus::from_keyword(&caps[1]);
        }
    }
    InstitutionStatus::Unknown
}

fn institution_accreditation(text: &str) -> Accreditation {
    if let Ok(re) = Regex::new(r"(?i)akreditasi[:\s]*([A-C])\b") {
        if let Some(caps) = re.captures(text) {
            return Accreditation::from_letter(&caps[1]);
        }
    }
    Accreditation::Unknown
}

/// Rendered text with one text node per line, close enough to what the
/// browser's textContent would give for line-based heuristics.
fn page_text(document: &Html) -> String {
    document.root_element().text().collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_PAGE: &str = r#"<html><body>
        <p>Universitas Ekasakti adalah perguruan tinggi Swasta. Akreditasi: B</p>
        <table>
            <tr><th>Nama</th><th>Jenjang</th><th>Akreditasi</th></tr>
            <tr><td>Teknik Informatika</td><td>S1</td><td>B</td></tr>
        </table>
    </body></html>"#;

    #[test]
    fn test_table_rows_become_programs() {
        let institution = extract(TABLE_PAGE, "Universitas Ekasakti");
        assert_eq!(institution.programs.len(), 1);
        let program = &institution.programs[0];
        assert_eq!(program.nama_prodi, "Teknik Informatika");
        assert_eq!(program.jenjang, "S1");
        assert_eq!(program.akreditasi, "B");
        assert!(program.status.is_empty());
    }

    #[test]
    fn test_institution_fields_come_from_page_text() {
        let institution = extract(TABLE_PAGE, "Universitas Ekasakti");
        assert_eq!(institution.status, InstitutionStatus::Swasta);
        assert_eq!(institution.akreditasi, Accreditation::B);
    }

    #[test]
    fn test_header_like_and_short_rows_are_skipped() {
        let html = r#"<html><body><table>
            <tr><td>Nama</td><td>Jenjang</td></tr>
            <tr><td>Daftar Program Studi</td><td></td></tr>
            <tr><td>TI</td><td>S1</td></tr>
            <tr><td>Teknik Sipil</td><td>S1</td></tr>
        </table></body></html>"#;
        let institution = extract(html, "Universitas Ekasakti");
        assert_eq!(institution.programs.len(), 1);
        assert_eq!(institution.programs[0].nama_prodi, "Teknik Sipil");
    }

    #[test]
    fn test_text_lines_back_up_missing_tables() {
        let html = r#"<html><body>
            <div>Manajemen Bisnis Internasional</div>
            <div>Fakultas Ekonomi</div>
            <div>Beranda</div>
        </body></html>"#;
        let institution = extract(html, "Universitas Ekasakti");
        assert_eq!(institution.programs.len(), 1);
        let program = &institution.programs[0];
        assert_eq!(program.nama_prodi, "Manajemen Bisnis Internasional");
        assert!(program.jenjang.is_empty());
        assert!(program.akreditasi.is_empty());
    }

    #[test]
    fn test_first_non_empty_strategy_wins() {
        // Table data plus keyword lines; the text strategy must never run.
        let html = r#"<html><body>
            <div>Teknik Pangan dan Gizi</div>
            <table>
                <tr><th>Nama</th><th>Jenjang</th></tr>
                <tr><td>Ilmu Hukum</td><td>S1</td></tr>
            </table>
        </body></html>"#;
        let institution = extract(html, "Universitas Ekasakti");
        assert_eq!(institution.programs.len(), 1);
        assert_eq!(institution.programs[0].nama_prodi, "Ilmu Hukum");
    }

    #[test]
    fn test_empty_page_is_a_valid_empty_result() {
        let institution = extract("<html><body></body></html>", "Universitas Ekasakti");
        assert!(institution.programs.is_empty());
        assert_eq!(institution.status, InstitutionStatus::Unknown);
        assert_eq!(institution.akreditasi, Accreditation::Unknown);
    }

    #[test]
    fn test_accreditation_regex_tolerates_separators() {
        assert_eq!(institution_accreditation("Akreditasi: A"), Accreditation::A);
        assert_eq!(institution_accreditation("akreditasi B"), Accreditation::B);
        assert_eq!(institution_accreditation("AKREDITASI:C"), Accreditation::C);
        assert_eq!(institution_accreditation("no grade here"), Accreditation::Unknown);
    }

    #[test]
    fn test_status_regex_first_match_wins() {
        assert_eq!(institution_status("kampus Negeri dan swasta"), InstitutionStatus::Negeri);
        assert_eq!(institution_status("tidak disebutkan"), InstitutionStatus::Unknown);
    }
}
