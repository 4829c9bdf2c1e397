use serde::{Deserialize, Serialize};
use std::fmt;

/// Ownership status of an institution as published by the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstitutionStatus {
    Negeri,
    Swasta,
    #[default]
    Unknown,
}

impl InstitutionStatus {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_lowercase().as_str() {
            "negeri" => Self::Negeri,
            "swasta" => Self::Swasta,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for InstitutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Unknown renders empty so CSV cells stay blank
        match self {
            Self::Negeri => write!(f, "Negeri"),
            Self::Swasta => write!(f, "Swasta"),
            Self::Unknown => Ok(()),
        }
    }
}

/// Institution-level accreditation grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accreditation {
    A,
    B,
    C,
    #[default]
    Unknown,
}

impl Accreditation {
    pub fn from_letter(letter: &str) -> Self {
        match letter.trim().to_uppercase().as_str() {
            "A" => Self::A,
            "B" => Self::B,
            "C" => Self::C,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Accreditation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::Unknown => Ok(()),
        }
    }
}

/// One study programme. Empty strings mean the registry page did not carry
/// the field; program-level cells stay free text, unlike the institution
/// fields which are regex-parsed into enums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub nama_prodi: String,
    #[serde(default)]
    pub jenjang: String,
    #[serde(default)]
    pub akreditasi: String,
    #[serde(default)]
    pub status: String,
}

/// Everything known about one institution. Built once by the extractor or
/// the fallback provider, consumed once by the exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
    #[serde(default)]
    pub status: InstitutionStatus,
    #[serde(default)]
    pub akreditasi: Accreditation,
    #[serde(default)]
    pub programs: Vec<Program>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_keyword() {
        assert_eq!(InstitutionStatus::from_keyword("Swasta"), InstitutionStatus::Swasta);
        assert_eq!(InstitutionStatus::from_keyword("negeri"), InstitutionStatus::Negeri);
        assert_eq!(InstitutionStatus::from_keyword("yayasan"), InstitutionStatus::Unknown);
    }

    #[test]
    fn test_accreditation_from_letter() {
        assert_eq!(Accreditation::from_letter("b"), Accreditation::B);
        assert_eq!(Accreditation::from_letter(" A "), Accreditation::A);
        assert_eq!(Accreditation::from_letter("D"), Accreditation::Unknown);
    }

    #[test]
    fn test_unknown_renders_blank() {
        assert_eq!(InstitutionStatus::Unknown.to_string(), "");
        assert_eq!(Accreditation::Unknown.to_string(), "");
        assert_eq!(Accreditation::B.to_string(), "B");
    }
}
