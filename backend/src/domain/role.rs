//! Organisational roles and alias resolution.
//!
//! The upstream backend reports roles as free-text strings. Resolution into
//! the closed [`Role`] enum is total: known spellings (canonical or alias)
//! map to a variant, anything else maps to `None`. Callers log unrecognised
//! values; nothing in this module panics on them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Organisational category of an authenticated portal user.
///
/// Exactly one role per authenticated session; an anonymous session has
/// none. The wire form is the canonical SCREAMING_SNAKE spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// District office staff submitting demolition requests.
    DistrictOffice,
    /// City hall staff running recruitment and oversight.
    CityHall,
    /// Architect society staff screening applicants and assigning work.
    ArchitectSociety,
    /// Supervising inspector working assigned demolitions.
    Inspector,
}

/// Every role, in the order menus and policies enumerate them.
pub const ALL_ROLES: [Role; 4] = [
    Role::DistrictOffice,
    Role::CityHall,
    Role::ArchitectSociety,
    Role::Inspector,
];

impl Role {
    /// Resolve a raw role string from the upstream backend.
    ///
    /// Covers the canonical spellings plus observed variants
    /// (`ARCHITECTURE_SOCIETY`, `SUPERVISOR`). Unknown or empty input yields
    /// `None`; the caller decides whether that warrants a diagnostic.
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim() {
            "DISTRICT_OFFICE" => Some(Self::DistrictOffice),
            "CITY_HALL" => Some(Self::CityHall),
            "ARCHITECT_SOCIETY" | "ARCHITECTURE_SOCIETY" => Some(Self::ArchitectSociety),
            "INSPECTOR" | "SUPERVISOR" => Some(Self::Inspector),
            _ => None,
        }
    }

    /// Canonical wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DistrictOffice => "DISTRICT_OFFICE",
            Self::CityHall => "CITY_HALL",
            Self::ArchitectSociety => "ARCHITECT_SOCIETY",
            Self::Inspector => "INSPECTOR",
        }
    }

    /// Human-readable label shown in the navigation header.
    ///
    /// Covers every declared role; a role without a label would be a
    /// configuration error, so the mapping is exhaustive by construction.
    pub fn label(self) -> &'static str {
        match self {
            Self::DistrictOffice => "District Office",
            Self::CityHall => "City Hall",
            Self::ArchitectSociety => "Architect Society",
            Self::Inspector => "Supervising Inspector",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("DISTRICT_OFFICE", Some(Role::DistrictOffice))]
    #[case("CITY_HALL", Some(Role::CityHall))]
    #[case("ARCHITECT_SOCIETY", Some(Role::ArchitectSociety))]
    #[case("ARCHITECTURE_SOCIETY", Some(Role::ArchitectSociety))]
    #[case("INSPECTOR", Some(Role::Inspector))]
    #[case("SUPERVISOR", Some(Role::Inspector))]
    #[case(" CITY_HALL ", Some(Role::CityHall))]
    #[case("UNKNOWN_ROLE", None)]
    #[case("city_hall", None)]
    #[case("", None)]
    fn normalization_is_total(#[case] raw: &str, #[case] expected: Option<Role>) {
        assert_eq!(Role::normalize(raw), expected);
    }

    #[rstest]
    fn canonical_spellings_round_trip() {
        for role in ALL_ROLES {
            assert_eq!(Role::normalize(role.as_str()), Some(role));
        }
    }

    #[rstest]
    fn every_role_has_a_label() {
        for role in ALL_ROLES {
            assert!(!role.label().is_empty());
        }
    }

    #[rstest]
    fn serde_uses_canonical_spelling() {
        let json = serde_json::to_value(Role::ArchitectSociety).expect("serializable");
        assert_eq!(json, serde_json::json!("ARCHITECT_SOCIETY"));
    }
}
