use std::fmt;

use serde::{Deserialize, Serialize};

/// Region/locale preset that shapes resume conventions and market insights.
/// Serialized as its display label, which is what the browser client sends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    #[default]
    #[serde(rename = "Global (International Standard)")]
    Global,
    #[serde(rename = "United States (Harvard / ATS Optimized)")]
    UnitedStates,
    #[serde(rename = "Canada (North American Standard)")]
    Canada,
    #[serde(rename = "United Kingdom (Professional CV)")]
    UnitedKingdom,
    #[serde(rename = "Ireland (Tech Hub Standard)")]
    Ireland,
    #[serde(rename = "Germany (Lebenslauf / EU Standard)")]
    Germany,
    #[serde(rename = "France (Standard)")]
    France,
    #[serde(rename = "Switzerland (Banking/Tech Standard)")]
    Switzerland,
    #[serde(rename = "Netherlands (Dutch Style)")]
    Netherlands,
    #[serde(rename = "Nordics (Sweden, Norway, Denmark)")]
    Nordic,
    #[serde(rename = "Australia & New Zealand")]
    Australia,
    #[serde(rename = "India (Naukri / Corporate)")]
    India,
    #[serde(rename = "Singapore (Modern)")]
    Singapore,
    #[serde(rename = "UAE / Middle East (Dubai Standard)")]
    Uae,
    #[serde(rename = "Saudi Arabia (Modern)")]
    Saudi,
    #[serde(rename = "Japan (Global Tech)")]
    Japan,
    #[serde(rename = "Remote / Distributed Teams")]
    Remote,
}

impl Region {
    pub const ALL: [Region; 17] = [
        Region::Global,
        Region::UnitedStates,
        Region::Canada,
        Region::UnitedKingdom,
        Region::Ireland,
        Region::Germany,
        Region::France,
        Region::Switzerland,
        Region::Netherlands,
        Region::Nordic,
        Region::Australia,
        Region::India,
        Region::Singapore,
        Region::Uae,
        Region::Saudi,
        Region::Japan,
        Region::Remote,
    ];

    /// Human-readable label, interpolated into prompts and fallback text.
    pub fn label(&self) -> &'static str {
        match self {
            Region::Global => "Global (International Standard)",
            Region::UnitedStates => "United States (Harvard / ATS Optimized)",
            Region::Canada => "Canada (North American Standard)",
            Region::UnitedKingdom => "United Kingdom (Professional CV)",
            Region::Ireland => "Ireland (Tech Hub Standard)",
            Region::Germany => "Germany (Lebenslauf / EU Standard)",
            Region::France => "France (Standard)",
            Region::Switzerland => "Switzerland (Banking/Tech Standard)",
            Region::Netherlands => "Netherlands (Dutch Style)",
            Region::Nordic => "Nordics (Sweden, Norway, Denmark)",
            Region::Australia => "Australia & New Zealand",
            Region::India => "India (Naukri / Corporate)",
            Region::Singapore => "Singapore (Modern)",
            Region::Uae => "UAE / Middle East (Dubai Standard)",
            Region::Saudi => "Saudi Arabia (Modern)",
            Region::Japan => "Japan (Global Tech)",
            Region::Remote => "Remote / Distributed Teams",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Profile collected by the browser client. The generation core only reads it.
///
/// Missing fields deserialize to empty strings so partially-filled forms round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
    /// Comma-separated.
    pub skills: String,
    pub education: String,
    pub target_role: String,
    pub target_region: Region,
}

impl UserProfile {
    /// Blank profile pre-filled with the owner's email, as created on first login.
    pub fn for_email(email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..Self::default()
        }
    }

    /// The text before the first comma in `skills`, trimmed.
    pub fn first_skill(&self) -> &str {
        self.skills.split(',').next().unwrap_or_default().trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_serializes_as_label() {
        for region in Region::ALL {
            let json = serde_json::to_string(&region).unwrap();
            assert_eq!(json, format!("\"{}\"", region.label()));
            let back: Region = serde_json::from_str(&json).unwrap();
            assert_eq!(back, region);
        }
    }

    #[test]
    fn test_profile_uses_camel_case_and_defaults() {
        let json = r#"{
            "fullName": "Ada Lovelace",
            "targetRole": "Data Engineer",
            "skills": "Python, SQL",
            "targetRegion": "Germany (Lebenslauf / EU Standard)"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.full_name, "Ada Lovelace");
        assert_eq!(profile.target_role, "Data Engineer");
        assert_eq!(profile.target_region, Region::Germany);
        assert!(profile.education.is_empty());
    }

    #[test]
    fn test_first_skill() {
        let profile = UserProfile {
            skills: " Rust , Go,Kubernetes".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.first_skill(), "Rust");
    }

    #[test]
    fn test_first_skill_empty() {
        assert_eq!(UserProfile::default().first_skill(), "");
    }

    #[test]
    fn test_for_email() {
        let profile = UserProfile::for_email("ada@example.com");
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.target_region, Region::Global);
    }
}
