pub mod builtin;
pub mod schema;

use crate::error::LimnosError;
use schema::Profile;
use std::collections::HashSet;
use std::path::Path;

/// Load a profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<Profile, LimnosError> {
    let content = std::fs::read_to_string(path).map_err(|e| LimnosError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<Profile, LimnosError> {
    let profile: Profile = serde_json::from_str(json).map_err(|e| LimnosError::ProfileLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_profile(&profile)?;
    tracing::debug!(profile = %profile.name, source = %source.display(), "loaded profile");
    Ok(profile)
}

/// Parse a profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<Profile, LimnosError> {
    let profile: Profile = serde_json::from_str(json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed.
pub fn validate_profile(profile: &Profile) -> Result<(), LimnosError> {
    if profile.name.trim().is_empty() {
        return Err(LimnosError::ProfileInvalid("name must not be empty".into()));
    }

    if profile.families.is_empty() {
        return Err(LimnosError::ProfileInvalid(
            "families must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for family in &profile.families {
        if family.name.is_empty() {
            return Err(LimnosError::ProfileInvalid(
                "family name must not be empty".into(),
            ));
        }

        if !seen.insert(family.name.as_str()) {
            return Err(LimnosError::ProfileInvalid(format!(
                "family '{}' is defined more than once",
                family.name
            )));
        }

        if family.keywords.is_empty() && family.unit_labels.is_empty() {
            return Err(LimnosError::ProfileInvalid(format!(
                "family '{}' has neither keywords nor unit labels",
                family.name
            )));
        }

        if family.keywords.iter().any(|k| k.is_empty()) {
            return Err(LimnosError::ProfileInvalid(format!(
                "family '{}' has an empty keyword",
                family.name
            )));
        }
    }

    for (family, threshold) in &profile.thresholds {
        if !seen.contains(family.as_str()) {
            return Err(LimnosError::ProfileInvalid(format!(
                "threshold references unknown family '{}'",
                family
            )));
        }
        if !threshold.is_finite() || *threshold <= 0.0 {
            return Err(LimnosError::ProfileInvalid(format!(
                "threshold for '{}' must be a positive number, got {}",
                family, threshold
            )));
        }
    }

    let compliance = &profile.compliance;
    if !seen.contains(compliance.family.as_str()) {
        return Err(LimnosError::ProfileInvalid(format!(
            "compliance references unknown family '{}'",
            compliance.family
        )));
    }

    if !(compliance.caution_pct >= 0.0 && compliance.caution_pct <= compliance.non_compliant_pct)
    {
        return Err(LimnosError::ProfileInvalid(format!(
            "compliance bands must satisfy 0 <= caution_pct ({}) <= non_compliant_pct ({})",
            compliance.caution_pct, compliance.non_compliant_pct
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID: &str = r#"{
        "name": "Test",
        "version": "1.0",
        "families": [
            { "name": "litter", "unit_labels": ["garber c"] },
            { "name": "pfas", "keywords": ["fluor"] }
        ],
        "thresholds": { "pfas": 0.1 },
        "compliance": { "family": "litter", "caution_pct": 5, "non_compliant_pct": 10 }
    }"#;

    #[test]
    fn test_parse_valid_profile() {
        let p = parse_profile_str(VALID).unwrap();
        assert_eq!(p.name, "Test");
        assert_eq!(p.families.len(), 2);
        assert_eq!(p.threshold("pfas"), Some(0.1));
        assert_eq!(p.family("pfas").unwrap().fields, schema::MatchFields::Both);
    }

    #[test]
    fn test_unknown_family_lookup() {
        let p = parse_profile_str(VALID).unwrap();
        assert!(matches!(
            p.family("metals"),
            Err(LimnosError::UnknownFamily(_))
        ));
    }

    #[test]
    fn test_empty_families_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0", "families": [],
            "compliance": { "family": "litter", "caution_pct": 5, "non_compliant_pct": 10 }
        }"#;
        assert!(parse_profile_str(json).is_err());
    }

    #[test]
    fn test_family_without_matchers_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0",
            "families": [{ "name": "litter" }],
            "compliance": { "family": "litter", "caution_pct": 5, "non_compliant_pct": 10 }
        }"#;
        assert!(parse_profile_str(json).is_err());
    }

    #[test]
    fn test_duplicate_family_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0",
            "families": [
                { "name": "litter", "keywords": ["plastic"] },
                { "name": "litter", "keywords": ["bag"] }
            ],
            "compliance": { "family": "litter", "caution_pct": 5, "non_compliant_pct": 10 }
        }"#;
        assert!(parse_profile_str(json).is_err());
    }

    #[test]
    fn test_threshold_for_unknown_family_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0",
            "families": [{ "name": "litter", "keywords": ["plastic"] }],
            "thresholds": { "pfas": 0.1 },
            "compliance": { "family": "litter", "caution_pct": 5, "non_compliant_pct": 10 }
        }"#;
        assert!(parse_profile_str(json).is_err());
    }

    #[test]
    fn test_non_positive_threshold_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0",
            "families": [{ "name": "litter", "keywords": ["plastic"] }],
            "thresholds": { "litter": 0 },
            "compliance": { "family": "litter", "caution_pct": 5, "non_compliant_pct": 10 }
        }"#;
        assert!(parse_profile_str(json).is_err());
    }

    #[test]
    fn test_inverted_compliance_bands_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0",
            "families": [{ "name": "litter", "keywords": ["plastic"] }],
            "compliance": { "family": "litter", "caution_pct": 20, "non_compliant_pct": 10 }
        }"#;
        assert!(parse_profile_str(json).is_err());
    }

    #[test]
    fn test_load_profile_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();
        let p = load_profile(file.path()).unwrap();
        assert_eq!(p.compliance.family, "litter");
    }

    #[test]
    fn test_load_profile_reports_path() {
        let err = load_profile(Path::new("/nonexistent/profile.json")).unwrap_err();
        match err {
            LimnosError::ProfileLoad { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/profile.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
