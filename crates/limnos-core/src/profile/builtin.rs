use crate::error::LimnosError;
use crate::profile::schema::Profile;

const BATHING_WATER_JSON: &str = include_str!("../../../../profiles/bathing-water.json");

/// Available predefined profiles.
pub const PRESETS: &[&str] = &["bathing-water"];

/// Profile used when the caller names none.
pub const DEFAULT_PRESET: &str = "bathing-water";

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<Profile, LimnosError> {
    match name {
        "bathing-water" => crate::profile::parse_profile_str(BATHING_WATER_JSON),
        _ => Err(LimnosError::ProfileInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The default profile.
pub fn default_profile() -> Result<Profile, LimnosError> {
    load_preset(DEFAULT_PRESET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_bathing_water_preset() {
        let p = load_preset("bathing-water").unwrap();
        assert_eq!(p.compliance.family, "litter_survey");
        assert_eq!(p.threshold("pfas"), Some(0.1));
        assert_eq!(p.compliance.caution_pct, 5.0);
        assert_eq!(p.compliance.non_compliant_pct, 10.0);
        let litter = p.family("litter").unwrap();
        assert_eq!(litter.unit_labels, vec!["garber c"]);
        assert_eq!(litter.keywords, vec!["plastic", "microplastic"]);
        let survey = p.compliance_family().unwrap();
        assert_eq!(survey.unit_labels, vec!["garber c"]);
        assert!(survey.keywords.is_empty());
    }

    #[test]
    fn test_every_preset_loads() {
        for name in PRESETS {
            assert!(load_preset(name).is_ok(), "preset {name} failed to load");
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }
}
